// Tile physics: axis-separated AABB movement against the sparse grid
//
// Bodies never rotate and only collide with solid tiles in the 3x3
// neighbourhood of their position. Entity-vs-entity overlap is handled by
// game code using plain rectangle tests.

pub mod body;
mod collision;

pub use body::{PhysicsBody, PhysicsConfig};
pub use collision::CollisionFlags;
