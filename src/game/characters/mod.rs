// Character system
//
// This module contains everything related to the player and enemies:
// - Entity data structure (body, health, facing, behaviour)
// - Player controller and enemy AI
// - Melee combat with a hitbox trail
// - Stats, action state and animation timing

pub mod animation;
pub mod combat;
pub mod enemy;
pub mod entity;
pub mod health;
pub mod player;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use combat::{aim_angle, AttackSnapshot};
pub use enemy::{EnemyAction, EnemyKind};
pub use entity::{Entity, EntityId, EntityKind};
pub use player::PlayerIntent;
pub use stats::{EnemyStats, PlayerStats};
