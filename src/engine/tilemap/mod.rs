// Tilemap system
//
// Sparse tile storage keyed by integer grid coordinate, plus free-floating
// decorations placed at pixel precision.
//
// ## Architecture
//
// - `grid`: `SparseTileGrid` storage, neighbourhood and collision queries
// - `level`: JSON level document, save/load and its errors
// - `autotile`: editor-time variant selection from same-kind neighbours

mod autotile;
pub mod grid;
pub mod level;

pub use grid::{Decoration, ExtractedTile, SparseTileGrid, Tile, PHYSICS_TILES};
pub use level::{LevelLoadError, LevelSaveError, LoadOutcome};
