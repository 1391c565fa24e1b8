// Game layer: rules and content built on the engine

pub mod characters;
pub mod draw;
pub mod effects;
pub mod projectile;
pub mod settings;
pub mod spawner;
pub mod state;

pub use settings::GameSettings;
pub use state::GameState;
