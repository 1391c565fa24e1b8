// Input handling system
//
// Translates winit keyboard/mouse events into game input for the local
// player, with remappable bindings and trigger buffering.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `buffer`: Trigger buffering so presses between ticks are not missed
// - `player`: Held movement state and pending triggers
// - `config`: Input configuration and remapping system
// - `manager`: Event processing and per-tick snapshots
//
// ## Usage Example
//
// ```rust
// let mut input = InputManager::default();
//
// // In the event loop
// input.process_keyboard_event(&key_event);
//
// // Once per simulation tick
// let tick_input = input.snapshot();
// input.update();
// ```

pub mod action;
pub mod buffer;
pub mod config;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use config::InputConfig;
pub use manager::{InputManager, TickInput};
