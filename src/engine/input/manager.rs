// Input manager - turns window events into per-tick game input

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::player::PlayerInput;
use glam::Vec2;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Everything one simulation tick needs from the player
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickInput {
    /// Held directions, +y down
    pub movement: Vec2,
    pub jump: bool,
    pub dash: bool,
    /// Pointer position in window pixels when attack was pressed
    pub attack: Option<Vec2>,
}

/// Main input manager. Event handlers only flip flags and buffer triggers;
/// the game reads them once per tick through [`InputManager::snapshot`].
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
    /// Last known cursor position in window pixels
    pointer: Vec2,
    pause_requested: bool,
    quit_requested: bool,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            player: PlayerInput::new(),
            pointer: Vec2::ZERO,
            pause_requested: false,
            quit_requested: false,
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_key(key_code, event.state, event.repeat);
        }
    }

    /// Apply a key transition
    pub fn process_key(&mut self, key: KeyCode, state: ElementState, repeat: bool) {
        if repeat {
            return;
        }
        self.apply(InputSource::key(key), state);
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.apply(InputSource::mouse(button), state);
    }

    /// Track the cursor, in window pixels
    pub fn process_cursor_moved(&mut self, position: Vec2) {
        self.pointer = position;
    }

    fn apply(&mut self, source: InputSource, state: ElementState) {
        let Some(action) = self.config.get_action(source) else {
            return;
        };

        match (action, state) {
            (Action::Pause, ElementState::Pressed) => self.pause_requested = true,
            (Action::Quit, ElementState::Pressed) => self.quit_requested = true,
            (Action::Pause | Action::Quit, ElementState::Released) => {}
            (_, ElementState::Pressed) => {
                let newly_pressed = !self.player.is_pressed(action);
                self.player.press(action, self.pointer);
                // Up doubles as jump
                if action == Action::MoveUp && newly_pressed {
                    self.player.trigger(Action::Jump, self.pointer);
                }
            }
            (_, ElementState::Released) => self.player.release(action),
        }
    }

    /// Collect this tick's input, consuming pending triggers
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            movement: self.player.direction(),
            jump: self.player.consume(Action::Jump).is_some(),
            dash: self.player.consume(Action::Dash).is_some(),
            attack: self.player.consume(Action::Attack).map(|input| input.pointer),
        }
    }

    /// Age buffered triggers. Call once per simulated tick after `snapshot`.
    pub fn update(&mut self) {
        self.player.update();
    }

    /// Returns true once per pause key press
    pub fn take_pause_request(&mut self) -> bool {
        std::mem::take(&mut self.pause_requested)
    }

    /// Returns true once per quit key press
    pub fn take_quit_request(&mut self) -> bool {
        std::mem::take(&mut self.quit_requested)
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    /// Get the binding table
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Drop held and pending input
    pub fn reset(&mut self) {
        self.player.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(InputConfig::with_defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_movement() {
        let mut manager = InputManager::default();
        manager.process_key(KeyCode::KeyD, ElementState::Pressed, false);
        manager.process_key(KeyCode::ArrowDown, ElementState::Pressed, false);

        let input = manager.snapshot();
        assert_eq!(input.movement, Vec2::new(1.0, 1.0));
        assert!(!input.jump);

        manager.process_key(KeyCode::KeyD, ElementState::Released, false);
        assert_eq!(manager.snapshot().movement, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_triggers_consumed_once() {
        let mut manager = InputManager::default();
        manager.process_key(KeyCode::Space, ElementState::Pressed, false);
        manager.process_key(KeyCode::KeyX, ElementState::Pressed, false);

        let first = manager.snapshot();
        assert!(first.jump && first.dash);
        let second = manager.snapshot();
        assert!(!second.jump && !second.dash);
    }

    #[test]
    fn test_attack_carries_pointer() {
        let mut manager = InputManager::default();
        manager.process_cursor_moved(Vec2::new(320.0, 100.0));
        manager.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        manager.process_cursor_moved(Vec2::new(0.0, 0.0));

        assert_eq!(manager.snapshot().attack, Some(Vec2::new(320.0, 100.0)));
    }

    #[test]
    fn test_up_also_jumps() {
        let mut manager = InputManager::default();
        manager.process_key(KeyCode::KeyW, ElementState::Pressed, false);
        let input = manager.snapshot();
        assert!(input.jump);
        assert_eq!(input.movement, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_key_repeat_ignored() {
        let mut manager = InputManager::default();
        manager.process_key(KeyCode::Space, ElementState::Pressed, false);
        manager.snapshot();
        manager.process_key(KeyCode::Space, ElementState::Pressed, true);
        assert!(!manager.snapshot().jump);
    }

    #[test]
    fn test_pause_and_quit_requests() {
        let mut manager = InputManager::default();
        manager.process_key(KeyCode::KeyP, ElementState::Pressed, false);
        assert!(manager.take_pause_request());
        assert!(!manager.take_pause_request());

        manager.process_key(KeyCode::Escape, ElementState::Pressed, false);
        assert!(manager.take_quit_request());
    }

    #[test]
    fn test_stale_trigger_expires() {
        let mut manager = InputManager::default();
        manager.process_key(KeyCode::Space, ElementState::Pressed, false);
        for _ in 0..10 {
            manager.update();
        }
        assert!(!manager.snapshot().jump);
    }
}
