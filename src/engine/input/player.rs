// Player input state: held movement flags and pending triggers

use super::action::Action;
use super::buffer::{BufferedInput, InputBuffer};
use glam::Vec2;
use std::collections::HashSet;

/// Input state for the local player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently held
    pressed: HashSet<Action>,

    /// Actions pressed since the last tick
    just_pressed: HashSet<Action>,

    /// Triggers waiting for the next tick
    buffer: InputBuffer,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was pressed since the last tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Register an action press. Triggers are buffered with the pointer.
    pub(crate) fn press(&mut self, action: Action, pointer: Vec2) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
            if action.is_trigger() {
                self.buffer.push(action, pointer);
            }
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Buffer a trigger without changing held state
    pub(crate) fn trigger(&mut self, action: Action, pointer: Vec2) {
        self.buffer.push(action, pointer);
    }

    pub(crate) fn consume(&mut self, action: Action) -> Option<BufferedInput> {
        self.buffer.consume(action)
    }

    /// Advance one tick: clear edge state and age the trigger buffer
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
        self.buffer.update();
    }

    /// Reset all input state, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.buffer.clear();
    }

    /// Held directions as a vector in screen orientation (+y is down).
    /// Opposing keys cancel out.
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: Action, pos: Action| {
            (self.is_pressed(pos) as i32 - self.is_pressed(neg) as i32) as f32
        };
        Vec2::new(
            axis(Action::MoveLeft, Action::MoveRight),
            axis(Action::MoveUp, Action::MoveDown),
        )
    }
}
