// Trigger buffering so presses between ticks are never lost

use super::action::Action;
use glam::Vec2;
use std::collections::VecDeque;

/// Maximum number of buffered triggers to store
const MAX_BUFFER_SIZE: usize = 16;

/// How long a trigger waits to be consumed (in ticks)
const BUFFER_DURATION: u32 = 5;

/// A single buffered trigger
#[derive(Debug, Clone, Copy)]
pub struct BufferedInput {
    pub action: Action,
    /// Pointer position in window pixels at the moment of the press
    pub pointer: Vec2,
    pub ticks_remaining: u32,
}

impl BufferedInput {
    /// Create a new buffered trigger
    pub fn new(action: Action, pointer: Vec2) -> Self {
        Self {
            action,
            pointer,
            ticks_remaining: BUFFER_DURATION,
        }
    }

    /// Decrease the remaining ticks
    pub fn age(&mut self) {
        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
    }

    /// Check if this trigger has expired
    pub fn is_expired(&self) -> bool {
        self.ticks_remaining == 0
    }
}

/// FIFO of pending triggers
#[derive(Debug)]
pub struct InputBuffer {
    buffer: VecDeque<BufferedInput>,
}

impl InputBuffer {
    /// Create a new input buffer
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_BUFFER_SIZE),
        }
    }

    /// Buffer a trigger. A repeat of an already pending action refreshes its
    /// pointer and lifetime instead of queueing twice.
    pub fn push(&mut self, action: Action, pointer: Vec2) {
        if let Some(existing) = self.buffer.iter_mut().find(|input| input.action == action) {
            *existing = BufferedInput::new(action, pointer);
            return;
        }

        self.buffer.push_back(BufferedInput::new(action, pointer));
        if self.buffer.len() > MAX_BUFFER_SIZE {
            self.buffer.pop_front();
        }
    }

    /// Check if an action is currently buffered
    pub fn has(&self, action: Action) -> bool {
        self.buffer.iter().any(|input| input.action == action)
    }

    /// Remove and return a buffered action
    pub fn consume(&mut self, action: Action) -> Option<BufferedInput> {
        let pos = self.buffer.iter().position(|input| input.action == action)?;
        self.buffer.remove(pos)
    }

    /// Age all triggers and drop the expired ones. Call once per tick.
    pub fn update(&mut self) {
        for input in &mut self.buffer {
            input.age();
        }
        self.buffer.retain(|input| !input.is_expired());
    }

    /// Clear all buffered triggers
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_input_expiration() {
        let mut input = BufferedInput::new(Action::Jump, Vec2::ZERO);
        assert!(!input.is_expired());
        for _ in 0..BUFFER_DURATION {
            input.age();
        }
        assert!(input.is_expired());
        input.age();
        assert_eq!(input.ticks_remaining, 0);
    }

    #[test]
    fn test_buffer_push_refreshes_duplicate() {
        let mut buffer = InputBuffer::new();
        buffer.push(Action::Attack, Vec2::new(1.0, 1.0));
        buffer.update();
        buffer.push(Action::Attack, Vec2::new(50.0, 60.0));

        assert_eq!(buffer.len(), 1);
        let attack = buffer.consume(Action::Attack).unwrap();
        assert_eq!(attack.pointer, Vec2::new(50.0, 60.0));
        assert_eq!(attack.ticks_remaining, BUFFER_DURATION);
    }

    #[test]
    fn test_buffer_consume() {
        let mut buffer = InputBuffer::new();
        buffer.push(Action::Jump, Vec2::ZERO);
        assert!(buffer.has(Action::Jump));
        assert!(buffer.consume(Action::Jump).is_some());
        assert!(!buffer.has(Action::Jump));
        assert!(buffer.consume(Action::Jump).is_none());
    }

    #[test]
    fn test_buffer_update_expires() {
        let mut buffer = InputBuffer::new();
        buffer.push(Action::Dash, Vec2::ZERO);
        for _ in 0..BUFFER_DURATION {
            buffer.update();
        }
        assert!(buffer.is_empty(), "Expired inputs should be removed");
    }

    #[test]
    fn test_buffer_multiple_actions() {
        let mut buffer = InputBuffer::new();
        buffer.push(Action::Jump, Vec2::ZERO);
        buffer.push(Action::Attack, Vec2::ZERO);
        buffer.push(Action::Dash, Vec2::ZERO);
        assert_eq!(buffer.len(), 3);
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
