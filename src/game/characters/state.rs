// Character action state, derived from movement every tick

/// What a character is doing, as shown by its animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterState {
    /// Standing still
    #[default]
    Idle,
    /// Moving horizontally
    Running,
    /// Moving upward
    Jumping,
    /// Holding onto a wall while falling
    WallSliding,
}

impl CharacterState {
    /// Player state from this tick's movement.
    ///
    /// A wall slide wins over everything, then rising, then running.
    pub fn from_motion(wall_sliding: bool, velocity_y: f32, moving: bool) -> Self {
        if wall_sliding {
            Self::WallSliding
        } else if velocity_y < 0.0 {
            Self::Jumping
        } else if moving {
            Self::Running
        } else {
            Self::Idle
        }
    }

    /// Is the character pressed against a wall
    pub fn is_on_wall(&self) -> bool {
        matches!(self, Self::WallSliding)
    }

    /// Get the animation name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "run",
            Self::Jumping => "jump",
            Self::WallSliding => "wall_slide",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        assert_eq!(CharacterState::default(), CharacterState::Idle);
    }

    #[test]
    fn test_priority() {
        assert_eq!(CharacterState::from_motion(true, -1.0, true), CharacterState::WallSliding);
        assert_eq!(CharacterState::from_motion(false, -1.0, true), CharacterState::Jumping);
        assert_eq!(CharacterState::from_motion(false, 1.0, true), CharacterState::Running);
        assert_eq!(CharacterState::from_motion(false, 0.0, false), CharacterState::Idle);
    }

    #[test]
    fn test_falling_shows_run_or_idle() {
        // Falling has no animation of its own
        assert_eq!(CharacterState::from_motion(false, 2.0, false), CharacterState::Idle);
    }

    #[test]
    fn test_animation_names() {
        assert_eq!(CharacterState::Idle.animation_name(), "idle");
        assert_eq!(CharacterState::Running.animation_name(), "run");
        assert_eq!(CharacterState::Jumping.animation_name(), "jump");
        assert_eq!(CharacterState::WallSliding.animation_name(), "wall_slide");
        assert!(CharacterState::WallSliding.is_on_wall());
    }
}
