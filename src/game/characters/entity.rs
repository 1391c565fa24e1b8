// Entity: a physics body plus the behaviour that drives it

use super::animation::AnimationPlayer;
use super::enemy::{EnemyController, EnemyKind};
use super::health::Health;
use super::player::PlayerController;
use super::state::CharacterState;
use super::stats::{EnemyStats, PlayerStats};
use crate::core::Rect;
use crate::engine::physics::PhysicsBody;
use glam::Vec2;

/// Unique identifier for an entity within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Horizontal facing, used for sprite mirroring and dash direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Facing implied by a horizontal movement, or `self` when there is none
    pub fn toward(self, dx: f32) -> Self {
        if dx > 0.0 {
            Self::Right
        } else if dx < 0.0 {
            Self::Left
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Enemy(EnemyKind),
}

/// Per-kind logic and state
#[derive(Debug, Clone)]
pub enum Behavior {
    Player(PlayerController),
    Enemy(EnemyController),
}

/// Anything that moves through the level and can be hurt
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub body: PhysicsBody,
    pub health: Health,
    pub facing: Facing,
    pub state: CharacterState,
    pub animation: AnimationPlayer,
    pub behavior: Behavior,
}

impl Entity {
    /// Spawn the player with its top-left at `position`
    pub fn player(id: EntityId, position: Vec2, stats: &PlayerStats) -> Self {
        Self {
            id,
            body: PhysicsBody::new(position, Vec2::new(stats.width, stats.height)),
            health: Health::new(stats.max_health, stats.invulnerability_ticks),
            facing: Facing::default(),
            state: CharacterState::Idle,
            animation: AnimationPlayer::player(),
            behavior: Behavior::Player(PlayerController::new(stats)),
        }
    }

    /// Spawn an enemy with its top-left at `position`
    pub fn enemy(id: EntityId, kind: EnemyKind, position: Vec2, stats: &EnemyStats) -> Self {
        Self {
            id,
            body: PhysicsBody::new(position, Vec2::new(stats.width, stats.height)),
            health: Health::new(stats.max_health, 0),
            facing: Facing::default(),
            state: CharacterState::Idle,
            animation: AnimationPlayer::enemy(),
            behavior: Behavior::Enemy(EnemyController::new(kind)),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match &self.behavior {
            Behavior::Player(_) => EntityKind::Player,
            Behavior::Enemy(enemy) => EntityKind::Enemy(enemy.kind()),
        }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    pub fn as_player(&self) -> Option<&PlayerController> {
        match &self.behavior {
            Behavior::Player(player) => Some(player),
            Behavior::Enemy(_) => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut PlayerController> {
        match &mut self.behavior {
            Behavior::Player(player) => Some(player),
            Behavior::Enemy(_) => None,
        }
    }

    pub fn as_enemy(&self) -> Option<&EnemyController> {
        match &self.behavior {
            Behavior::Enemy(enemy) => Some(enemy),
            Behavior::Player(_) => None,
        }
    }

    /// Record this tick's state and point the animation at it
    pub(super) fn set_state(&mut self, state: CharacterState) {
        self.state = state;
        self.animation.play(state.animation_name());
        self.animation.set_flip_horizontal(self.facing == Facing::Left);
        self.animation.update();
    }
}
