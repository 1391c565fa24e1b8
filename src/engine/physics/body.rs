use super::collision::{resolve_axis, Axis, CollisionFlags};
use crate::core::math::normalize_intent;
use crate::core::Rect;
use crate::engine::tilemap::SparseTileGrid;
use glam::Vec2;

/// Gravity tuning shared by every body in a level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    /// Added to vertical velocity every tick (px/tick²)
    pub gravity: f32,
    /// Terminal falling speed (px/tick)
    pub max_fall_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.1,
            max_fall_speed: 5.0,
        }
    }
}

/// Axis-aligned box moved through the tile grid
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    /// Top-left corner in pixels
    pub position: Vec2,
    pub size: Vec2,
    /// Persistent velocity: gravity plus impulses such as jumps and knockback
    pub velocity: Vec2,
    pub collisions: CollisionFlags,
}

impl PhysicsBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
            collisions: CollisionFlags::default(),
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Teleport the body, dropping any accumulated velocity
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.collisions.clear();
    }

    /// Advance one tick.
    ///
    /// `intent` is a direction (normalised here when diagonal) scaled by
    /// `speed`; the persistent velocity is added on top without normalising.
    /// X is moved and resolved before Y. Gravity is applied last and vertical
    /// velocity is zeroed on floor or ceiling contact.
    pub fn update(
        &mut self,
        grid: &SparseTileGrid,
        intent: Vec2,
        speed: f32,
        config: &PhysicsConfig,
    ) -> CollisionFlags {
        self.collisions.clear();

        let frame = normalize_intent(intent) * speed + self.velocity;

        self.position.x += frame.x;
        let mut rect = self.rect();
        let solids = grid.collidable_rects_near(self.position);
        resolve_axis(&mut rect, frame.x, &solids, Axis::Horizontal, &mut self.collisions);
        self.position.x = rect.x;

        self.position.y += frame.y;
        let mut rect = self.rect();
        let solids = grid.collidable_rects_near(self.position);
        resolve_axis(&mut rect, frame.y, &solids, Axis::Vertical, &mut self.collisions);
        self.position.y = rect.y;

        self.velocity.y = (self.velocity.y + config.gravity).min(config.max_fall_speed);
        if self.collisions.down || self.collisions.up {
            self.velocity.y = 0.0;
        }

        self.collisions
    }
}
