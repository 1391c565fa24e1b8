// Visual effects: sparks, screen shake and the level transition iris

use glam::Vec2;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// A short-lived streak that flies out and slows to a stop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
}

impl Spark {
    pub fn new(pos: Vec2, angle: f32, speed: f32) -> Self {
        Self { pos, angle, speed }
    }

    /// Move and slow down. Returns false once the spark has stopped.
    pub fn update(&mut self) -> bool {
        self.pos += Vec2::from_angle(self.angle) * self.speed;
        self.speed = (self.speed - 1.0).max(0.0);
        self.speed > 0.0
    }

    /// Quad outline: long along the heading, thin across it
    pub fn outline(&self) -> [Vec2; 4] {
        let along = Vec2::from_angle(self.angle);
        let across = Vec2::from_angle(self.angle + PI / 2.0);
        [
            self.pos + along * self.speed * 3.0,
            self.pos + across * self.speed * 0.5,
            self.pos - along * self.speed * 3.0,
            self.pos - across * self.speed * 0.5,
        ]
    }
}

/// Sparks in every direction, e.g. for a death
pub fn burst(rng: &mut impl Rng, pos: Vec2, count: usize) -> Vec<Spark> {
    (0..count)
        .map(|_| Spark::new(pos, rng.gen::<f32>() * TAU, 2.0 + rng.gen::<f32>()))
        .collect()
}

/// Sparks in a narrow fan around `heading`, e.g. a shot hitting a wall
pub fn fan(rng: &mut impl Rng, pos: Vec2, heading: f32, count: usize) -> Vec<Spark> {
    (0..count)
        .map(|_| Spark::new(pos, heading + rng.gen::<f32>() - 0.5, 2.0 + rng.gen::<f32>()))
        .collect()
}

/// Decaying camera jitter, in window pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenShake {
    magnitude: f32,
}

impl ScreenShake {
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Raise the shake to at least `magnitude`
    pub fn add(&mut self, magnitude: f32) {
        self.magnitude = self.magnitude.max(magnitude);
    }

    /// Lose one unit per tick
    pub fn decay(&mut self) {
        self.magnitude = (self.magnitude - 1.0).max(0.0);
    }

    /// Random offset within +-magnitude/2 on each axis
    pub fn offset(&self, rng: &mut impl Rng) -> Vec2 {
        if self.magnitude <= 0.0 {
            return Vec2::ZERO;
        }
        let m = self.magnitude;
        Vec2::new(rng.gen::<f32>() * m - m / 2.0, rng.gen::<f32>() * m - m / 2.0)
    }
}

/// Ticks the iris takes to open or close
pub const TRANSITION_TICKS: i32 = 30;

/// Circular wipe between levels.
///
/// Negative values are the iris opening after a load, zero is fully open and
/// positive values close it once the level is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTransition {
    value: i32,
}

impl LevelTransition {
    /// Start closed and open over the next ticks
    pub fn opening() -> Self {
        Self {
            value: -TRANSITION_TICKS,
        }
    }

    /// Fully open, no wipe in progress
    pub fn open() -> Self {
        Self { value: 0 }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn is_active(&self) -> bool {
        self.value != 0
    }

    /// Advance one tick. Returns true when the iris has fully closed on a
    /// cleared level and the next one should load.
    pub fn tick(&mut self, level_cleared: bool) -> bool {
        if self.value < 0 {
            self.value += 1;
        } else if level_cleared {
            self.value += 1;
        }
        self.value > TRANSITION_TICKS
    }

    /// Iris radius in display pixels
    pub fn radius(&self) -> f32 {
        ((TRANSITION_TICKS - self.value.abs()).max(0) * 8) as f32
    }
}

impl Default for LevelTransition {
    fn default() -> Self {
        Self::opening()
    }
}
