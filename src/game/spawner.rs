// Enemy spawner: drops enemies on a ring around the player

use super::characters::EnemyKind;
use super::settings::SpawnerSettings;
use crate::core::Rect;
use crate::engine::tilemap::SparseTileGrid;
use glam::Vec2;
use log::debug;
use rand::Rng;
use std::f32::consts::TAU;

/// Where and what to spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    /// Top-left corner of the new enemy's body
    pub position: Vec2,
    pub kind: EnemyKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemySpawner {
    settings: SpawnerSettings,
    ticks_since_spawn: u32,
    spawned: u32,
}

impl EnemySpawner {
    pub fn new(settings: SpawnerSettings) -> Self {
        Self {
            settings,
            ticks_since_spawn: 0,
            spawned: 0,
        }
    }

    /// Start a fresh level
    pub fn reset(&mut self) {
        self.ticks_since_spawn = 0;
        self.spawned = 0;
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// True once the spawner will never produce another enemy this level
    pub fn is_exhausted(&self) -> bool {
        !self.settings.enabled || (self.settings.budget > 0 && self.spawned >= self.settings.budget)
    }

    /// Advance one tick and maybe pick a spawn point.
    ///
    /// `enemy_count` is the current roster size and `player_center` the ring's
    /// centre. A candidate overlapping a solid tile is dropped and retried on
    /// the next tick.
    pub fn update(
        &mut self,
        enemy_count: usize,
        player_center: Vec2,
        body_size: Vec2,
        grid: &SparseTileGrid,
        rng: &mut impl Rng,
    ) -> Option<SpawnRequest> {
        self.ticks_since_spawn = self.ticks_since_spawn.saturating_add(1);

        if self.is_exhausted()
            || enemy_count >= self.settings.max_enemies
            || self.ticks_since_spawn < self.settings.interval
        {
            return None;
        }

        let angle = rng.gen::<f32>() * TAU;
        let distance = if self.settings.max_radius > self.settings.min_radius {
            rng.gen_range(self.settings.min_radius..=self.settings.max_radius)
        } else {
            self.settings.min_radius
        };
        let center = player_center + Vec2::from_angle(angle) * distance;
        let rect = Rect::from_center(center, body_size);

        let blocked = grid
            .collidable_rects_near(rect.position())
            .iter()
            .chain(grid.collidable_rects_near(Vec2::new(rect.right(), rect.bottom())).iter())
            .any(|solid| rect.intersects(solid));
        if blocked {
            debug!("Spawn candidate at {center:?} is inside a wall, retrying");
            return None;
        }

        let kind = if rng.gen_bool(self.settings.ranged_chance.clamp(0.0, 1.0)) {
            EnemyKind::Ranged
        } else {
            EnemyKind::Melee
        };

        self.ticks_since_spawn = 0;
        self.spawned += 1;
        debug!("Spawning {kind:?} enemy at {center:?}");
        Some(SpawnRequest {
            position: rect.position(),
            kind,
        })
    }
}
