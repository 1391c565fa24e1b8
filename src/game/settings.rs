// Game settings: every tunable grouped by concern, loaded from JSON

use super::characters::{EnemyStats, PlayerStats};
use crate::engine::game_loop::DEFAULT_TICK_RATE;
use crate::engine::physics::PhysicsConfig;
use glam::UVec2;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub title: String,
    /// Native resolution the game is drawn at
    pub width: u32,
    pub height: u32,
    /// Initial window size; the display is stretched to fill it
    pub window_width: u32,
    pub window_height: u32,
    /// Simulation ticks per second
    pub tick_rate: u32,
}

impl DisplaySettings {
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    pub fn window_size(&self) -> UVec2 {
        UVec2::new(self.window_width, self.window_height)
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            title: "Tilebrawl".to_string(),
            width: 320,
            height: 240,
            window_width: 640,
            window_height: 480,
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Tile size used for new levels; loaded levels carry their own
    pub tile_size: u32,
}

impl PhysicsSettings {
    pub fn config(&self) -> PhysicsConfig {
        PhysicsConfig {
            gravity: self.gravity,
            max_fall_speed: self.max_fall_speed,
        }
    }
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        let config = PhysicsConfig::default();
        Self {
            gravity: config.gravity,
            max_fall_speed: config.max_fall_speed,
            tile_size: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerSettings {
    pub enabled: bool,
    /// No spawns while this many enemies are alive
    pub max_enemies: usize,
    /// Minimum ticks between spawns
    pub interval: u32,
    /// Spawn annulus around the player, in pixels
    pub min_radius: f32,
    pub max_radius: f32,
    /// Enemies spawned per level before the spawner runs dry (0 = unlimited)
    pub budget: u32,
    /// Probability that a spawned enemy is ranged
    pub ranged_chance: f64,
}

impl Default for SpawnerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_enemies: 5,
            interval: 180,
            min_radius: 120.0,
            max_radius: 200.0,
            budget: 12,
            ranged_chance: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Fraction divisor of the remaining distance covered per tick
    pub smoothing: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self { smoothing: 30.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub images: PathBuf,
    /// Directory of `<n>.json` level files
    pub levels: PathBuf,
    pub first_level: u32,
}

impl PathSettings {
    pub fn level_file(&self, index: u32) -> PathBuf {
        self.levels.join(format!("{index}.json"))
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            images: PathBuf::from("data/images"),
            levels: PathBuf::from("data/levels"),
            first_level: 0,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub display: DisplaySettings,
    pub physics: PhysicsSettings,
    pub player: PlayerStats,
    pub enemy: EnemyStats,
    pub spawner: SpawnerSettings,
    pub camera: CameraSettings,
    pub paths: PathSettings,
}

impl GameSettings {
    /// Read settings from `path`, falling back to defaults when it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let settings = match fs::read_to_string(path) {
            Ok(text) => {
                let settings: Self = serde_json::from_str(&text)?;
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => return Err(err.into()),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: &str| Err(SettingsError::Invalid(msg.to_string()));

        if self.display.width == 0 || self.display.height == 0 {
            return invalid("display size must be non-zero");
        }
        if self.display.tick_rate == 0 {
            return invalid("tick rate must be non-zero");
        }
        if self.physics.tile_size == 0 {
            return invalid("tile size must be non-zero");
        }
        if self.camera.smoothing < 1.0 {
            return invalid("camera smoothing must be at least 1");
        }
        if self.spawner.min_radius > self.spawner.max_radius {
            return invalid("spawner min radius exceeds max radius");
        }
        if !(0.0..=1.0).contains(&self.spawner.ranged_chance) {
            return invalid("ranged chance must be between 0 and 1");
        }
        if self.player.attack.trail_length == 0 {
            return invalid("attack trail length must be non-zero");
        }
        if self.player.width <= 0.0 || self.player.height <= 0.0 {
            return invalid("player size must be positive");
        }
        if self.enemy.width <= 0.0 || self.enemy.height <= 0.0 {
            return invalid("enemy size must be positive");
        }
        // Collision queries only look at the 3x3 cells around a body's corner
        if self.largest_body() > self.physics.tile_size as f32 {
            return invalid("entity bodies must fit within one tile");
        }
        Ok(())
    }

    /// Longest side of any entity body, in pixels
    pub fn largest_body(&self) -> f32 {
        self.player
            .width
            .max(self.player.height)
            .max(self.enemy.width)
            .max(self.enemy.height)
    }
}
