// Game state: owns every mutable part of a running level and advances it one tick at a time

use super::characters::{aim_angle, EnemyAction, EnemyKind, Entity, EntityId, PlayerIntent};
use super::effects::{burst, fan, LevelTransition, ScreenShake, Spark};
use super::projectile::{Projectile, ProjectileFate};
use super::settings::GameSettings;
use super::spawner::EnemySpawner;
use crate::engine::input::TickInput;
use crate::engine::renderer::Camera;
use crate::engine::tilemap::{LevelLoadError, LoadOutcome, SparseTileGrid};
use glam::{UVec2, Vec2};
use log::{debug, info};
use rand::rngs::StdRng;
use std::f32::consts::PI;

/// Marker tiles placed in level files for spawn points
const SPAWN_MARKER: &str = "spawners";
const PLAYER_MARKER: u32 = 0;
const MELEE_MARKER: u32 = 1;
const RANGED_MARKER: u32 = 2;

/// Ticks between the player's death and the level restarting
pub const RESPAWN_TICKS: u32 = 40;

// Shake magnitudes, in window pixels
const SHAKE_PLAYER_HIT: f32 = 25.0;
const SHAKE_ENEMY_DEATH: f32 = 16.0;
const SHAKE_MELEE_HIT: f32 = 4.0;

const DEATH_SPARKS: usize = 30;
const HIT_SPARKS: usize = 8;
const WALL_SPARKS: usize = 4;

pub struct GameState {
    settings: GameSettings,
    pub grid: SparseTileGrid,
    pub player: Entity,
    pub enemies: Vec<Entity>,
    pub projectiles: Vec<Projectile>,
    pub sparks: Vec<Spark>,
    pub shake: ScreenShake,
    pub camera: Camera,
    pub transition: LevelTransition,
    spawner: EnemySpawner,
    level: u32,
    /// Ticks since the player died, zero while alive
    dead: u32,
    next_id: u32,
    /// Window pixels per display pixel
    render_scale: Vec2,
    rng: StdRng,
}

impl GameState {
    pub fn new(settings: GameSettings, rng: StdRng) -> Self {
        let display = settings.display.size();
        let render_scale = settings.display.window_size().as_vec2() / display.max(UVec2::ONE).as_vec2();
        Self {
            grid: SparseTileGrid::new(settings.physics.tile_size),
            player: Entity::player(EntityId(0), Vec2::ZERO, &settings.player),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            sparks: Vec::new(),
            shake: ScreenShake::default(),
            camera: Camera::new(display, settings.camera.smoothing),
            transition: LevelTransition::opening(),
            spawner: EnemySpawner::new(settings.spawner),
            level: settings.paths.first_level,
            dead: 0,
            next_id: 1,
            render_scale,
            rng,
            settings,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_player_dead(&self) -> bool {
        self.dead > 0
    }

    /// Track the window size so pointer positions map onto the display
    pub fn set_window_size(&mut self, window: UVec2) {
        let display = self.settings.display.size().max(UVec2::ONE).as_vec2();
        self.render_scale = window.max(UVec2::ONE).as_vec2() / display;
    }

    /// Sample this frame's screen-shake jitter
    pub fn shake_offset(&mut self) -> Vec2 {
        self.shake.offset(&mut self.rng)
    }

    /// Replace the world with level `index`. A missing file gives an empty level.
    pub fn load_level(&mut self, index: u32) -> Result<LoadOutcome, LevelLoadError> {
        let path = self.settings.paths.level_file(index);
        let mut grid = SparseTileGrid::new(self.settings.physics.tile_size);
        let outcome = grid.load(&path)?;
        let body = self.settings.largest_body();
        if (grid.tile_size() as f32) < body {
            return Err(LevelLoadError::TileSmallerThanBody {
                tile_size: grid.tile_size(),
                body,
            });
        }
        if outcome == LoadOutcome::Missing {
            info!("Starting level {index} empty");
        }

        self.grid = grid;
        self.level = index;
        self.populate();
        info!(
            "Level {index} ready: {} tiles, {} enemies",
            self.grid.tile_count(),
            self.enemies.len()
        );
        Ok(outcome)
    }

    /// Reset per-level state and place entities at the level's spawn markers
    fn populate(&mut self) {
        let markers = self.grid.extract(
            &[
                (SPAWN_MARKER, PLAYER_MARKER),
                (SPAWN_MARKER, MELEE_MARKER),
                (SPAWN_MARKER, RANGED_MARKER),
            ],
            false,
        );

        self.enemies.clear();
        self.projectiles.clear();
        self.sparks.clear();
        self.shake = ScreenShake::default();
        self.transition = LevelTransition::opening();
        self.spawner.reset();
        self.dead = 0;
        self.next_id = 1;
        self.player = Entity::player(EntityId(0), Vec2::ZERO, &self.settings.player);

        for marker in markers {
            match marker.variant {
                PLAYER_MARKER => self.player.body.set_position(marker.pos),
                MELEE_MARKER => self.spawn_enemy(EnemyKind::Melee, marker.pos),
                _ => self.spawn_enemy(EnemyKind::Ranged, marker.pos),
            }
        }

        self.camera.snap_to(self.player.center());
    }

    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Vec2) {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.enemies.push(Entity::enemy(id, kind, position, &self.settings.enemy));
    }

    /// Advance the world one tick.
    ///
    /// Only fails when a level change hits a malformed level file.
    pub fn tick(&mut self, input: &TickInput) -> Result<(), LevelLoadError> {
        self.shake.decay();
        self.camera.follow(self.player.center());

        self.update_player(input);
        self.update_projectiles();
        self.update_enemies();
        self.sparks.retain_mut(Spark::update);

        self.update_progress()
    }

    fn update_player(&mut self, input: &TickInput) {
        if self.dead > 0 {
            return;
        }

        let physics = self.settings.physics.config();
        let aim = input.attack.map(|pointer| {
            let target = self.camera.screen_to_world(pointer / self.render_scale);
            aim_angle(self.player.center(), target)
        });
        let intent = PlayerIntent {
            movement: input.movement,
            jump: input.jump,
            dash: input.dash,
            aim,
        };
        self.player.update_player(&self.grid, &intent, &self.settings.player, &physics);

        let player_rect = self.player.rect();
        let stats = &self.settings.player;
        let Some(controller) = self.player.as_player_mut() else {
            return;
        };
        let dashing = controller.is_dashing(stats);

        for enemy in &mut self.enemies {
            let enemy_rect = enemy.rect();
            if dashing && player_rect.intersects(&enemy_rect) {
                enemy.health.kill();
                continue;
            }
            if controller.attack.try_hit(enemy.id, &enemy_rect) && enemy.health.take_damage(stats.attack.damage) {
                self.sparks.extend(burst(&mut self.rng, enemy.center(), HIT_SPARKS));
                self.shake.add(SHAKE_MELEE_HIT);
            }
        }
    }

    fn update_projectiles(&mut self) {
        let player_rect = self.player.rect();
        let dashing = self
            .player
            .as_player()
            .is_some_and(|controller| controller.is_dashing(&self.settings.player));
        let vulnerable = self.dead == 0 && !dashing;

        let grid = &self.grid;
        let sparks = &mut self.sparks;
        let rng = &mut self.rng;
        let mut hits = Vec::new();

        self.projectiles.retain_mut(|shot| match shot.step(grid) {
            ProjectileFate::HitWall => {
                sparks.extend(fan(rng, shot.pos, shot.heading() + PI, WALL_SPARKS));
                false
            }
            ProjectileFate::Expired => false,
            ProjectileFate::Flying if vulnerable && player_rect.contains_point(shot.pos) => {
                hits.push(shot.damage);
                false
            }
            ProjectileFate::Flying => true,
        });

        for damage in hits {
            if self.player.health.take_damage(damage) {
                self.shake.add(SHAKE_PLAYER_HIT);
                self.sparks.extend(burst(&mut self.rng, self.player.center(), DEATH_SPARKS));
            }
        }
    }

    fn update_enemies(&mut self) {
        let physics = self.settings.physics.config();
        let target = (self.dead == 0).then(|| self.player.center());

        if let Some(center) = target {
            let body = Vec2::new(self.settings.enemy.width, self.settings.enemy.height);
            if let Some(request) = self
                .spawner
                .update(self.enemies.len(), center, body, &self.grid, &mut self.rng)
            {
                self.spawn_enemy(request.kind, request.position);
            }
        }

        let mut strikes = Vec::new();
        for enemy in self.enemies.iter_mut().filter(|enemy| !enemy.is_dead()) {
            for action in enemy.update_enemy(&self.grid, target, &self.settings.enemy, &physics) {
                match action {
                    EnemyAction::Strike { damage } => strikes.push(damage),
                    EnemyAction::Fire { origin, velocity } => self.projectiles.push(Projectile::new(
                        origin,
                        velocity,
                        self.settings.enemy.projectile_damage,
                    )),
                }
            }
        }

        for damage in strikes {
            if self.dead == 0 && self.player.health.take_damage(damage) {
                self.shake.add(SHAKE_MELEE_HIT);
            }
        }

        let before = self.enemies.len();
        for enemy in self.enemies.iter().filter(|enemy| enemy.is_dead()) {
            self.sparks.extend(burst(&mut self.rng, enemy.center(), DEATH_SPARKS));
            self.shake.add(SHAKE_ENEMY_DEATH);
        }
        self.enemies.retain(|enemy| !enemy.is_dead());
        if self.enemies.len() < before {
            debug!("Culled {} enemies, {} left", before - self.enemies.len(), self.enemies.len());
        }
    }

    /// Death countdown and level progression
    fn update_progress(&mut self) -> Result<(), LevelLoadError> {
        if self.dead == 0 && self.player.is_dead() {
            self.dead = 1;
            info!("Player died on level {}", self.level);
            self.sparks.extend(burst(&mut self.rng, self.player.center(), DEATH_SPARKS));
        } else if self.dead > 0 {
            self.dead += 1;
            if self.dead >= RESPAWN_TICKS {
                info!("Respawning");
                self.load_level(self.settings.paths.first_level)?;
                return Ok(());
            }
        }

        let cleared = self.dead == 0 && self.enemies.is_empty() && self.spawner.is_exhausted();
        if self.transition.tick(cleared) {
            let next = self.next_level();
            info!("Level {} cleared, moving to level {next}", self.level);
            self.load_level(next)?;
        }
        Ok(())
    }

    /// The level after the current one, wrapping to the first when it does not exist
    fn next_level(&self) -> u32 {
        let candidate = self.level + 1;
        if self.settings.paths.level_file(candidate).exists() {
            candidate
        } else {
            self.settings.paths.first_level
        }
    }
}
