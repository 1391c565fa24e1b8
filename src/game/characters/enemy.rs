// Enemy AI: pursue the player, strike at close range, ranged enemies also shoot

use super::entity::{Behavior, Entity, Facing};
use super::state::CharacterState;
use super::stats::EnemyStats;
use crate::core::math::direction_to;
use crate::engine::physics::{PhysicsBody, PhysicsConfig};
use crate::engine::tilemap::SparseTileGrid;
use glam::Vec2;

/// Horizontal distance from the enemy centre where shots appear
const MUZZLE_OFFSET: f32 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Melee,
    Ranged,
}

/// Something an enemy did this tick that the game loop has to apply
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyAction {
    /// Close-range hit on the player
    Strike { damage: i32 },
    /// Spawn a projectile at `origin` travelling horizontally at `velocity`
    Fire { origin: Vec2, velocity: f32 },
}

/// Unit vector from an enemy towards its target, zero when they coincide
pub fn pursuit_direction(from: Vec2, target: Vec2) -> Vec2 {
    direction_to(from, target)
}

/// Enemy-only state carried between ticks
#[derive(Debug, Clone)]
pub struct EnemyController {
    kind: EnemyKind,
    attack_cooldown: u32,
    fire_cooldown: u32,
}

impl EnemyController {
    pub fn new(kind: EnemyKind) -> Self {
        Self {
            kind,
            attack_cooldown: 0,
            fire_cooldown: 0,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn attack_cooldown(&self) -> u32 {
        self.attack_cooldown
    }

    /// Advance one tick chasing `target` (the player's centre), if any
    pub fn update(
        &mut self,
        body: &mut PhysicsBody,
        facing: &mut Facing,
        grid: &SparseTileGrid,
        target: Option<Vec2>,
        stats: &EnemyStats,
        physics: &PhysicsConfig,
    ) -> (CharacterState, Vec<EnemyAction>) {
        let mut actions = Vec::new();

        let direction = target.map_or(Vec2::ZERO, |target| pursuit_direction(body.center(), target));
        body.update(grid, direction, stats.speed, physics);
        *facing = facing.toward(direction.x);

        if let Some(target) = target {
            let center = body.center();
            let offset = target - center;

            if self.attack_cooldown > 0 {
                self.attack_cooldown -= 1;
            } else if offset.length() <= stats.attack_radius {
                actions.push(EnemyAction::Strike {
                    damage: stats.attack_damage,
                });
                self.attack_cooldown = stats.attack_cooldown;
            }

            if self.kind == EnemyKind::Ranged {
                if self.fire_cooldown > 0 {
                    self.fire_cooldown -= 1;
                } else if offset.y.abs() < stats.fire_alignment && offset.x.abs() < stats.fire_range {
                    let sign = if offset.x < 0.0 { -1.0 } else { 1.0 };
                    actions.push(EnemyAction::Fire {
                        origin: center + Vec2::new(MUZZLE_OFFSET * sign, 0.0),
                        velocity: stats.projectile_speed * sign,
                    });
                    self.fire_cooldown = stats.fire_cooldown;
                }
            }
        }

        let state = if direction.x != 0.0 {
            CharacterState::Running
        } else {
            CharacterState::Idle
        };
        (state, actions)
    }
}

impl Entity {
    /// Run the enemy AI for one tick. Returns nothing for non-enemies.
    pub fn update_enemy(
        &mut self,
        grid: &SparseTileGrid,
        target: Option<Vec2>,
        stats: &EnemyStats,
        physics: &PhysicsConfig,
    ) -> Vec<EnemyAction> {
        let Behavior::Enemy(controller) = &mut self.behavior else {
            return Vec::new();
        };
        let (state, actions) = controller.update(&mut self.body, &mut self.facing, grid, target, stats, physics);
        self.health.tick();
        self.set_state(state);
        actions
    }
}
