// Directional melee swings with a short trail of recent hitboxes

use super::entity::EntityId;
use super::stats::AttackStats;
use crate::core::Rect;
use glam::Vec2;
use std::collections::{HashSet, VecDeque};
use std::f32::consts::FRAC_PI_2;
use std::f32::consts::FRAC_PI_4;

/// Angle from the attacker's centre to a world-space pointer
pub fn aim_angle(center: Vec2, pointer: Vec2) -> f32 {
    let delta = pointer - center;
    delta.y.atan2(delta.x)
}

/// Where a swing is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackPhase {
    #[default]
    Idle,
    /// Swinging; `frame` counts ticks since the swing started
    Attacking { frame: u32 },
    /// Recovering before the next swing is allowed
    Cooldown { remaining: u32 },
}

/// One tick of a swing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackSnapshot {
    pub hitbox: Rect,
    pub angle: f32,
    pub frame: u32,
}

/// Melee attack state for one attacker
#[derive(Debug, Clone, Default)]
pub struct AttackState {
    phase: AttackPhase,
    /// Angle of the pointer when the swing started
    aim: f32,
    /// Most recent hitboxes, oldest at the front
    trail: VecDeque<AttackSnapshot>,
    /// Entities already damaged by the current swing
    hit: HashSet<EntityId>,
}

impl AttackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self.phase, AttackPhase::Attacking { .. })
    }

    pub fn trail(&self) -> impl Iterator<Item = &AttackSnapshot> {
        self.trail.iter()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Start a swing towards `aim`. No-op while swinging or cooling down.
    pub fn attack(&mut self, aim: f32) -> bool {
        if self.phase != AttackPhase::Idle {
            return false;
        }
        self.phase = AttackPhase::Attacking { frame: 0 };
        self.aim = aim;
        self.trail.clear();
        self.hit.clear();
        true
    }

    /// Swept angle for a given frame: a quarter turn centred on the aim
    fn swing_angle(&self, frame: u32, duration: u32) -> f32 {
        let progress = frame as f32 / duration.max(1) as f32;
        self.aim - FRAC_PI_4 + FRAC_PI_2 * progress
    }

    /// Advance one tick around an attacker centred at `center`.
    ///
    /// Hitboxes stay live for the tick that pushed them, so the final frame
    /// of a swing can still land. The tick after the swing ends drops them.
    pub fn update(&mut self, center: Vec2, stats: &AttackStats) {
        if !self.is_attacking() {
            self.trail.clear();
        }
        match self.phase {
            AttackPhase::Idle => {}
            AttackPhase::Attacking { frame } => {
                let angle = self.swing_angle(frame, stats.duration);
                let hitbox_center = center + Vec2::from_angle(angle) * stats.radius;
                self.trail.push_back(AttackSnapshot {
                    hitbox: Rect::from_center(hitbox_center, Vec2::splat(stats.hitbox_size)),
                    angle,
                    frame,
                });
                while self.trail.len() > stats.trail_length {
                    self.trail.pop_front();
                }

                let next = frame + 1;
                self.phase = if next < stats.duration {
                    AttackPhase::Attacking { frame: next }
                } else if stats.cooldown > 0 {
                    AttackPhase::Cooldown {
                        remaining: stats.cooldown,
                    }
                } else {
                    AttackPhase::Idle
                };
            }
            AttackPhase::Cooldown { remaining } => {
                self.phase = if remaining > 1 {
                    AttackPhase::Cooldown {
                        remaining: remaining - 1,
                    }
                } else {
                    AttackPhase::Idle
                };
            }
        }
    }

    /// Record a hit on `target` if any live hitbox overlaps `rect`.
    /// Each target is hit at most once per swing.
    pub fn try_hit(&mut self, target: EntityId, rect: &Rect) -> bool {
        if self.trail.is_empty() || self.hit.contains(&target) {
            return false;
        }
        if self.trail.iter().any(|snapshot| snapshot.hitbox.intersects(rect)) {
            self.hit.insert(target);
            return true;
        }
        false
    }
}
