// Player controller: walking, double jump, wall slide/jump, dash and melee

use super::combat::AttackState;
use super::entity::{Behavior, Entity, Facing};
use super::state::CharacterState;
use super::stats::PlayerStats;
use crate::core::math::approach_zero;
use crate::engine::physics::{PhysicsBody, PhysicsConfig};
use crate::engine::tilemap::SparseTileGrid;
use glam::Vec2;

/// Ticks off the ground before a wall contact counts as a slide
const WALL_SLIDE_AIR_TICKS: u32 = 4;

/// What the player asked for this tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerIntent {
    /// Held directions, +y down. Only the horizontal part moves the player.
    pub movement: Vec2,
    pub jump: bool,
    pub dash: bool,
    /// Aim angle of a requested swing
    pub aim: Option<f32>,
}

/// Player-only state carried between ticks
#[derive(Debug, Clone)]
pub struct PlayerController {
    /// Jumps left before the next landing
    jumps: u32,
    /// Ticks since the last floor contact
    air_ticks: u32,
    wall_sliding: bool,
    /// Signed dash counter: magnitude counts down, sign is the direction
    dash: i32,
    /// Horizontal intent of the previous tick
    last_movement: Vec2,
    pub attack: AttackState,
}

impl PlayerController {
    pub fn new(stats: &PlayerStats) -> Self {
        Self {
            jumps: stats.max_jumps,
            air_ticks: 0,
            wall_sliding: false,
            dash: 0,
            last_movement: Vec2::ZERO,
            attack: AttackState::new(),
        }
    }

    pub fn jumps(&self) -> u32 {
        self.jumps
    }

    pub fn is_wall_sliding(&self) -> bool {
        self.wall_sliding
    }

    /// True during the full-speed part of a dash
    pub fn is_dashing(&self, stats: &PlayerStats) -> bool {
        self.dash.unsigned_abs() > stats.dash_ticks.saturating_sub(stats.dash_active_ticks)
    }

    /// Jump off the ground, a wall or mid-air. Returns false when nothing happened.
    fn jump(&mut self, body: &mut PhysicsBody, facing: Facing, stats: &PlayerStats) -> bool {
        if self.wall_sliding {
            // Only kick off when pushing into the wall being held
            let into_wall = match facing {
                Facing::Left => self.last_movement.x < 0.0,
                Facing::Right => self.last_movement.x > 0.0,
            };
            if !into_wall {
                return false;
            }
            body.velocity.x = -facing.sign() * stats.wall_jump_push;
            body.velocity.y = -stats.wall_jump_lift;
            self.jumps = self.jumps.saturating_sub(1);
            return true;
        }

        if self.jumps == 0 {
            return false;
        }
        body.velocity.y = -stats.jump_velocity;
        self.jumps -= 1;
        true
    }

    /// Start a dash in the facing direction unless one is running
    fn dash(&mut self, facing: Facing, stats: &PlayerStats) -> bool {
        if self.dash != 0 {
            return false;
        }
        self.dash = stats.dash_ticks as i32 * facing.sign() as i32;
        true
    }

    /// Advance one tick and report the resulting state
    pub fn update(
        &mut self,
        body: &mut PhysicsBody,
        facing: &mut Facing,
        grid: &SparseTileGrid,
        intent: &PlayerIntent,
        stats: &PlayerStats,
        physics: &PhysicsConfig,
    ) -> CharacterState {
        if intent.jump {
            self.jump(body, *facing, stats);
        }
        if intent.dash {
            self.dash(*facing, stats);
        }
        if let Some(aim) = intent.aim {
            self.attack.attack(aim);
        }

        let movement = Vec2::new(intent.movement.x, 0.0);
        let collisions = body.update(grid, movement, stats.speed, physics);

        *facing = facing.toward(movement.x);
        if collisions.down {
            self.jumps = stats.max_jumps;
            self.air_ticks = 0;
        } else {
            self.air_ticks = self.air_ticks.saturating_add(1);
        }

        self.wall_sliding = false;
        if collisions.side() && self.air_ticks > WALL_SLIDE_AIR_TICKS && body.velocity.y > 0.0 {
            self.wall_sliding = true;
            body.velocity.y = body.velocity.y.min(stats.wall_slide_speed);
            *facing = if collisions.right { Facing::Right } else { Facing::Left };
        }

        self.dash -= self.dash.signum();
        let recovery = stats.dash_ticks.saturating_sub(stats.dash_active_ticks) as i32;
        if self.dash.abs() > recovery {
            body.velocity.x = self.dash.signum() as f32 * stats.dash_speed;
            if self.dash.abs() == recovery + 1 {
                body.velocity.x *= stats.dash_carry;
            }
        }

        body.velocity.x = approach_zero(body.velocity.x, stats.friction);
        self.last_movement = movement;

        self.attack.update(body.center(), &stats.attack);

        CharacterState::from_motion(self.wall_sliding, body.velocity.y, movement.x != 0.0)
    }
}

impl Entity {
    /// Run the player controller for one tick. No-op for other entities.
    pub fn update_player(
        &mut self,
        grid: &SparseTileGrid,
        intent: &PlayerIntent,
        stats: &PlayerStats,
        physics: &PhysicsConfig,
    ) {
        let Behavior::Player(controller) = &mut self.behavior else {
            return;
        };
        let state = controller.update(&mut self.body, &mut self.facing, grid, intent, stats, physics);
        self.health.tick();
        self.set_state(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::entity::EntityId;
    use crate::game::characters::stats::BASE_PLAYER_STATS;
    use approx::assert_relative_eq;
    use glam::IVec2;

    fn floor() -> SparseTileGrid {
        let mut grid = SparseTileGrid::new(16);
        for x in -4..12 {
            grid.place(IVec2::new(x, 2), "grass", 0);
        }
        grid
    }

    /// Player standing on the floor at y = 32
    fn grounded_player(grid: &SparseTileGrid) -> Entity {
        let mut player = Entity::player(EntityId(0), Vec2::new(40.0, 17.0), &BASE_PLAYER_STATS);
        player.body.velocity.y = 1.0;
        step(&mut player, grid, PlayerIntent::default());
        assert!(player.body.collisions.down);
        player
    }

    fn step(player: &mut Entity, grid: &SparseTileGrid, intent: PlayerIntent) {
        player.update_player(grid, &intent, &BASE_PLAYER_STATS, &PhysicsConfig::default());
    }

    fn controller(player: &Entity) -> &PlayerController {
        player.as_player().unwrap()
    }

    #[test]
    fn test_walk_and_face() {
        let grid = floor();
        let mut player = grounded_player(&grid);
        let start = player.body.position.x;

        step(&mut player, &grid, PlayerIntent { movement: Vec2::new(-1.0, 0.0), ..Default::default() });
        assert_relative_eq!(player.body.position.x, start - 1.0);
        assert_eq!(player.facing, Facing::Left);
        assert_eq!(player.state, CharacterState::Running);
    }

    #[test]
    fn test_vertical_intent_does_not_fly() {
        let grid = floor();
        let mut player = grounded_player(&grid);
        let start = player.body.position;
        step(&mut player, &grid, PlayerIntent { movement: Vec2::new(0.0, -1.0), ..Default::default() });
        assert_eq!(player.body.position, start);
    }

    #[test]
    fn test_double_jump_then_refill() {
        let grid = floor();
        let mut player = grounded_player(&grid);
        let jump = PlayerIntent { jump: true, ..Default::default() };

        step(&mut player, &grid, jump);
        assert_eq!(controller(&player).jumps(), 1);
        assert_eq!(player.state, CharacterState::Jumping);
        step(&mut player, &grid, jump);
        assert_eq!(controller(&player).jumps(), 0);

        // Third press in the air does nothing
        let vy = player.body.velocity.y;
        step(&mut player, &grid, jump);
        assert_relative_eq!(player.body.velocity.y, vy + 0.1, epsilon = 1e-5);

        for _ in 0..200 {
            step(&mut player, &grid, PlayerIntent::default());
        }
        assert_eq!(controller(&player).jumps(), 2);
    }

    /// Player falling beside a wall whose left face is at x = 64, pushing into it
    fn sliding_player() -> (SparseTileGrid, Entity) {
        let mut grid = floor();
        for y in -8..2 {
            grid.place(IVec2::new(4, y), "stone", 0);
        }
        let mut player = Entity::player(EntityId(0), Vec2::new(55.5, -100.0), &BASE_PLAYER_STATS);
        player.body.velocity.y = 3.0;
        for _ in 0..6 {
            step(&mut player, &grid, right());
        }
        (grid, player)
    }

    fn right() -> PlayerIntent {
        PlayerIntent { movement: Vec2::new(1.0, 0.0), ..Default::default() }
    }

    #[test]
    fn test_wall_slide_and_wall_jump() {
        let (grid, mut player) = sliding_player();

        assert!(controller(&player).is_wall_sliding());
        assert_eq!(player.state, CharacterState::WallSliding);
        assert_eq!(player.facing, Facing::Right);
        assert!(player.body.velocity.y <= BASE_PLAYER_STATS.wall_slide_speed);
        assert_eq!(player.rect().right(), 64.0);

        let jumps = controller(&player).jumps();
        step(&mut player, &grid, PlayerIntent { jump: true, ..right() });
        assert!(player.body.velocity.x < 0.0);
        assert!(player.body.velocity.y < 0.0);
        assert_eq!(controller(&player).jumps(), jumps - 1);
    }

    #[test]
    fn test_wall_jump_judges_previous_input() {
        let (grid, mut player) = sliding_player();
        assert!(controller(&player).is_wall_sliding());

        // Letting go on the jump tick still kicks off: the push was held last tick
        step(&mut player, &grid, PlayerIntent { jump: true, ..Default::default() });
        assert!(player.body.velocity.x < 0.0);
    }

    #[test]
    fn test_standing_by_wall_is_not_sliding() {
        let mut grid = floor();
        for y in -8..2 {
            grid.place(IVec2::new(4, y), "stone", 0);
        }
        let mut player = Entity::player(EntityId(0), Vec2::new(55.5, 17.0), &BASE_PLAYER_STATS);
        player.body.velocity.y = 1.0;
        for _ in 0..20 {
            step(&mut player, &grid, right());
            assert!(!controller(&player).is_wall_sliding());
        }
    }

    #[test]
    fn test_dash_burst_then_recovery() {
        let grid = floor();
        let mut player = grounded_player(&grid);
        let stats = BASE_PLAYER_STATS;

        step(&mut player, &grid, PlayerIntent { dash: true, ..Default::default() });
        assert!(controller(&player).is_dashing(&stats));
        assert_relative_eq!(player.body.velocity.x, stats.dash_speed - stats.friction);

        let mut burst_ticks = 1;
        loop {
            step(&mut player, &grid, PlayerIntent::default());
            if !controller(&player).is_dashing(&stats) {
                break;
            }
            burst_ticks += 1;
        }
        assert_eq!(burst_ticks, stats.dash_active_ticks - 1);
        // The burst's last tick keeps only a sliver of speed
        assert!(player.body.velocity.x < 1.0);

        // A new dash waits for the counter to run out
        step(&mut player, &grid, PlayerIntent { dash: true, ..Default::default() });
        assert!(!controller(&player).is_dashing(&stats));
    }

    #[test]
    fn test_friction_both_directions() {
        let grid = floor();
        let mut player = grounded_player(&grid);
        player.body.velocity.x = -0.25;
        step(&mut player, &grid, PlayerIntent::default());
        assert_relative_eq!(player.body.velocity.x, -0.15, epsilon = 1e-5);
        step(&mut player, &grid, PlayerIntent::default());
        step(&mut player, &grid, PlayerIntent::default());
        assert_eq!(player.body.velocity.x, 0.0);
    }

    #[test]
    fn test_attack_uses_aim() {
        let grid = floor();
        let mut player = grounded_player(&grid);
        step(&mut player, &grid, PlayerIntent { aim: Some(0.0), ..Default::default() });
        let attack = &controller(&player).attack;
        assert!(attack.is_attacking());
        assert_eq!(attack.trail_len(), 1);
    }
}
