// Character stats - tuning for the player and the enemy roster
// All values are per simulation tick (60 ticks per second) and in display pixels

use serde::{Deserialize, Serialize};

/// Melee swing tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackStats {
    /// Ticks the swing lasts; one hitbox is recorded per tick
    pub duration: u32,
    /// Ticks after a swing before the next one is accepted
    pub cooldown: u32,
    /// Distance from the attacker's centre to each hitbox centre
    pub radius: f32,
    /// Side of the square hitbox
    pub hitbox_size: f32,
    /// Number of recent hitboxes kept in the trail
    pub trail_length: usize,
    pub damage: i32,
}

/// Player tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    // Movement
    /// Horizontal walk speed
    pub speed: f32,
    /// Upward velocity of a jump
    pub jump_velocity: f32,
    /// Jumps available before touching the ground again
    pub max_jumps: u32,
    /// Horizontal velocity lost per tick
    pub friction: f32,

    // Walls
    /// Fall speed cap while sliding down a wall
    pub wall_slide_speed: f32,
    /// Horizontal push away from the wall on a wall jump
    pub wall_jump_push: f32,
    /// Upward velocity of a wall jump
    pub wall_jump_lift: f32,

    // Dash
    /// Total length of a dash including its recovery
    pub dash_ticks: u32,
    /// Leading ticks of the dash spent at full speed
    pub dash_active_ticks: u32,
    pub dash_speed: f32,
    /// Fraction of dash speed kept when the burst ends
    pub dash_carry: f32,

    // Combat
    pub max_health: i32,
    /// Ticks of invulnerability after taking damage
    pub invulnerability_ticks: u32,
    pub attack: AttackStats,

    // Dimensions (physics box)
    pub width: f32,
    pub height: f32,
}

/// Enemy tuning, shared by melee and ranged enemies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyStats {
    /// Pursuit speed
    pub speed: f32,
    pub max_health: i32,

    // Melee
    /// Distance between centres at which a strike lands
    pub attack_radius: f32,
    pub attack_damage: i32,
    pub attack_cooldown: u32,

    // Ranged
    /// Horizontal reach of a shot
    pub fire_range: f32,
    /// Maximum vertical offset to the player for a shot
    pub fire_alignment: f32,
    pub fire_cooldown: u32,
    pub projectile_speed: f32,
    pub projectile_damage: i32,

    // Dimensions (physics box)
    pub width: f32,
    pub height: f32,
}

pub const BASE_ATTACK: AttackStats = AttackStats {
    duration: 10,
    cooldown: 20,
    radius: 14.0,
    hitbox_size: 8.0,
    trail_length: 5,
    damage: 25,
};

/// The player the levels are tuned around
pub const BASE_PLAYER_STATS: PlayerStats = PlayerStats {
    speed: 1.0,
    jump_velocity: 3.0,
    max_jumps: 2,
    friction: 0.1,

    wall_slide_speed: 0.5,
    wall_jump_push: 3.5,
    wall_jump_lift: 2.5,

    dash_ticks: 60,
    dash_active_ticks: 10,
    dash_speed: 8.0,
    dash_carry: 0.1,

    max_health: 100,
    invulnerability_ticks: 60,
    attack: BASE_ATTACK,

    width: 8.0,
    height: 15.0,
};

pub const BASE_ENEMY_STATS: EnemyStats = EnemyStats {
    speed: 0.5,
    max_health: 50,

    attack_radius: 12.0,
    attack_damage: 10,
    attack_cooldown: 60,

    fire_range: 160.0,
    fire_alignment: 16.0,
    fire_cooldown: 90,
    projectile_speed: 1.5,
    projectile_damage: 20,

    width: 8.0,
    height: 15.0,
};

impl Default for AttackStats {
    fn default() -> Self {
        BASE_ATTACK
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_PLAYER_STATS
    }
}

impl Default for EnemyStats {
    fn default() -> Self {
        BASE_ENEMY_STATS
    }
}
