// Horizontal projectiles fired by ranged enemies

use crate::engine::tilemap::SparseTileGrid;
use glam::Vec2;

/// Ticks a projectile survives without hitting anything
pub const MAX_AGE: u32 = 360;

/// Result of moving a projectile one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileFate {
    Flying,
    /// Hit a solid tile and should burst
    HitWall,
    /// Ran out of time
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Centre point, in world pixels
    pub pos: Vec2,
    /// Signed horizontal speed in px/tick
    pub velocity: f32,
    pub age: u32,
    pub damage: i32,
}

impl Projectile {
    pub fn new(pos: Vec2, velocity: f32, damage: i32) -> Self {
        Self {
            pos,
            velocity,
            age: 0,
            damage,
        }
    }

    /// Direction of travel as an angle, for effects that bounce off walls
    pub fn heading(&self) -> f32 {
        if self.velocity < 0.0 {
            std::f32::consts::PI
        } else {
            0.0
        }
    }

    /// Move one tick and check against the level
    pub fn step(&mut self, grid: &SparseTileGrid) -> ProjectileFate {
        self.pos.x += self.velocity;
        self.age += 1;

        if grid.is_solid_at(self.pos) {
            ProjectileFate::HitWall
        } else if self.age > MAX_AGE {
            ProjectileFate::Expired
        } else {
            ProjectileFate::Flying
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_flies_straight() {
        let grid = SparseTileGrid::new(16);
        let mut shot = Projectile::new(Vec2::new(10.0, 5.0), -1.5, 20);
        assert_eq!(shot.step(&grid), ProjectileFate::Flying);
        assert_eq!(shot.pos, Vec2::new(8.5, 5.0));
        assert_eq!(shot.age, 1);
    }

    #[test]
    fn test_hits_solid_tile() {
        let mut grid = SparseTileGrid::new(16);
        grid.place(IVec2::new(1, 0), "stone", 0);
        let mut shot = Projectile::new(Vec2::new(14.0, 8.0), 1.5, 20);
        assert_eq!(shot.step(&grid), ProjectileFate::Flying);
        assert_eq!(shot.step(&grid), ProjectileFate::HitWall);
    }

    #[test]
    fn test_passes_through_decor() {
        let mut grid = SparseTileGrid::new(16);
        grid.place(IVec2::new(1, 0), "decor", 0);
        let mut shot = Projectile::new(Vec2::new(14.0, 8.0), 4.0, 20);
        assert_eq!(shot.step(&grid), ProjectileFate::Flying);
    }

    #[test]
    fn test_expires() {
        let grid = SparseTileGrid::new(16);
        let mut shot = Projectile::new(Vec2::ZERO, 1.0, 20);
        for _ in 0..MAX_AGE {
            assert_eq!(shot.step(&grid), ProjectileFate::Flying);
        }
        assert_eq!(shot.step(&grid), ProjectileFate::Expired);
    }
}
