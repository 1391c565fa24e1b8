// Hit points with a post-hit invulnerability window

/// Health pool shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
    /// Length of the window opened by a hit
    invulnerability_ticks: u32,
    /// Ticks left in the current window
    invulnerable_for: u32,
}

impl Health {
    pub fn new(max: i32, invulnerability_ticks: u32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            invulnerability_ticks,
            invulnerable_for: 0,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Remaining health in 0.0..=1.0
    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_for > 0
    }

    /// Apply a hit. Returns false (and changes nothing) while invulnerable.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.is_invulnerable() || self.is_dead() {
            return false;
        }
        self.current = (self.current - amount.max(0)).max(0);
        self.invulnerable_for = self.invulnerability_ticks;
        true
    }

    pub fn heal(&mut self, amount: i32) {
        if self.is_dead() {
            return;
        }
        self.current = (self.current + amount.max(0)).min(self.max);
    }

    /// Drop straight to zero, ignoring invulnerability
    pub fn kill(&mut self) {
        self.current = 0;
    }

    /// Count down the invulnerability window
    pub fn tick(&mut self) {
        self.invulnerable_for = self.invulnerable_for.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_opens_window() {
        let mut health = Health::new(100, 3);
        assert!(health.take_damage(30));
        assert_eq!(health.current(), 70);
        assert!(health.is_invulnerable());

        // Window blocks further hits until it runs out
        assert!(!health.take_damage(30));
        assert_eq!(health.current(), 70);
        for _ in 0..3 {
            health.tick();
        }
        assert!(health.take_damage(30));
        assert_eq!(health.current(), 40);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut health = Health::new(10, 0);
        health.take_damage(25);
        assert_eq!(health.current(), 0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut health = Health::new(50, 0);
        health.take_damage(20);
        health.heal(100);
        assert_eq!(health.current(), 50);
    }

    #[test]
    fn test_no_window_means_every_hit_lands() {
        let mut health = Health::new(50, 0);
        assert!(health.take_damage(10));
        assert!(health.take_damage(10));
        assert_eq!(health.current(), 30);
    }

    #[test]
    fn test_kill_ignores_window() {
        let mut health = Health::new(50, 60);
        health.take_damage(1);
        health.kill();
        assert!(health.is_dead());
        assert_eq!(health.fraction(), 0.0);
    }
}
