// Scrolling camera for the 2D display surface

use glam::{IVec2, UVec2, Vec2};

/// Side-scrolling camera.
///
/// `scroll` is the world position of the display's top-left corner. Each
/// tick it moves a fixed fraction of the remaining distance to the position
/// that centres the target, so it eases in and never overshoots.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World position of the top-left corner of the display
    pub scroll: Vec2,
    /// Display size in pixels
    viewport: Vec2,
    /// Divisor applied to the remaining distance each tick
    smoothing: f32,
}

impl Camera {
    /// Create a camera for a display of `viewport` pixels. Smoothing below 1
    /// is clamped to 1 (snap to target).
    pub fn new(viewport: UVec2, smoothing: f32) -> Self {
        Self {
            scroll: Vec2::ZERO,
            viewport: viewport.as_vec2(),
            smoothing: smoothing.max(1.0),
        }
    }

    /// The scroll that would centre `target` on screen
    pub fn target_scroll(&self, target: Vec2) -> Vec2 {
        target - self.viewport / 2.0
    }

    /// Move one tick towards centring `target`
    pub fn follow(&mut self, target: Vec2) {
        let remaining = self.target_scroll(target) - self.scroll;
        self.scroll += remaining / self.smoothing;
    }

    /// Jump straight to centring `target`
    pub fn snap_to(&mut self, target: Vec2) {
        self.scroll = self.target_scroll(target);
    }

    /// Integer offset used for drawing (truncated towards zero)
    pub fn render_offset(&self) -> IVec2 {
        self.scroll.as_ivec2()
    }

    /// Convert a display-space position to world space
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        screen_pos + self.scroll
    }

    /// Get the viewport bounds in world coordinates
    pub fn viewport_bounds(&self) -> Viewport {
        Viewport {
            min: self.scroll,
            max: self.scroll + self.viewport,
        }
    }
}

/// Viewport bounds in world coordinates
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    /// Check if a point is inside the viewport
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if a rectangle given by its top-left and size intersects the viewport
    pub fn intersects_rect(&self, pos: Vec2, size: Vec2) -> bool {
        let rect_max = pos + size;

        rect_max.x >= self.min.x
            && pos.x <= self.max.x
            && rect_max.y >= self.min.y
            && pos.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::new(UVec2::new(320, 240), 30.0)
    }

    #[test]
    fn test_follow_moves_fraction_of_distance() {
        let mut cam = camera();
        cam.follow(Vec2::new(460.0, 120.0));
        // target scroll is (300, 0)
        assert_relative_eq!(cam.scroll.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(cam.scroll.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_convergence_monotonic_no_overshoot() {
        let mut cam = camera();
        cam.scroll = Vec2::new(-500.0, 800.0);
        let target = Vec2::new(1234.0, -321.0);
        let goal = cam.target_scroll(target);

        let mut last = (goal - cam.scroll).length();
        for _ in 0..600 {
            cam.follow(target);
            let dist = (goal - cam.scroll).length();
            assert!(dist < last || dist == 0.0);
            // Never crosses the goal on either axis
            assert!(cam.scroll.x <= goal.x);
            assert!(cam.scroll.y >= goal.y);
            last = dist;
        }
        assert!(last < 1.0);
    }

    #[test]
    fn test_render_offset_truncates() {
        let mut cam = camera();
        cam.scroll = Vec2::new(10.9, -3.7);
        assert_eq!(cam.render_offset(), IVec2::new(10, -3));
    }

    #[test]
    fn test_screen_to_world() {
        let mut cam = camera();
        cam.scroll = Vec2::new(40.0, 25.0);
        assert_eq!(cam.screen_to_world(Vec2::new(100.0, 50.0)), Vec2::new(140.0, 75.0));
    }

    #[test]
    fn test_viewport_bounds() {
        let mut cam = camera();
        cam.snap_to(Vec2::new(160.0, 120.0));
        let view = cam.viewport_bounds();
        assert!(view.contains(Vec2::new(1.0, 1.0)));
        assert!(!view.contains(Vec2::new(400.0, 1.0)));
        assert!(view.intersects_rect(Vec2::new(-10.0, -10.0), Vec2::new(16.0, 16.0)));
        assert!(!view.intersects_rect(Vec2::new(-40.0, 0.0), Vec2::new(16.0, 16.0)));
    }

    #[test]
    fn test_smoothing_clamped() {
        let mut cam = Camera::new(UVec2::new(320, 240), 0.0);
        cam.follow(Vec2::new(200.0, 200.0));
        assert_eq!(cam.scroll, Vec2::new(40.0, 80.0));
    }
}
