// Math utilities: axis-aligned rectangles and direction helpers

use glam::Vec2;

/// Axis-aligned rectangle in pixel space, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle from a top-left position and a size vector
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Create a rectangle of the given size centred on a point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Move the rectangle so its right edge sits at `right`
    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    /// Move the rectangle so its left edge sits at `left`
    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    /// Move the rectangle so its bottom edge sits at `bottom`
    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    /// Move the rectangle so its top edge sits at `top`
    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    /// Strict overlap test. Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Unit vector pointing from `from` towards `to`.
///
/// Returns zero when both points coincide so callers never see NaN.
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Normalise a movement intent so diagonal movement is not faster than axial.
///
/// Only applies when both axes are non-zero; axial intents pass through as-is.
/// Non-finite input collapses to zero.
pub fn normalize_intent(intent: Vec2) -> Vec2 {
    if !intent.is_finite() {
        return Vec2::ZERO;
    }
    if intent.x != 0.0 && intent.y != 0.0 {
        intent.normalize_or_zero()
    } else {
        intent
    }
}

/// Move `value` towards zero by `step` without crossing it
pub fn approach_zero(value: f32, step: f32) -> f32 {
    if value > 0.0 {
        (value - step).max(0.0)
    } else if value < 0.0 {
        (value + step).min(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 8.0, 15.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 18.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.bottom(), 35.0);
        assert_eq!(rect.center(), Vec2::new(14.0, 27.5));
    }

    #[test]
    fn test_rect_edge_setters() {
        let mut rect = Rect::new(0.0, 0.0, 8.0, 15.0);
        rect.set_right(80.0);
        assert_eq!(rect.x, 72.0);
        rect.set_bottom(80.0);
        assert_eq!(rect.y, 65.0);
        rect.set_left(96.0);
        rect.set_top(96.0);
        assert_eq!(rect.position(), Vec2::new(96.0, 96.0));
    }

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 16.0, 16.0);
        let b = Rect::new(16.0, 0.0, 16.0, 16.0);
        let c = Rect::new(15.9, 0.0, 16.0, 16.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_contains_point_half_open() {
        let rect = Rect::new(0.0, 0.0, 16.0, 16.0);
        assert!(rect.contains_point(Vec2::ZERO));
        assert!(!rect.contains_point(Vec2::new(16.0, 8.0)));
    }

    #[test]
    fn test_direction_to_same_point_is_zero() {
        let p = Vec2::new(42.0, 17.0);
        assert_eq!(direction_to(p, p), Vec2::ZERO);
    }

    #[test]
    fn test_direction_to_is_unit() {
        let dir = direction_to(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert_relative_eq!(dir.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(dir.x, 0.6, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_intent_diagonal() {
        let n = normalize_intent(Vec2::new(1.0, -1.0));
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_intent_axial_untouched() {
        assert_eq!(normalize_intent(Vec2::new(1.0, 0.0)), Vec2::new(1.0, 0.0));
        assert_eq!(normalize_intent(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_normalize_intent_nan() {
        assert_eq!(normalize_intent(Vec2::new(f32::NAN, 1.0)), Vec2::ZERO);
    }

    #[test]
    fn test_approach_zero() {
        assert_relative_eq!(approach_zero(0.25, 0.1), 0.15, epsilon = 1e-6);
        assert_eq!(approach_zero(0.05, 0.1), 0.0);
        assert_eq!(approach_zero(-0.05, 0.1), 0.0);
        assert_relative_eq!(approach_zero(-1.0, 0.1), -0.9, epsilon = 1e-6);
    }
}
