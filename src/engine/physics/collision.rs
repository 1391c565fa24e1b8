// Per-frame contact flags and single-axis AABB resolution

use crate::core::Rect;

/// Which sides of a body touched solid geometry during the last update.
///
/// Reset at the start of every update, so these never carry history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionFlags {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Touching a wall on either side
    pub fn side(&self) -> bool {
        self.left || self.right
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Axis being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Push `rect` out of every overlapping solid along one axis.
///
/// The edge facing the motion is clamped to the obstacle's near edge. With no
/// motion on this axis an overlap is left as-is.
pub fn resolve_axis(rect: &mut Rect, delta: f32, solids: &[Rect], axis: Axis, flags: &mut CollisionFlags) {
    for solid in solids {
        if !rect.intersects(solid) {
            continue;
        }
        match axis {
            Axis::Horizontal if delta > 0.0 => {
                rect.set_right(solid.left());
                flags.right = true;
            }
            Axis::Horizontal if delta < 0.0 => {
                rect.set_left(solid.right());
                flags.left = true;
            }
            Axis::Vertical if delta > 0.0 => {
                rect.set_bottom(solid.top());
                flags.down = true;
            }
            Axis::Vertical if delta < 0.0 => {
                rect.set_top(solid.bottom());
                flags.up = true;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_default_clear() {
        let mut flags = CollisionFlags {
            up: true,
            right: true,
            ..Default::default()
        };
        assert!(flags.any());
        assert!(flags.side());
        flags.clear();
        assert!(!flags.any());
    }

    #[test]
    fn test_resolve_moving_right() {
        let mut rect = Rect::new(10.0, 0.0, 8.0, 8.0);
        let wall = [Rect::new(16.0, 0.0, 16.0, 16.0)];
        let mut flags = CollisionFlags::default();

        resolve_axis(&mut rect, 2.0, &wall, Axis::Horizontal, &mut flags);
        assert_eq!(rect.right(), 16.0);
        assert!(flags.right && !flags.left);
    }

    #[test]
    fn test_resolve_moving_up() {
        let mut rect = Rect::new(0.0, 14.0, 8.0, 8.0);
        let ceiling = [Rect::new(0.0, 0.0, 16.0, 16.0)];
        let mut flags = CollisionFlags::default();

        resolve_axis(&mut rect, -1.0, &ceiling, Axis::Vertical, &mut flags);
        assert_eq!(rect.top(), 16.0);
        assert!(flags.up);
    }

    #[test]
    fn test_no_motion_no_clamp() {
        let mut rect = Rect::new(4.0, 4.0, 8.0, 8.0);
        let solid = [Rect::new(0.0, 0.0, 16.0, 16.0)];
        let mut flags = CollisionFlags::default();

        resolve_axis(&mut rect, 0.0, &solid, Axis::Horizontal, &mut flags);
        assert_eq!(rect.position().x, 4.0);
        assert!(!flags.any());
    }
}
