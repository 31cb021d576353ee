//! Follow camera

use glam::Vec2;

/// Top-left corner of the visible world region
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    /// Center on `target`, clamped so nothing beyond the map edge shows.
    /// A map smaller than the view pins to 0 on that axis.
    pub fn follow(target: Vec2, view: Vec2, map: Vec2) -> Self {
        let max = (map - view).max(Vec2::ZERO);
        Self {
            offset: (target - view * 0.5).clamp(Vec2::ZERO, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: Vec2 = Vec2::new(2400.0, 720.0);

    #[test]
    fn test_centers_in_the_middle() {
        let cam = Camera::follow(Vec2::new(1200.0, 360.0), Vec2::new(800.0, 400.0), MAP);
        assert_eq!(cam.offset, Vec2::new(800.0, 160.0));
    }

    #[test]
    fn test_clamps_at_edges() {
        let view = Vec2::new(800.0, 400.0);
        let cam = Camera::follow(Vec2::new(10.0, 10.0), view, MAP);
        assert_eq!(cam.offset, Vec2::ZERO);
        let cam = Camera::follow(Vec2::new(2390.0, 710.0), view, MAP);
        assert_eq!(cam.offset, Vec2::new(1600.0, 320.0));
    }

    #[test]
    fn test_small_map_pins_to_zero() {
        let cam = Camera::follow(Vec2::new(1200.0, 360.0), Vec2::new(3000.0, 1000.0), MAP);
        assert_eq!(cam.offset, Vec2::ZERO);
    }
}
