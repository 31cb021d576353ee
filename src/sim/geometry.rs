//! Axis-aligned rectangles and vector helpers
//!
//! `glam::Vec2` covers the vector side (add/sub/scale/length); the only
//! extra is a normalize that leaves tiny vectors untouched.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Below this length a vector is treated as "no direction"
pub const NORMALIZE_EPSILON: f32 = 1e-8;

/// Penetration shallower than this is contact, not overlap
pub const COLLISION_EPSILON: f32 = 0.01;

/// Normalize `v`, or return it unchanged when its length is below epsilon
#[inline]
pub fn normalize_or_keep(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > NORMALIZE_EPSILON { v / len } else { v }
}

/// Axis-aligned box. `w` and `h` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// Box of half-extents `half` centered on `center`
    pub fn centered(center: Vec2, half: Vec2) -> Self {
        Self::new(center.x - half.x, center.y - half.y, half.x * 2.0, half.y * 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Grow by `mx` left and right and by `my` top and bottom
    pub fn expanded(&self, mx: f32, my: f32) -> Self {
        Self::new(self.x - mx, self.y - my, self.w + mx * 2.0, self.h + my * 2.0)
    }

    /// Closed containment: points on the edge are inside
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// True unless the boxes are fully separated on some axis. Touching edges count.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.x > self.right()
            || other.right() < self.x
            || other.y > self.bottom()
            || other.bottom() < self.y)
    }

    /// Strict overlap: both axes penetrate by more than `COLLISION_EPSILON`
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right().min(other.right()) - self.x.max(other.x) > COLLISION_EPSILON
            && self.bottom().min(other.bottom()) - self.y.max(other.y) > COLLISION_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_size_is_clamped() {
        let r = Rect::new(0.0, 0.0, -5.0, 10.0);
        assert_eq!(r.w, 0.0);
        assert_eq!(r.h, 10.0);
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_separated_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.5, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, -20.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_overlap_requires_penetration_on_both_axes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(9.995, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn test_contains_point_is_closed() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains_point(Vec2::new(10.0, 30.0)));
        assert!(r.contains_point(Vec2::new(20.0, 20.0)));
        assert!(!r.contains_point(Vec2::new(30.1, 20.0)));
    }

    #[test]
    fn test_expanded_and_centered() {
        let r = Rect::centered(Vec2::new(100.0, 50.0), Vec2::new(14.0, 18.0));
        assert_eq!(r, Rect::new(86.0, 32.0, 28.0, 36.0));
        let probe = r.expanded(18.0, 12.0);
        assert_eq!(probe, Rect::new(68.0, 20.0, 64.0, 60.0));
        assert_eq!(probe.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_normalize_or_keep() {
        assert_eq!(normalize_or_keep(Vec2::ZERO), Vec2::ZERO);
        let n = normalize_or_keep(Vec2::new(1.0, 1.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
        let tiny = Vec2::new(1e-9, 0.0);
        assert_eq!(normalize_or_keep(tiny), tiny);
    }
}
