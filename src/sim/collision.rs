//! Axis-separated collision against static rectangles
//!
//! Moving X and Y in separate passes lets the player slide along a wall
//! instead of stopping dead on diagonal contact.

use glam::Vec2;

use super::geometry::Rect;

/// Move a box of half-extents `half` centered at `pos` by `delta` along a
/// single axis, stopping flush against the nearest blocking obstacle.
///
/// Only one of `delta.x` / `delta.y` may be non-zero. Returns the new center.
pub fn move_axis(pos: Vec2, half: Vec2, delta: Vec2, obstacles: &[Rect]) -> Vec2 {
    debug_assert!(delta.x == 0.0 || delta.y == 0.0, "move_axis takes one axis at a time");
    if delta == Vec2::ZERO {
        return pos;
    }

    let target = pos + delta;
    let body = Rect::centered(target, half);
    let mut resolved = target;

    // Snap to the closest face among everything we ended up inside
    for o in obstacles.iter().filter(|o| body.overlaps(o)) {
        if delta.x > 0.0 {
            resolved.x = resolved.x.min(o.x - half.x);
        } else if delta.x < 0.0 {
            resolved.x = resolved.x.max(o.right() + half.x);
        } else if delta.y > 0.0 {
            resolved.y = resolved.y.min(o.y - half.y);
        } else {
            resolved.y = resolved.y.max(o.bottom() + half.y);
        }
    }

    resolved
}

/// Apply `delta` X-first, then Y, sliding along obstacles
pub fn slide_move(pos: Vec2, half: Vec2, delta: Vec2, obstacles: &[Rect]) -> Vec2 {
    let pos = move_axis(pos, half, Vec2::new(delta.x, 0.0), obstacles);
    move_axis(pos, half, Vec2::new(0.0, delta.y), obstacles)
}
