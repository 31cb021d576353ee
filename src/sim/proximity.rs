//! Nearest-interactable lookup
//!
//! The probe is the player's box grown by the tuning margins. Among the
//! interactables it touches, the one whose center is closest to the player
//! wins; on a tie the earlier entry in the list wins.

use glam::Vec2;

use super::geometry::Rect;
use super::map::Interactable;

/// Player box grown by `margin` on each side
pub fn probe_rect(player_box: Rect, margin: Vec2) -> Rect {
    player_box.expanded(margin.x, margin.y)
}

/// Index of the nearest interactable touching `probe`, if any
pub fn find_nearest(probe: &Rect, player_pos: Vec2, interactables: &[Interactable]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, it) in interactables.iter().enumerate() {
        if !probe.intersects(&it.rect) {
            continue;
        }
        let d = it.rect.center().distance_squared(player_pos);
        // Strictly closer only, so the first of equals is kept
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::map::{InteractKind, Interactable, WallFrame};

    fn frame_at(id: &str, rect: Rect) -> Interactable {
        Interactable::frame(&WallFrame {
            id: id.to_string(),
            rect,
            title: id.to_string(),
            image: None,
        })
    }

    fn probe_for(pos: Vec2) -> Rect {
        probe_rect(Rect::centered(pos, Vec2::new(14.0, 18.0)), Vec2::new(18.0, 12.0))
    }

    #[test]
    fn test_none_in_range() {
        let list = vec![frame_at("far", Rect::new(1000.0, 1000.0, 50.0, 50.0))];
        assert_eq!(find_nearest(&probe_for(Vec2::new(100.0, 100.0)), Vec2::new(100.0, 100.0), &list), None);
        assert_eq!(find_nearest(&probe_for(Vec2::ZERO), Vec2::ZERO, &[]), None);
    }

    #[test]
    fn test_closest_center_wins() {
        let pos = Vec2::new(200.0, 200.0);
        let list = vec![
            frame_at("a", Rect::new(230.0, 150.0, 100.0, 100.0)), // center 280,200
            frame_at("b", Rect::new(150.0, 230.0, 60.0, 20.0)),   // center 180,240
        ];
        assert_eq!(find_nearest(&probe_for(pos), pos, &list), Some(1));
    }

    #[test]
    fn test_tie_goes_to_first_inserted() {
        let pos = Vec2::new(200.0, 200.0);
        let list = vec![
            frame_at("left", Rect::new(150.0, 190.0, 20.0, 20.0)),  // center 160,200
            frame_at("right", Rect::new(230.0, 190.0, 20.0, 20.0)), // center 240,200
        ];
        assert_eq!(find_nearest(&probe_for(pos), pos, &list), Some(0));

        let swapped = vec![list[1].clone(), list[0].clone()];
        let idx = find_nearest(&probe_for(pos), pos, &swapped).unwrap();
        assert_eq!(swapped[idx].id, "right");
    }

    #[test]
    fn test_probe_edge_contact_counts() {
        // Player box right edge at 114, probe right edge at 132
        let pos = Vec2::new(100.0, 100.0);
        let list = vec![frame_at("edge", Rect::new(132.0, 80.0, 40.0, 40.0))];
        assert_eq!(find_nearest(&probe_for(pos), pos, &list), Some(0));
        assert!(matches!(list[0].kind, InteractKind::Frame { .. }));

        let list = vec![frame_at("gap", Rect::new(132.5, 80.0, 40.0, 40.0))];
        assert_eq!(find_nearest(&probe_for(pos), pos, &list), None);
    }
}
