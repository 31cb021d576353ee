//! Fixed timestep simulation tick

use super::input::{InputState, Key};
use super::map::{InteractKind, Maps};
use super::proximity::{find_nearest, probe_rect};
use super::state::{GameEvent, Session};
use crate::tuning::Tuning;
use glam::Vec2;

/// Advance the session by one fixed step.
///
/// Edge-triggered keys are consumed here, so running several ticks in one
/// frame can't fire the same key press twice.
pub fn tick(session: &mut Session, maps: &Maps, input: &mut InputState, tuning: &Tuning, dt: f32) {
    // Pause toggle swallows the rest of the tick
    if input.take_pressed(Key::Escape) {
        session.toggle_hard_pause();
        return;
    }

    if session.is_paused() {
        return;
    }

    let map = maps.get(session.map_id);

    if session.player.update(dt, input, map, tuning) {
        session.push_event(GameEvent::SfxMoveStep);
    }

    let margin = Vec2::new(tuning.probe_margin_x, tuning.probe_margin_y);
    let probe = probe_rect(session.player.aabb(), margin);
    session.nearest = find_nearest(&probe, session.player.pos, &map.interactables);

    if input.take_pressed(Key::Interact) {
        if let Some(it) = session.nearest.and_then(|i| map.interactable(i)) {
            log::debug!("Interact with {}", it.id);
            let (sfx, request) = match &it.kind {
                InteractKind::Exhibit { flipbook_id } => (
                    GameEvent::SfxInteract,
                    GameEvent::RequestFlipbook {
                        flipbook_id: flipbook_id.clone(),
                        title: it.title.clone(),
                    },
                ),
                InteractKind::Door { quiz_id } | InteractKind::Stage { quiz_id } => (
                    GameEvent::SfxDoor,
                    GameEvent::RequestQuiz {
                        quiz_id: *quiz_id,
                        title: it.title.clone(),
                    },
                ),
                InteractKind::Frame { image } => (
                    GameEvent::SfxInteract,
                    GameEvent::RequestFrame {
                        frame_id: it.id.clone(),
                        title: it.title.clone(),
                        image: image.clone(),
                    },
                ),
            };
            session.push_event(sfx);
            session.push_event(request);
        }
    }

    session.confetti.update(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::sim::map::{Interactable, MapDef, MapId, QuizId, build_maps};

    const DT: f32 = 1.0 / 60.0;

    fn new_session(maps: &Maps, tuning: &Tuning) -> Session {
        Session::new(MapId::One, maps.get(MapId::One).entry, tuning, 42)
    }

    #[test]
    fn test_tick_moves_player() {
        let maps = build_maps();
        let tuning = Tuning::default();
        let mut session = new_session(&maps, &tuning);
        let mut input = InputState::new();
        input.key_down("ArrowRight");

        tick(&mut session, &maps, &mut input, &tuning, DT);
        assert!((session.player.pos.x - 144.0).abs() < 1e-4);
        assert_eq!(session.drain_events(), vec![GameEvent::SfxMoveStep]);
    }

    #[test]
    fn test_escape_toggles_and_blocks_interact() {
        let maps = build_maps();
        let tuning = Tuning::default();
        let mut session = new_session(&maps, &tuning);
        // Stand next to the gate
        session.player.set_spawn(Vec2::new(2140.0, 360.0));
        let mut input = InputState::new();
        input.key_down("Escape");
        input.key_down("KeyE");

        tick(&mut session, &maps, &mut input, &tuning, DT);
        assert!(session.hard_paused);
        assert_eq!(session.drain_events(), vec![GameEvent::TogglePause(true)]);

        // Still paused on the next tick in the same frame: nothing happens
        tick(&mut session, &maps, &mut input, &tuning, DT);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_paused_tick_freezes_player() {
        let maps = build_maps();
        let tuning = Tuning::default();
        let mut session = new_session(&maps, &tuning);
        session.soft_paused = true;
        let mut input = InputState::new();
        input.key_down("KeyD");
        let before = session.player.pos;
        tick(&mut session, &maps, &mut input, &tuning, DT);
        assert_eq!(session.player.pos, before);
    }

    #[test]
    fn test_interact_with_gate_requests_quiz() {
        let maps = build_maps();
        let tuning = Tuning::default();
        let mut session = new_session(&maps, &tuning);
        session.player.set_spawn(Vec2::new(2140.0, 360.0));
        let mut input = InputState::new();
        input.key_down("KeyE");

        tick(&mut session, &maps, &mut input, &tuning, DT);
        assert_eq!(
            session.drain_events(),
            vec![
                GameEvent::SfxDoor,
                GameEvent::RequestQuiz {
                    quiz_id: QuizId::Map1,
                    title: "Door to hall 2".to_string(),
                },
            ]
        );

        // Holding the key does not retrigger
        tick(&mut session, &maps, &mut input, &tuning, DT);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_interact_with_exhibit_requests_flipbook() {
        let map = MapDef::blank(MapId::One, "t").with_exhibit(Interactable::exhibit(
            "ex",
            200.0,
            300.0,
            "Exhibit",
            "fb-1",
        ));
        let maps = Maps::new(map, MapDef::blank(MapId::Two, "2"), MapDef::blank(MapId::Three, "3"));
        let tuning = Tuning::default();
        // Flush against the pedestal's left face (x = 190)
        let mut session = Session::new(MapId::One, Vec2::new(176.0, 350.0), &tuning, 1);
        let mut input = InputState::new();
        input.key_down("KeyE");

        tick(&mut session, &maps, &mut input, &tuning, DT);
        assert_eq!(session.nearest, Some(0));
        let events = session.drain_events();
        assert_eq!(events[0], GameEvent::SfxInteract);
        assert_eq!(
            events[1],
            GameEvent::RequestFlipbook {
                flipbook_id: "fb-1".to_string(),
                title: "Exhibit".to_string(),
            }
        );
    }

    #[test]
    fn test_interact_with_nothing_nearby_is_silent() {
        let maps = build_maps();
        let tuning = Tuning::default();
        let mut session = new_session(&maps, &tuning);
        let mut input = InputState::new();
        input.key_down("KeyE");
        tick(&mut session, &maps, &mut input, &tuning, DT);
        assert_eq!(session.nearest, None);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_only_one_object_triggers_per_press() {
        let map = MapDef::blank(MapId::One, "t")
            .with_interactable(Interactable::door(
                "d1",
                Rect::new(200.0, 340.0, 20.0, 20.0),
                "Near",
                QuizId::Map1,
            ))
            .with_interactable(Interactable::door(
                "d2",
                Rect::new(125.0, 340.0, 20.0, 20.0),
                "Far",
                QuizId::Map2,
            ));
        let maps = Maps::new(map, MapDef::blank(MapId::Two, "2"), MapDef::blank(MapId::Three, "3"));
        let tuning = Tuning::default();
        // Both doors touch the probe; d1's center is 35 away, d2's is 40
        let mut session = Session::new(MapId::One, Vec2::new(175.0, 350.0), &tuning, 1);
        let mut input = InputState::new();
        input.key_down("KeyE");
        tick(&mut session, &maps, &mut input, &tuning, DT);
        assert_eq!(session.nearest, Some(0));
        let events = session.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[1], GameEvent::RequestQuiz { title, .. } if title == "Near"));
    }
}
