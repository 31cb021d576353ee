//! End-to-end scenarios through the public `Game` API, rendered headless

use glam::Vec2;

use museum_walk::persistence::SaveState;
use museum_walk::progress::{QuizOutcome, QuizResult, record_quiz_result};
use museum_walk::renderer::RecordingSurface;
use museum_walk::score::ScoreKind;
use museum_walk::sim::{GameEvent, Interactable, MapDef, MapId, Maps, QuizId, Rect, WallFrame};
use museum_walk::{Game, GameCallbacks, GameError, LoopState, Tuning};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Counts what the UI would have been asked to do
#[derive(Default)]
struct Ui {
    flipbooks: Vec<String>,
    quizzes: Vec<QuizId>,
    frames: Vec<(String, String, Option<String>)>,
    pauses: Vec<bool>,
    steps: u32,
    interacts: u32,
    doors: u32,
}

impl GameCallbacks for Ui {
    fn request_flipbook(&mut self, flipbook_id: &str, _title: &str) {
        self.flipbooks.push(flipbook_id.to_string());
    }

    fn request_quiz(&mut self, quiz_id: QuizId, _title: &str) {
        self.quizzes.push(quiz_id);
    }

    fn request_frame(&mut self, frame_id: &str, title: &str, image: Option<&str>) {
        self.frames
            .push((frame_id.to_string(), title.to_string(), image.map(str::to_string)));
    }

    fn toggle_pause(&mut self, paused: bool) {
        self.pauses.push(paused);
    }

    fn sfx_move_step(&mut self) {
        self.steps += 1;
    }

    fn sfx_interact(&mut self) {
        self.interacts += 1;
    }

    fn sfx_door(&mut self) {
        self.doors += 1;
    }
}

struct Harness {
    game: Game<RecordingSurface>,
    ui: Ui,
    clock: f64,
}

impl Harness {
    fn new(game: Game<RecordingSurface>) -> Self {
        let mut h = Self {
            game,
            ui: Ui::default(),
            clock: 0.0,
        };
        h.game.start();
        h.game.frame(0.0);
        h
    }

    fn at_entrance() -> Self {
        Self::new(Game::new(
            RecordingSurface::new(),
            MapId::One,
            Vec2::new(140.0, 360.0),
            Tuning::default(),
            3,
        ))
    }

    /// One frame exactly one fixed step long
    fn step(&mut self) {
        self.clock += FRAME_MS;
        self.game.frame_and_dispatch(self.clock, &mut self.ui);
    }
}

#[test]
fn walking_right_for_one_tick() {
    let mut h = Harness::at_entrance();
    h.game.key_down("ArrowRight");
    h.step();
    let s = h.game.get_state();
    assert!((s.px - 144.0).abs() < 1e-3);
    assert_eq!(s.py, 360.0);
    assert_eq!(h.ui.steps, 1);
}

#[test]
fn advancing_from_map_one() {
    let mut h = Harness::at_entrance();
    assert!(h.game.advance_map());
    let s = h.game.get_state();
    assert_eq!(s.map_id, MapId::Two);
    let entry = h.game.maps().get(MapId::Two).entry;
    assert_eq!((s.px, s.py), (entry.x, entry.y));
    assert!(h.game.session().confetti.active_count() > 0);

    // Burst is drawn on the next frame
    h.step();
    assert!(h.game.surface().count(|c| matches!(c, museum_walk::renderer::DrawCmd::Rotate(_))) > 0);
}

#[test]
fn advance_is_bounded_and_retreat_inverts_it() {
    let mut h = Harness::at_entrance();
    assert!(!h.game.retreat_map());
    assert!(h.game.advance_map());
    assert!(h.game.advance_map());
    assert!(!h.game.advance_map());
    assert_eq!(h.game.get_state().map_id, MapId::Three);

    assert!(h.game.retreat_map());
    assert_eq!(h.game.get_state().map_id, MapId::Two);
    assert!(h.game.advance_map());
    assert_eq!(h.game.get_state().map_id, MapId::Three);
}

#[test]
fn escape_toggles_pause_with_one_callback_each() {
    let mut h = Harness::at_entrance();
    // Stand at the hall 1 door so E would open the quiz
    h.game.set_state(1, 2140.0, 360.0).unwrap();

    h.game.key_down("Escape");
    h.game.key_down("KeyE");
    h.step();
    assert!(h.game.is_hard_paused());
    assert_eq!(h.ui.pauses, vec![true]);
    assert!(h.ui.quizzes.is_empty());
    assert_eq!(h.ui.doors, 0);

    h.game.key_up("Escape");
    h.game.key_up("KeyE");
    h.game.key_down("Escape");
    h.step();
    assert!(!h.game.is_hard_paused());
    assert_eq!(h.ui.pauses, vec![true, false]);
    assert!(h.ui.quizzes.is_empty());

    // Now E works
    h.game.key_up("Escape");
    h.game.key_down("KeyE");
    h.step();
    assert_eq!(h.ui.quizzes, vec![QuizId::Map1]);
    assert_eq!(h.ui.doors, 1);
}

#[test]
fn frame_interactable_in_range_is_requested() {
    let frame = WallFrame {
        id: "f-test".to_string(),
        rect: Rect::new(100.0, 100.0, 50.0, 50.0),
        title: "Test frame".to_string(),
        image: Some("/assets/test.jpg".to_string()),
    };
    let one = MapDef::blank(MapId::One, "Test hall").with_interactable(Interactable::frame(&frame));
    let maps = Maps::new(
        one,
        MapDef::blank(MapId::Two, "2"),
        MapDef::blank(MapId::Three, "3"),
    );
    // y is clamped to the floor (130); the probe still reaches the frame
    let game = Game::with_maps(
        RecordingSurface::new(),
        maps,
        MapId::One,
        Vec2::new(125.0, 130.0),
        Tuning::default(),
        3,
    );
    let mut h = Harness::new(game);

    h.game.key_down("KeyE");
    h.step();
    assert_eq!(h.game.session().nearest, Some(0));
    assert_eq!(
        h.ui.frames,
        vec![(
            "f-test".to_string(),
            "Test frame".to_string(),
            Some("/assets/test.jpg".to_string())
        )]
    );
    assert_eq!(h.ui.interacts, 1);
    assert!(h.ui.quizzes.is_empty() && h.ui.flipbooks.is_empty());
}

#[test]
fn exhibit_opens_its_flipbook() {
    let mut h = Harness::at_entrance();
    // Just below the m1-e1 pedestal (x 410..570, bottom 250)
    h.game.set_state(1, 490.0, 268.0).unwrap();
    h.game.key_down("KeyE");
    h.step();
    assert_eq!(h.ui.flipbooks, vec!["m1-trung-tam-quyen-luc".to_string()]);
    assert_eq!(h.ui.interacts, 1);
}

#[test]
fn overlay_soft_pause_blocks_interaction() {
    let mut h = Harness::at_entrance();
    h.game.set_state(1, 2140.0, 360.0).unwrap();
    h.game.set_paused(true);
    h.game.key_down("KeyE");
    h.step();
    assert!(h.ui.quizzes.is_empty());
    assert!(h.ui.pauses.is_empty());
}

#[test]
fn hidden_tab_notifies_once() {
    let mut h = Harness::at_entrance();
    h.game.set_page_hidden(true);
    h.game.set_page_hidden(true);
    h.step();
    h.game.set_page_hidden(false);
    h.step();
    assert_eq!(h.ui.pauses, vec![true]);
    assert!(h.game.is_hard_paused());
}

#[test]
fn invalid_set_state_is_rejected() {
    let mut h = Harness::at_entrance();
    assert!(matches!(
        h.game.set_state(0, 10.0, 10.0),
        Err(GameError::InvalidMapId(0))
    ));
    assert_eq!(h.game.get_state().map_id, MapId::One);
}

#[test]
fn whole_run_with_quizzes() {
    let mut h = Harness::at_entrance();
    let mut save = SaveState::new("Tester");

    for (quiz, expected_map) in [(QuizId::Map1, MapId::Two), (QuizId::Map2, MapId::Three)] {
        let result = QuizResult {
            quiz_id: quiz,
            total_time_ms: 10_000,
            attempts: 2,
        };
        let (outcome, report) = record_quiz_result(&mut save, result, "now");
        assert_eq!(outcome, QuizOutcome::Advance);
        assert_eq!(report.is_some(), quiz == QuizId::Map2);
        h.game.advance_map();
        let s = h.game.get_state();
        save.sync_position(s.map_id, s.px, s.py);
        assert_eq!(save.map_id, expected_map);
    }

    let result = QuizResult {
        quiz_id: QuizId::Final,
        total_time_ms: 30_000,
        attempts: 1,
    };
    let (outcome, report) = record_quiz_result(&mut save, result, "later");
    assert_eq!(outcome, QuizOutcome::Celebrate);
    let report = report.unwrap();
    assert_eq!(report.kind, ScoreKind::Final);
    assert_eq!(report.total_time_ms, 50_000);
    assert_eq!(report.attempts, 5);

    let before = h.game.session().confetti.active_count();
    h.game.burst_celebration();
    assert_eq!(h.game.session().confetti.active_count(), before + 140);
    assert_eq!(h.game.get_state().map_id, MapId::Three);

    // The save round-trips through JSON
    let json = serde_json::to_string(&save).unwrap();
    assert_eq!(SaveState::from_json(&json), Some(save));
}

#[test]
fn destroy_is_terminal_and_idempotent() {
    let mut h = Harness::at_entrance();
    h.game.destroy();
    h.game.destroy();
    assert_eq!(h.game.loop_state(), LoopState::Destroyed);
    let frames = h.game.surface().frames;
    h.game.key_down("KeyD");
    h.step();
    assert_eq!(h.game.surface().frames, frames);
    assert_eq!(h.ui.steps, 0);
}

#[test]
fn events_are_collected_by_vec_callbacks() {
    let mut game = Game::new(
        RecordingSurface::new(),
        MapId::One,
        Vec2::new(140.0, 360.0),
        Tuning::default(),
        3,
    );
    game.start();
    game.frame(0.0);
    game.key_down("Escape");
    let mut events: Vec<GameEvent> = Vec::new();
    game.frame_and_dispatch(FRAME_MS, &mut events);
    assert_eq!(events, vec![GameEvent::TogglePause(true)]);
}
