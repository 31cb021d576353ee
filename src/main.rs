//! Museum Walk entry point
//!
//! The browser build is driven from JavaScript through `MuseumGame`; this
//! binary runs a short scripted headless walk so the simulation can be
//! exercised natively.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Museum Walk (native) starting...");
    log::info!("The playable build is the wasm module; running a headless demo walk");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `bindings::init`, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use museum_walk::persistence::SaveState;
    use museum_walk::progress::{QuizResult, record_quiz_result};
    use museum_walk::renderer::RecordingSurface;
    use museum_walk::sim::{GameEvent, MapId, QuizId};
    use museum_walk::{Game, Settings, Tuning, score};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Run `frames` frames, logging every event
    fn run_frames(game: &mut Game<RecordingSurface>, clock: &mut f64, frames: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            *clock += FRAME_MS;
            game.frame_and_dispatch(*clock, &mut events);
        }
        for event in &events {
            if *event != GameEvent::SfxMoveStep {
                log::info!("event: {event:?}");
            }
        }
        events
    }

    pub fn run() {
        let settings = Settings::load();
        let mut game = Game::new(
            RecordingSurface::new(),
            MapId::One,
            Vec2::new(140.0, 360.0),
            Tuning::default(),
            0x5eed,
        );
        game.set_reduced_motion(settings.reduced_motion);
        game.set_viewport(1280.0, 720.0, 1.0);
        game.start();

        let mut clock = 0.0;
        game.frame(clock);

        // Walk right along the carpet to the first gate
        game.key_down("KeyD");
        let events = run_frames(&mut game, &mut clock, 520);
        let steps = events.iter().filter(|e| **e == GameEvent::SfxMoveStep).count();
        game.key_up("KeyD");
        let state = game.get_state();
        log::info!("Walked to ({:.1}, {:.1}) with {steps} footsteps", state.px, state.py);

        // Open the gate
        game.key_down("KeyE");
        run_frames(&mut game, &mut clock, 1);
        game.key_up("KeyE");

        // Pretend the quiz was passed
        let mut save = SaveState::new("demo");
        let result = QuizResult {
            quiz_id: QuizId::Map1,
            total_time_ms: 42_000,
            attempts: 3,
        };
        let (outcome, report) = record_quiz_result(&mut save, result, "1970-01-01T00:00:00.000Z");
        log::info!("Quiz outcome: {outcome:?}");
        game.advance_map();
        if let Some(report) = report {
            score::relay(None, report);
        }

        run_frames(&mut game, &mut clock, 90);
        let state = game.get_state();
        save.sync_position(state.map_id, state.px, state.py);
        log::info!(
            "Now on map {} at ({:.1}, {:.1}), {} confetti still flying, {} draw calls last frame",
            u8::from(state.map_id),
            state.px,
            state.py,
            game.session().confetti.active_count(),
            game.surface().commands.len()
        );

        game.destroy();
        log::info!("Demo finished after {} frames", game.surface().frames);
    }
}
