//! Game orchestrator
//!
//! Owns the session, the input state and the drawing surface. The host
//! (browser bindings or the native demo) feeds it key events and frame
//! timestamps and forwards the queued [`GameEvent`]s to [`GameCallbacks`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::renderer::{SceneParams, Surface, Viewport, draw_scene};
use crate::sim::{GameEvent, InputState, Key, MapId, Maps, QuizId, Session, tick};
use crate::tuning::Tuning;

/// Notifications from the game to the UI layer
pub trait GameCallbacks {
    fn request_flipbook(&mut self, flipbook_id: &str, title: &str);
    fn request_quiz(&mut self, quiz_id: QuizId, title: &str);
    fn request_frame(&mut self, frame_id: &str, title: &str, image: Option<&str>);
    fn toggle_pause(&mut self, paused: bool);
    fn sfx_move_step(&mut self) {}
    fn sfx_interact(&mut self) {}
    fn sfx_door(&mut self) {}
}

impl GameEvent {
    pub fn dispatch<C: GameCallbacks + ?Sized>(&self, callbacks: &mut C) {
        match self {
            GameEvent::RequestFlipbook { flipbook_id, title } => {
                callbacks.request_flipbook(flipbook_id, title)
            }
            GameEvent::RequestQuiz { quiz_id, title } => callbacks.request_quiz(*quiz_id, title),
            GameEvent::RequestFrame {
                frame_id,
                title,
                image,
            } => callbacks.request_frame(frame_id, title, image.as_deref()),
            GameEvent::TogglePause(paused) => callbacks.toggle_pause(*paused),
            GameEvent::SfxMoveStep => callbacks.sfx_move_step(),
            GameEvent::SfxInteract => callbacks.sfx_interact(),
            GameEvent::SfxDoor => callbacks.sfx_door(),
        }
    }
}

/// Collects events as-is; handy for tests and logging hosts
impl GameCallbacks for Vec<GameEvent> {
    fn request_flipbook(&mut self, flipbook_id: &str, title: &str) {
        self.push(GameEvent::RequestFlipbook {
            flipbook_id: flipbook_id.to_string(),
            title: title.to_string(),
        });
    }

    fn request_quiz(&mut self, quiz_id: QuizId, title: &str) {
        self.push(GameEvent::RequestQuiz {
            quiz_id,
            title: title.to_string(),
        });
    }

    fn request_frame(&mut self, frame_id: &str, title: &str, image: Option<&str>) {
        self.push(GameEvent::RequestFrame {
            frame_id: frame_id.to_string(),
            title: title.to_string(),
            image: image.map(str::to_string),
        });
    }

    fn toggle_pause(&mut self, paused: bool) {
        self.push(GameEvent::TogglePause(paused));
    }

    fn sfx_move_step(&mut self) {
        self.push(GameEvent::SfxMoveStep);
    }

    fn sfx_interact(&mut self) {
        self.push(GameEvent::SfxInteract);
    }

    fn sfx_door(&mut self) {
        self.push(GameEvent::SfxDoor);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    NotStarted,
    Running,
    /// Terminal
    Destroyed,
}

/// The `{mapId, px, py}` subset shared with the save record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub map_id: MapId,
    pub px: f32,
    pub py: f32,
}

pub struct Game<S: Surface> {
    surface: S,
    maps: Maps,
    tuning: Tuning,
    session: Session,
    input: InputState,
    viewport: Viewport,
    state: LoopState,
    accumulator: f32,
    last_time: Option<f64>,
    /// Seconds of running time, drives animation
    elapsed: f32,
    page_hidden: bool,
    reduced_motion: bool,
}

impl<S: Surface> Game<S> {
    pub fn new(surface: S, map_id: MapId, pos: Vec2, tuning: Tuning, seed: u64) -> Self {
        Self::with_maps(surface, Maps::default(), map_id, pos, tuning, seed)
    }

    pub fn with_maps(
        surface: S,
        maps: Maps,
        map_id: MapId,
        pos: Vec2,
        tuning: Tuning,
        seed: u64,
    ) -> Self {
        let tuning = tuning.validated();
        let mut session = Session::new(map_id, pos, &tuning, seed);
        session.place(map_id, pos, &maps, &tuning);
        Self {
            surface,
            maps,
            tuning,
            session,
            input: InputState::new(),
            viewport: Viewport::default(),
            state: LoopState::NotStarted,
            accumulator: 0.0,
            last_time: None,
            elapsed: 0.0,
            page_hidden: false,
            reduced_motion: false,
        }
    }

    // === Lifecycle ===

    pub fn loop_state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Begin accepting frames. No-op when already running or destroyed.
    pub fn start(&mut self) {
        if self.state != LoopState::NotStarted {
            return;
        }
        self.state = LoopState::Running;
        self.accumulator = 0.0;
        self.last_time = None;
        log::info!("Game loop started");
    }

    /// Stop accepting frames; `start` may be called again. Idempotent.
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            self.state = LoopState::NotStarted;
            log::info!("Game loop stopped");
        }
    }

    /// Stop for good and drop all input. Idempotent.
    pub fn destroy(&mut self) {
        if self.state == LoopState::Destroyed {
            return;
        }
        self.state = LoopState::Destroyed;
        self.input.set_enabled(false);
        self.session.confetti.clear();
        log::info!("Game destroyed");
    }

    /// One animation frame: run the fixed updates owed since the previous
    /// frame, render once, then clear input edges. Returns the number of
    /// fixed updates that ran.
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        if self.state != LoopState::Running {
            return 0;
        }

        let dt = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        let dt = if dt.is_finite() {
            crate::clamp(dt, 0.0, self.tuning.max_frame_dt)
        } else {
            0.0
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt;
        self.elapsed += dt;

        let step = self.tuning.fixed_dt;
        let mut ticks = 0;
        // Tolerance keeps a 16.67 ms frame from falling just short of 1/60 s
        while step > 0.0 && self.accumulator + 1e-6 >= step {
            tick(
                &mut self.session,
                &self.maps,
                &mut self.input,
                &self.tuning,
                step,
            );
            self.accumulator = (self.accumulator - step).max(0.0);
            ticks += 1;
        }

        self.render();
        self.input.end_frame();
        ticks
    }

    /// `frame` followed by dispatching every queued event
    pub fn frame_and_dispatch<C: GameCallbacks + ?Sized>(
        &mut self,
        now_ms: f64,
        callbacks: &mut C,
    ) -> u32 {
        let ticks = self.frame(now_ms);
        for event in self.take_events() {
            event.dispatch(callbacks);
        }
        ticks
    }

    pub fn render(&mut self) {
        let params = SceneParams {
            map: self.maps.get(self.session.map_id),
            session: &self.session,
            viewport: self.viewport,
            time: self.elapsed,
            reduced_motion: self.reduced_motion,
        };
        draw_scene(&mut self.surface, &params);
    }

    /// Queued notifications, oldest first
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }

    // === Input and page ===

    /// Returns true when the code is bound, so the host can suppress the
    /// browser default (arrow keys scrolling the page)
    pub fn key_down(&mut self, code: &str) -> bool {
        if self.state == LoopState::Destroyed {
            return false;
        }
        self.input.key_down(code);
        Key::from_code(code).is_some()
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        if self.state == LoopState::Destroyed {
            return false;
        }
        self.input.key_up(code);
        Key::from_code(code).is_some()
    }

    /// Tab visibility. Going hidden forces hard pause and notifies once per
    /// transition; input is dropped while hidden.
    pub fn set_page_hidden(&mut self, hidden: bool) {
        if hidden == self.page_hidden || self.state == LoopState::Destroyed {
            return;
        }
        self.page_hidden = hidden;
        self.input.set_enabled(!hidden);
        if hidden {
            self.session.hard_paused = true;
            self.session.push_event(GameEvent::TogglePause(true));
            log::info!("Auto-paused (tab hidden)");
        }
    }

    pub fn is_page_hidden(&self) -> bool {
        self.page_hidden
    }

    // === Handle contract ===

    /// Soft pause: a blocking overlay is open
    pub fn set_paused(&mut self, paused: bool) {
        self.session.soft_paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.session.soft_paused
    }

    pub fn set_hard_paused(&mut self, paused: bool) {
        if self.session.hard_paused && !paused {
            // Resume without a burst of catch-up ticks
            self.accumulator = 0.0;
        }
        self.session.hard_paused = paused;
    }

    pub fn is_hard_paused(&self) -> bool {
        self.session.hard_paused
    }

    pub fn get_state(&self) -> StateSnapshot {
        StateSnapshot {
            map_id: self.session.map_id,
            px: self.session.player.pos.x,
            py: self.session.player.pos.y,
        }
    }

    /// Teleport (e.g. restoring a save). The position is clamped onto the
    /// floor but not pushed out of obstacles: pass positions that came from
    /// `get_state`. A position inside an obstacle is ejected by the first
    /// move, flush against the face opposite the direction of travel.
    pub fn set_state(&mut self, map_id: u8, px: f32, py: f32) -> Result<(), GameError> {
        let map_id = MapId::try_from(map_id)?;
        let pos = Vec2::new(
            if px.is_finite() { px } else { 0.0 },
            if py.is_finite() { py } else { 0.0 },
        );
        self.session.place(map_id, pos, &self.maps, &self.tuning);
        Ok(())
    }

    pub fn advance_map(&mut self) -> bool {
        self.session.advance_map(&self.maps, &self.tuning)
    }

    pub fn retreat_map(&mut self) -> bool {
        self.session.retreat_map(&self.maps, &self.tuning)
    }

    pub fn burst_celebration(&mut self) {
        self.session.burst_celebration(&self.tuning);
    }

    /// CSS size and device pixel ratio. Sizes under 1 px become 1 px; the
    /// ratio is clamped to the tuning range.
    pub fn set_viewport(&mut self, width: f32, height: f32, dpr: f32) {
        let sane = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        let dpr = if dpr.is_finite() {
            crate::clamp(dpr, self.tuning.min_dpr, self.tuning.max_dpr)
        } else {
            self.tuning.min_dpr
        };
        self.viewport = Viewport {
            width: sane(width),
            height: sane(height),
            dpr,
        };
        self.surface.resize(&self.viewport);
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    // === Accessors ===

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn maps(&self) -> &Maps {
        &self.maps
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
