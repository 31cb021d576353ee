//! JavaScript bindings
//!
//! `MuseumGame` is the handle the page holds. Game events are queued while
//! the game is borrowed and dispatched to the JS callback object afterwards,
//! so a callback may call straight back into the handle.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent, VisibilityState};

use crate::audio::{AudioManager, SoundEffect};
use crate::game::{Game, GameCallbacks};
use crate::persistence::{self, SaveState};
use crate::platform::web::{AnimationLoop, ListenerSet};
use crate::progress::{QuizOutcome, QuizResult, record_quiz_result};
use crate::renderer::CanvasSurface;
use crate::sim::{GameEvent, MapId, QuizId};
use crate::{GameError, Settings, Tuning, VolumeState, score};

type SharedGame = Rc<RefCell<Game<CanvasSurface>>>;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Already installed by an earlier instance
        return;
    }
    log::info!("Museum Walk module loaded");
}

/// Callback object supplied by the page. Every member is optional.
struct JsCallbacks {
    target: JsValue,
}

impl JsCallbacks {
    fn call(&self, name: &str, args: &[JsValue]) {
        let func = Reflect::get(&self.target, &JsValue::from_str(name))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok());
        let Some(func) = func else { return };
        let result = match args {
            [] => func.call0(&self.target),
            [a] => func.call1(&self.target, a),
            [a, b] => func.call2(&self.target, a, b),
            [a, b, c] => func.call3(&self.target, a, b, c),
            _ => return,
        };
        if let Err(e) = result {
            log::error!("Callback {name} threw: {e:?}");
        }
    }
}

impl GameCallbacks for JsCallbacks {
    fn request_flipbook(&mut self, flipbook_id: &str, title: &str) {
        self.call("requestFlipbook", &[flipbook_id.into(), title.into()]);
    }

    fn request_quiz(&mut self, quiz_id: QuizId, title: &str) {
        self.call("requestQuiz", &[quiz_id.as_str().into(), title.into()]);
    }

    fn request_frame(&mut self, frame_id: &str, title: &str, image: Option<&str>) {
        let image = image.map(JsValue::from_str).unwrap_or(JsValue::NULL);
        self.call("requestFrame", &[frame_id.into(), title.into(), image]);
    }

    fn toggle_pause(&mut self, paused: bool) {
        self.call("togglePause", &[paused.into()]);
    }

    fn sfx_move_step(&mut self) {
        self.call("sfxMoveStep", &[]);
    }

    fn sfx_interact(&mut self) {
        self.call("sfxInteract", &[]);
    }

    fn sfx_door(&mut self) {
        self.call("sfxDoor", &[]);
    }
}

/// Deliver queued events with no game borrow held
fn dispatch(callbacks: &Rc<RefCell<JsCallbacks>>, events: Vec<GameEvent>) {
    if events.is_empty() {
        return;
    }
    match callbacks.try_borrow_mut() {
        Ok(mut cb) => {
            for event in &events {
                event.dispatch(&mut *cb);
            }
        }
        Err(_) => log::warn!("Dropped {} events raised during a callback", events.len()),
    }
}

/// Read the canvas' CSS size and the window's DPR into the game
fn sync_viewport(game: &SharedGame, canvas: &HtmlCanvasElement) {
    let dpr = web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0);
    if let Ok(mut g) = game.try_borrow_mut() {
        g.set_viewport(
            canvas.client_width() as f32,
            canvas.client_height() as f32,
            dpr as f32,
        );
    }
}

#[wasm_bindgen]
pub struct MuseumGame {
    game: SharedGame,
    callbacks: Rc<RefCell<JsCallbacks>>,
    listeners: ListenerSet,
    animation: Option<AnimationLoop>,
    endpoint: Option<String>,
}

#[wasm_bindgen]
impl MuseumGame {
    /// Fails when the canvas has no 2D context
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        callbacks: JsValue,
        map_id: u8,
        px: f32,
        py: f32,
        tuning_json: Option<String>,
        score_endpoint: Option<String>,
    ) -> Result<MuseumGame, JsValue> {
        let map_id = MapId::try_from(map_id)?;
        let tuning = tuning_json
            .as_deref()
            .map(Tuning::from_json)
            .unwrap_or_default();
        let surface = CanvasSurface::from_canvas(canvas.clone())?;
        let seed = js_sys::Date::now() as u64;

        let mut game = Game::new(surface, map_id, Vec2::new(px, py), tuning, seed);
        game.set_reduced_motion(Settings::load().reduced_motion);
        let game = Rc::new(RefCell::new(game));
        sync_viewport(&game, &canvas);

        let mut handle = MuseumGame {
            game,
            callbacks: Rc::new(RefCell::new(JsCallbacks { target: callbacks })),
            listeners: ListenerSet::new(),
            animation: None,
            endpoint: score_endpoint.filter(|e| !e.is_empty()),
        };
        handle.attach_listeners(&canvas)?;
        log::info!("Game created on map {map_id:?} with seed {seed}");
        Ok(handle)
    }

    fn attach_listeners(&mut self, canvas: &HtmlCanvasElement) -> Result<(), GameError> {
        let window = web_sys::window().ok_or_else(|| GameError::Js("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| GameError::Js("no document".into()))?;

        // Key down
        {
            let game = self.game.clone();
            self.listeners.add(&window, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let Ok(mut g) = game.try_borrow_mut() else {
                    return;
                };
                // Leave keys alone while an overlay (quiz, flipbook) has focus
                if g.key_down(&event.code()) && !g.is_paused() {
                    event.prevent_default();
                }
            })?;
        }

        // Key up
        {
            let game = self.game.clone();
            self.listeners.add(&window, "keyup", move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    if let Ok(mut g) = game.try_borrow_mut() {
                        g.key_up(&event.code());
                    }
                }
            })?;
        }

        // Visibility change (tab switch, minimize)
        {
            let game = self.game.clone();
            let callbacks = self.callbacks.clone();
            let doc = document.clone();
            self.listeners.add(&document, "visibilitychange", move |_| {
                let hidden = doc.visibility_state() == VisibilityState::Hidden;
                let events = match game.try_borrow_mut() {
                    Ok(mut g) => {
                        g.set_page_hidden(hidden);
                        g.take_events()
                    }
                    Err(_) => return,
                };
                dispatch(&callbacks, events);
            })?;
        }

        // Resize
        {
            let game = self.game.clone();
            let canvas = canvas.clone();
            self.listeners.add(&window, "resize", move |_| {
                sync_viewport(&game, &canvas);
            })?;
        }

        Ok(())
    }

    /// Start the animation-frame loop. No-op when running or destroyed.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.animation.is_some() {
            return Ok(());
        }
        {
            let mut g = self.game.borrow_mut();
            g.start();
            if !g.is_running() {
                return Ok(());
            }
        }

        let game = self.game.clone();
        let callbacks = self.callbacks.clone();
        let animation = AnimationLoop::start(move |time| {
            let events = match game.try_borrow_mut() {
                Ok(mut g) => {
                    g.frame(time);
                    g.take_events()
                }
                Err(_) => return,
            };
            dispatch(&callbacks, events);
        })?;
        self.animation = Some(animation);
        Ok(())
    }

    /// Cancel the loop; `start` may be called again. Idempotent.
    pub fn stop(&mut self) {
        if let Some(animation) = self.animation.take() {
            animation.stop();
        }
        if let Ok(mut g) = self.game.try_borrow_mut() {
            g.stop();
        }
    }

    /// Cancel the loop and remove every listener. Idempotent.
    pub fn destroy(&mut self) {
        self.stop();
        self.listeners.remove_all();
        if let Ok(mut g) = self.game.try_borrow_mut() {
            g.destroy();
        }
    }

    #[wasm_bindgen(js_name = setPaused)]
    pub fn set_paused(&self, paused: bool) {
        self.game.borrow_mut().set_paused(paused);
    }

    #[wasm_bindgen(js_name = isPaused)]
    pub fn is_paused(&self) -> bool {
        self.game.borrow().is_paused()
    }

    #[wasm_bindgen(js_name = setHardPaused)]
    pub fn set_hard_paused(&self, paused: bool) {
        self.game.borrow_mut().set_hard_paused(paused);
    }

    #[wasm_bindgen(js_name = isHardPaused)]
    pub fn is_hard_paused(&self) -> bool {
        self.game.borrow().is_hard_paused()
    }

    /// `{ mapId, px, py }`
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        let s = self.game.borrow().get_state();
        let obj = Object::new();
        Reflect::set(&obj, &"mapId".into(), &JsValue::from(u8::from(s.map_id)))?;
        Reflect::set(&obj, &"px".into(), &JsValue::from(s.px))?;
        Reflect::set(&obj, &"py".into(), &JsValue::from(s.py))?;
        Ok(obj.into())
    }

    /// Throws on a map id outside 1..=3
    #[wasm_bindgen(js_name = setState)]
    pub fn set_state(&self, map_id: u8, px: f32, py: f32) -> Result<(), JsValue> {
        self.game.borrow_mut().set_state(map_id, px, py)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = advanceMap)]
    pub fn advance_map(&self) -> bool {
        self.game.borrow_mut().advance_map()
    }

    #[wasm_bindgen(js_name = retreatMap)]
    pub fn retreat_map(&self) -> bool {
        self.game.borrow_mut().retreat_map()
    }

    #[wasm_bindgen(js_name = burstCelebration)]
    pub fn burst_celebration(&self) {
        self.game.borrow_mut().burst_celebration();
    }

    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&self, width: f32, height: f32, dpr: f32) {
        self.game.borrow_mut().set_viewport(width, height, dpr);
    }

    #[wasm_bindgen(js_name = setReducedMotion)]
    pub fn set_reduced_motion(&self, reduced: bool) {
        self.game.borrow_mut().set_reduced_motion(reduced);
        let mut settings = Settings::load();
        settings.reduced_motion = reduced;
        settings.save();
    }

    /// Record a passed quiz: update and write the save, move the game on
    /// and report the score. Returns "advance" or "celebrate".
    #[wasm_bindgen(js_name = completeQuiz)]
    pub fn complete_quiz(
        &self,
        quiz_id: &str,
        total_time_ms: f64,
        attempts: u32,
    ) -> Result<String, JsValue> {
        let quiz_id = QuizId::from_str(quiz_id)
            .ok_or_else(|| GameError::Js(format!("unknown quiz id {quiz_id}")))?;
        let mut save = persistence::load_save().unwrap_or_else(|| SaveState::new(""));
        let at: String = js_sys::Date::new_0().to_iso_string().into();
        let result = QuizResult {
            quiz_id,
            total_time_ms: total_time_ms.max(0.0) as u64,
            attempts,
        };
        let (outcome, report) = record_quiz_result(&mut save, result, &at);

        {
            let mut g = self.game.borrow_mut();
            match outcome {
                QuizOutcome::Advance => {
                    g.advance_map();
                }
                QuizOutcome::Celebrate => g.burst_celebration(),
            }
            let s = g.get_state();
            save.sync_position(s.map_id, s.px, s.py);
        }
        persistence::write_save(&mut save);

        if let Some(report) = report {
            score::relay(self.endpoint.clone(), report);
        }

        Ok(match outcome {
            QuizOutcome::Advance => "advance".to_string(),
            QuizOutcome::Celebrate => "celebrate".to_string(),
        })
    }

    /// Copy the current position into the stored save
    #[wasm_bindgen(js_name = saveProgress)]
    pub fn save_progress(&self) {
        let Some(mut save) = persistence::load_save() else {
            return;
        };
        let s = self.game.borrow().get_state();
        save.sync_position(s.map_id, s.px, s.py);
        persistence::write_save(&mut save);
    }
}

impl Drop for MuseumGame {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Stored save as JSON, or undefined when there is none (or it is unreadable)
#[wasm_bindgen(js_name = loadSave)]
pub fn load_save() -> Option<String> {
    persistence::load_save().and_then(|s| serde_json::to_string(&s).ok())
}

#[wasm_bindgen(js_name = hasSave)]
pub fn has_save() -> bool {
    persistence::has_save()
}

/// Start a fresh save for `player_name` and return it as JSON
#[wasm_bindgen(js_name = newSave)]
pub fn new_save(player_name: &str) -> Result<String, JsValue> {
    let mut save = SaveState::new(player_name.trim());
    persistence::write_save(&mut save);
    serde_json::to_string(&save).map_err(|e| GameError::Js(e.to_string()).into())
}

#[wasm_bindgen(js_name = markHelpShown)]
pub fn mark_help_shown() {
    if let Some(mut save) = persistence::load_save() {
        save.help_shown = true;
        persistence::write_save(&mut save);
    }
}

#[wasm_bindgen(js_name = clearSave)]
pub fn clear_save() {
    persistence::clear_save();
}

/// Audio handle. `start` must be called from a user gesture.
#[wasm_bindgen]
pub struct MuseumAudio {
    manager: AudioManager,
    settings: Settings,
}

#[wasm_bindgen]
impl MuseumAudio {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MuseumAudio {
        let settings = Settings::load();
        let mut manager = AudioManager::new();
        manager.set_volume(settings.effective_volume());
        MuseumAudio { manager, settings }
    }

    pub fn start(&mut self) {
        self.manager.start();
        self.manager.set_volume(self.settings.effective_volume());
    }

    pub fn suspend(&self) {
        self.manager.suspend();
    }

    pub fn resume(&self) {
        self.manager.resume();
    }

    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, master: f32, music: f32, sfx: f32) {
        self.settings.volume = VolumeState { master, music, sfx }.clamped();
        self.manager.set_volume(self.settings.effective_volume());
        self.settings.save();
    }

    #[wasm_bindgen(js_name = setMuted)]
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.manager.set_volume(self.settings.effective_volume());
        self.settings.save();
    }

    #[wasm_bindgen(js_name = playMoveStep)]
    pub fn play_move_step(&self) {
        self.manager.play(SoundEffect::MoveStep);
    }

    #[wasm_bindgen(js_name = playInteract)]
    pub fn play_interact(&self) {
        self.manager.play(SoundEffect::Interact);
    }

    #[wasm_bindgen(js_name = playDoor)]
    pub fn play_door(&self) {
        self.manager.play(SoundEffect::Door);
    }
}

impl Default for MuseumAudio {
    fn default() -> Self {
        Self::new()
    }
}
