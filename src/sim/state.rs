//! Session state and map transitions
//!
//! Everything the fixed update mutates lives here. Map geometry does not:
//! it's borrowed from `Maps` on every tick.

use glam::Vec2;

use super::confetti::ConfettiSystem;
use super::map::{MapId, Maps, QuizId};
use super::player::Player;
use crate::tuning::Tuning;

/// Outgoing notifications for the UI layer, queued during a tick and
/// dispatched once the simulation has finished borrowing its state
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RequestFlipbook {
        flipbook_id: String,
        title: String,
    },
    RequestQuiz {
        quiz_id: QuizId,
        title: String,
    },
    RequestFrame {
        frame_id: String,
        title: String,
        image: Option<String>,
    },
    TogglePause(bool),
    SfxMoveStep,
    SfxInteract,
    SfxDoor,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub map_id: MapId,
    pub player: Player,
    /// Escape or tab hidden; persists until explicitly resumed
    pub hard_paused: bool,
    /// A blocking UI overlay is open
    pub soft_paused: bool,
    /// Index into the current map's interactables, recomputed every tick
    pub nearest: Option<usize>,
    pub confetti: ConfettiSystem,
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(map_id: MapId, pos: Vec2, tuning: &Tuning, seed: u64) -> Self {
        Self {
            map_id,
            player: Player::new(pos, tuning.player_half),
            hard_paused: false,
            soft_paused: false,
            nearest: None,
            confetti: ConfettiSystem::new(tuning.confetti_prewarm, seed),
            events: Vec::new(),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.hard_paused || self.soft_paused
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Flip hard pause and queue the notification. Returns the new value.
    pub fn toggle_hard_pause(&mut self) -> bool {
        self.hard_paused = !self.hard_paused;
        self.push_event(GameEvent::TogglePause(self.hard_paused));
        self.hard_paused
    }

    /// Move to `map_id` at `pos`, clamped onto that map's floor
    pub fn place(&mut self, map_id: MapId, pos: Vec2, maps: &Maps, tuning: &Tuning) {
        self.map_id = map_id;
        self.player.set_spawn(pos);
        self.player.clamp_into(maps.get(map_id), tuning.bounds_inset);
        self.nearest = None;
    }

    /// One step forward (1 -> 2 or 2 -> 3) with a small burst. No-op on map 3.
    pub fn advance_map(&mut self, maps: &Maps, tuning: &Tuning) -> bool {
        let Some(next) = self.map_id.next() else {
            return false;
        };
        self.place(next, maps.get(next).entry, maps, tuning);
        let count = tuning.advance_burst_for(next.index() - 1);
        let origin = self.player.pos + Vec2::new(120.0, -40.0);
        self.confetti.burst(origin.x, origin.y, count);
        log::info!("Advanced to map {}", u8::from(next));
        true
    }

    /// One step back (3 -> 2 or 2 -> 1), landing next to that map's gate. No-op on map 1.
    pub fn retreat_map(&mut self, maps: &Maps, tuning: &Tuning) -> bool {
        let Some(prev) = self.map_id.prev() else {
            return false;
        };
        self.place(prev, maps.get(prev).return_point, maps, tuning);
        log::info!("Retreated to map {}", u8::from(prev));
        true
    }

    /// Big burst above the player; the map does not change
    pub fn burst_celebration(&mut self, tuning: &Tuning) {
        let origin = self.player.pos + Vec2::new(90.0, -60.0);
        self.confetti
            .burst(origin.x, origin.y, tuning.celebration_burst);
    }
}
