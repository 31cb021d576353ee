//! Save/load persistence
//!
//! Features:
//! - Versioned camelCase JSON record
//! - Unreadable or foreign-version saves load as "no save"
//! - LocalStorage on web, in-memory only natively

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::{ENTRY_X, ENTRY_Y};
use crate::platform;
use crate::sim::{MapId, QuizId};

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

/// LocalStorage key
pub const SAVE_KEY: &str = "museum_walk_save_v1";

/// Combined quiz score: every quiz adds into the same two counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreState {
    pub total_time_ms: u64,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveState {
    pub v: u32,
    pub player_name: String,
    pub map_id: MapId,
    pub px: f32,
    pub py: f32,
    #[serde(default)]
    pub score: ScoreState,
    #[serde(default)]
    pub completed: BTreeMap<QuizId, bool>,
    #[serde(default)]
    pub help_shown: bool,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub last_saved_at: f64,
}

impl SaveState {
    /// Fresh save at the hall 1 entrance
    pub fn new(player_name: &str) -> Self {
        Self {
            v: SAVE_VERSION,
            player_name: player_name.to_string(),
            map_id: MapId::One,
            px: ENTRY_X,
            py: ENTRY_Y,
            score: ScoreState::default(),
            completed: BTreeMap::new(),
            help_shown: false,
            last_saved_at: platform::now_ms(),
        }
    }

    /// Parse a stored record. Never fails loudly: corrupt JSON or another
    /// version is treated as no save.
    pub fn from_json(json: &str) -> Option<Self> {
        let save: SaveState = match serde_json::from_str(json) {
            Ok(save) => save,
            Err(e) => {
                log::warn!("Discarding unreadable save: {e}");
                return None;
            }
        };
        if save.v != SAVE_VERSION {
            log::warn!("Discarding save with version {}", save.v);
            return None;
        }
        Some(save)
    }

    pub fn is_completed(&self, quiz: QuizId) -> bool {
        self.completed.get(&quiz).copied().unwrap_or(false)
    }

    pub fn mark_completed(&mut self, quiz: QuizId) {
        self.completed.insert(quiz, true);
    }

    /// Copy the game's position into the record
    pub fn sync_position(&mut self, map_id: MapId, px: f32, py: f32) {
        self.map_id = map_id;
        self.px = px;
        self.py = py;
    }
}

pub fn has_save() -> bool {
    platform::storage_get(SAVE_KEY).is_some()
}

pub fn load_save() -> Option<SaveState> {
    let json = platform::storage_get(SAVE_KEY)?;
    let save = SaveState::from_json(&json)?;
    log::info!("Loaded save for {:?} on map {}", save.player_name, u8::from(save.map_id));
    Some(save)
}

/// Stamp `last_saved_at` and write
pub fn write_save(save: &mut SaveState) {
    save.last_saved_at = platform::now_ms();
    match serde_json::to_string(save) {
        Ok(json) => {
            platform::storage_set(SAVE_KEY, &json);
            log::info!("Game saved (map {})", u8::from(save.map_id));
        }
        Err(e) => log::warn!("Could not serialize save: {e}"),
    }
}

pub fn clear_save() {
    platform::storage_remove(SAVE_KEY);
    log::info!("Saved game cleared");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_save_at_entrance() {
        let save = SaveState::new("An");
        assert_eq!(save.v, 1);
        assert_eq!(save.map_id, MapId::One);
        assert_eq!((save.px, save.py), (140.0, 360.0));
        assert!(!save.is_completed(QuizId::Map1));
    }

    #[test]
    fn test_json_field_names() {
        let mut save = SaveState::new("An");
        save.mark_completed(QuizId::Map2);
        save.score.total_time_ms = 4200;
        let json = serde_json::to_value(&save).unwrap();
        assert_eq!(json["playerName"], "An");
        assert_eq!(json["mapId"], 1);
        assert_eq!(json["score"]["totalTimeMs"], 4200);
        assert_eq!(json["completed"]["map2"], true);
        assert_eq!(json["helpShown"], false);
        assert!(json.get("lastSavedAt").is_some());
    }

    #[test]
    fn test_parse_existing_record() {
        let json = r#"{"v":1,"playerName":"Binh","mapId":3,"px":500,"py":400,
            "score":{"totalTimeMs":91000,"attempts":7},
            "completed":{"map1":true,"map2":true},"helpShown":true,"lastSavedAt":1700000000000}"#;
        let save = SaveState::from_json(json).unwrap();
        assert_eq!(save.map_id, MapId::Three);
        assert_eq!(save.score.attempts, 7);
        assert!(save.is_completed(QuizId::Map1));
        assert!(!save.is_completed(QuizId::Final));
    }

    #[test]
    fn test_bad_records_are_no_save() {
        assert!(SaveState::from_json("{").is_none());
        assert!(SaveState::from_json("null").is_none());
        assert!(SaveState::from_json(r#"{"v":2,"playerName":"x","mapId":1,"px":0,"py":0}"#).is_none());
        // Map id outside 1..=3
        assert!(SaveState::from_json(r#"{"v":1,"playerName":"x","mapId":9,"px":0,"py":0}"#).is_none());
    }

    #[test]
    fn test_sync_position() {
        let mut save = SaveState::new("");
        save.sync_position(MapId::Two, 10.0, 20.0);
        assert_eq!((save.map_id, save.px, save.py), (MapId::Two, 10.0, 20.0));
    }
}
