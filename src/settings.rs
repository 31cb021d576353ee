//! Player preferences
//!
//! Persisted separately from the save record in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform;

/// Mixer levels, each in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeState {
    pub master: f32,
    pub music: f32,
    pub sfx: f32,
}

impl Default for VolumeState {
    fn default() -> Self {
        Self {
            master: 0.9,
            music: 0.35,
            sfx: 0.7,
        }
    }
}

impl VolumeState {
    /// Copy with every level clamped into range
    pub fn clamped(self) -> Self {
        Self {
            master: self.master.clamp(0.0, 1.0),
            music: self.music.clamp(0.0, 1.0),
            sfx: self.sfx.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub volume: VolumeState,
    pub muted: bool,

    // === Accessibility ===
    /// Freeze the highlight pulse around the nearest object
    pub reduced_motion: bool,
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "museum_walk_settings";

    /// Volumes actually sent to the mixer: all zero when muted
    pub fn effective_volume(&self) -> VolumeState {
        if self.muted {
            VolumeState {
                master: 0.0,
                music: 0.0,
                sfx: 0.0,
            }
        } else {
            self.volume.clamped()
        }
    }

    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                settings.volume = settings.volume.clamped();
                Some(settings)
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {e}");
                None
            }
        }
    }

    /// Load from LocalStorage, defaults when absent or unreadable
    pub fn load() -> Self {
        if let Some(settings) = platform::storage_get(Self::STORAGE_KEY)
            .as_deref()
            .and_then(Self::from_json)
        {
            log::info!("Loaded settings from LocalStorage");
            return settings;
        }
        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            platform::storage_set(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }
}
