//! Museum Walk - a top-down educational museum walkthrough
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (input, movement, collision, proximity, confetti)
//! - `game`: Orchestrator owning the frame loop, camera and the UI callback boundary
//! - `renderer`: Surface abstraction and the layered 2D scene pipeline
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Versioned save record
//! - `progress`: Quiz completion bookkeeping
//! - `score`: Best-effort score relay
//! - `tuning`: Data-driven tuning constants

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod bindings;
pub mod error;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod renderer;
pub mod score;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use game::{Game, GameCallbacks, LoopState};
pub use settings::{Settings, VolumeState};
pub use tuning::Tuning;

/// World layout constants shared by the map builder, the player clamp and the renderer
pub mod consts {
    /// World size (identical for every map)
    pub const WORLD_WIDTH: f32 = 2400.0;
    pub const WORLD_HEIGHT: f32 = 720.0;

    /// Wall bands - full-width obstacles along the top and bottom of every map
    pub const WALL_TOP_H: f32 = 110.0;
    pub const WALL_BOTTOM_H: f32 = 96.0;

    /// Entry point on every map (start of a run, and after advancing)
    pub const ENTRY_X: f32 = 140.0;
    pub const ENTRY_Y: f32 = 360.0;

    /// Gate (door/stage) placement, shared by the three maps
    pub const GATE_W: f32 = 180.0;
    pub const GATE_H: f32 = 70.0;
    pub const GATE_X: f32 = WORLD_WIDTH - 230.0;
    pub const GATE_Y: f32 = WORLD_HEIGHT * 0.5 - GATE_H * 0.5;
    /// Where the player lands when retreating onto a map (just left of its gate)
    pub const RETURN_X: f32 = GATE_X - 80.0;

    /// Exhibit display case size
    pub const EXHIBIT_W: f32 = 140.0;
    pub const EXHIBIT_H: f32 = 100.0;
    /// Pedestal obstacles extend this far past the display case on every side
    pub const PEDESTAL_PAD: f32 = 10.0;
    /// Wall-frame obstacles extend this far past the frame on every side
    pub const FRAME_PAD: f32 = 8.0;

    /// Floor tile size used by the backdrop grid
    pub const TILE: f32 = 56.0;
}

/// Clamp `v` into `[min, max]`. Unlike `f32::clamp` this never panics when
/// `min > max`; `min` wins.
#[inline]
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    if v < min {
        min
    } else if v > max {
        max.max(min)
    } else {
        v
    }
}
