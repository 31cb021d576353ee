//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of map entries)
//! - No rendering or platform dependencies

pub mod collision;
pub mod confetti;
pub mod geometry;
pub mod input;
pub mod map;
pub mod player;
pub mod proximity;
pub mod state;
pub mod tick;

pub use collision::{move_axis, slide_move};
pub use confetti::{ConfettiParticle, ConfettiSystem, PALETTE_LEN};
pub use geometry::{COLLISION_EPSILON, Rect, normalize_or_keep};
pub use input::{Direction, InputState, Key};
pub use map::{InteractKind, Interactable, MapDef, MapId, Maps, QuizId, WallFrame, build_maps};
pub use player::{Facing, Player};
pub use proximity::{find_nearest, probe_rect};
pub use state::{GameEvent, Session};
pub use tick::tick;
