//! Tunable gameplay constants
//!
//! None of these values are load-bearing; they were picked by feel. Every
//! field has a default so a partial JSON override is enough.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tuning {
    /// Fixed simulation timestep (seconds)
    pub fixed_dt: f32,
    /// Upper bound on the wall-clock delta accepted per animation frame
    pub max_frame_dt: f32,

    /// Player walking speed (world units/second)
    pub player_speed: f32,
    /// Half-extents of the player collision box
    pub player_half: Vec2,
    /// Gap kept between the player box and the wall bands
    pub bounds_inset: f32,
    /// Seconds between footstep sounds while moving
    pub step_interval: f32,

    /// Interact probe growth on each side (wider than tall: people approach exhibits head-on)
    pub probe_margin_x: f32,
    pub probe_margin_y: f32,

    /// Confetti counts
    pub advance_burst: [u32; 2],
    pub celebration_burst: u32,
    /// Particles allocated up front
    pub confetti_prewarm: usize,

    /// Device pixel ratio accepted by `set_viewport`
    pub min_dpr: f32,
    pub max_dpr: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_frame_dt: 0.1,

            player_speed: 240.0,
            player_half: Vec2::new(14.0, 18.0),
            bounds_inset: 2.0,
            step_interval: 0.28,

            probe_margin_x: 18.0,
            probe_margin_y: 12.0,

            advance_burst: [60, 70],
            celebration_burst: 140,
            confetti_prewarm: 220,

            min_dpr: 1.0,
            max_dpr: 2.5,
        }
    }
}

/// Shortest fixed step accepted (480 Hz)
pub const MIN_FIXED_DT: f32 = 1.0 / 480.0;
/// Longest fixed step accepted
pub const MAX_FIXED_DT: f32 = 0.1;
/// Upper bound for the per-frame delta clamp
pub const MAX_FRAME_DT_LIMIT: f32 = 0.25;
/// Hard cap for any single confetti count
pub const MAX_CONFETTI: u32 = 2000;

/// `v` if finite and not negative, `fallback` otherwise
fn non_negative(v: f32, fallback: f32) -> f32 {
    if v.is_finite() && v >= 0.0 { v } else { fallback }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override. Bad input falls back to
    /// defaults; out-of-range values are repaired by [`Tuning::validated`].
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Tuning>(json) {
            Ok(tuning) => tuning.validated(),
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }

    /// Bring every field into a range the loop and the simulation can run
    /// with. Non-finite or negative values fall back to the default.
    pub fn validated(self) -> Self {
        let d = Self::default();
        let fixed_dt = if self.fixed_dt.is_finite() {
            crate::clamp(self.fixed_dt, MIN_FIXED_DT, MAX_FIXED_DT)
        } else {
            d.fixed_dt
        };
        let max_frame_dt = if self.max_frame_dt.is_finite() {
            crate::clamp(self.max_frame_dt, fixed_dt, MAX_FRAME_DT_LIMIT.max(fixed_dt))
        } else {
            d.max_frame_dt.max(fixed_dt)
        };
        let min_dpr = if self.min_dpr.is_finite() && self.min_dpr > 0.0 {
            self.min_dpr
        } else {
            d.min_dpr
        };
        let max_dpr = if self.max_dpr.is_finite() {
            self.max_dpr.max(min_dpr)
        } else {
            d.max_dpr.max(min_dpr)
        };

        let fixed = Self {
            fixed_dt,
            max_frame_dt,
            player_speed: non_negative(self.player_speed, d.player_speed),
            player_half: Vec2::new(
                non_negative(self.player_half.x, d.player_half.x),
                non_negative(self.player_half.y, d.player_half.y),
            ),
            bounds_inset: non_negative(self.bounds_inset, d.bounds_inset),
            step_interval: non_negative(self.step_interval, d.step_interval),
            probe_margin_x: non_negative(self.probe_margin_x, d.probe_margin_x),
            probe_margin_y: non_negative(self.probe_margin_y, d.probe_margin_y),
            advance_burst: self.advance_burst.map(|n| n.min(MAX_CONFETTI)),
            celebration_burst: self.celebration_burst.min(MAX_CONFETTI),
            confetti_prewarm: self.confetti_prewarm.min(MAX_CONFETTI as usize),
            min_dpr,
            max_dpr,
        };
        if fixed != self {
            log::warn!("Tuning values out of range were adjusted");
        }
        fixed
    }

    /// Burst size used when advancing onto map 2 (index 0) or map 3 (index 1)
    pub fn advance_burst_for(&self, index: usize) -> u32 {
        self.advance_burst
            .get(index)
            .copied()
            .unwrap_or(self.advance_burst[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"playerSpeed": 300.0, "probeMarginX": 24.0}"#);
        assert_eq!(tuning.player_speed, 300.0);
        assert_eq!(tuning.probe_margin_x, 24.0);
        assert_eq!(tuning.probe_margin_y, 12.0);
        assert_eq!(tuning.step_interval, 0.28);
    }

    #[test]
    fn test_garbage_override_falls_back() {
        assert_eq!(Tuning::from_json("not json"), Tuning::default());
    }

    #[test]
    fn test_defaults_survive_validation() {
        assert_eq!(Tuning::default().validated(), Tuning::default());
    }

    #[test]
    fn test_negative_frame_clamp_is_raised_to_the_step() {
        let tuning = Tuning::from_json(r#"{"maxFrameDt": -1.0}"#);
        assert_eq!(tuning.max_frame_dt, tuning.fixed_dt);
    }

    #[test]
    fn test_tiny_step_is_raised() {
        let tuning = Tuning::from_json(r#"{"fixedDt": 0.00001}"#);
        assert_eq!(tuning.fixed_dt, MIN_FIXED_DT);
        assert!(tuning.max_frame_dt >= tuning.fixed_dt);
        assert!(tuning.max_frame_dt / tuning.fixed_dt <= 121.0);
    }

    #[test]
    fn test_negative_and_huge_values_repaired() {
        let tuning = Tuning::from_json(
            r#"{"playerSpeed": -5.0, "stepInterval": -1.0, "probeMarginX": -3.0,
                "playerHalf": [-1.0, 10.0], "minDpr": 0.0, "maxDpr": 0.5,
                "celebrationBurst": 1000000, "maxFrameDt": 60.0}"#,
        );
        let d = Tuning::default();
        assert_eq!(tuning.player_speed, d.player_speed);
        assert_eq!(tuning.step_interval, d.step_interval);
        assert_eq!(tuning.probe_margin_x, d.probe_margin_x);
        assert_eq!(tuning.player_half, Vec2::new(d.player_half.x, 10.0));
        assert_eq!(tuning.min_dpr, d.min_dpr);
        assert_eq!(tuning.max_dpr, d.min_dpr);
        assert_eq!(tuning.celebration_burst, MAX_CONFETTI);
        assert_eq!(tuning.max_frame_dt, MAX_FRAME_DT_LIMIT);
    }

    #[test]
    fn test_advance_burst_lookup() {
        let tuning = Tuning::default();
        assert_eq!(tuning.advance_burst_for(0), 60);
        assert_eq!(tuning.advance_burst_for(1), 70);
        assert_eq!(tuning.advance_burst_for(7), 60);
    }
}
