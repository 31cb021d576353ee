//! Audio system using Web Audio API
//!
//! Procedurally generated ambience and blips - no external files needed.
//! The context is created on the first `start`, which must come from a user
//! gesture (browser autoplay policy).

use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use crate::settings::VolumeState;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Footstep while walking
    MoveStep,
    /// Exhibit or frame opened
    Interact,
    /// Door or stage opened
    Door,
}

impl SoundEffect {
    /// (frequency Hz, duration s, waveform)
    fn blip(self) -> (f32, f64, OscillatorType) {
        match self {
            SoundEffect::MoveStep => (180.0, 0.040, OscillatorType::Square),
            SoundEffect::Interact => (520.0, 0.070, OscillatorType::Triangle),
            SoundEffect::Door => (300.0, 0.120, OscillatorType::Sawtooth),
        }
    }
}

/// Nodes created by `start`
struct Mixer {
    ctx: AudioContext,
    master: GainNode,
    music: GainNode,
    sfx: GainNode,
    // Kept alive for the lifetime of the context
    _ambient: Vec<OscillatorNode>,
}

/// Audio manager for the game
pub struct AudioManager {
    mixer: Option<Mixer>,
    volume: VolumeState,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            mixer: None,
            volume: VolumeState::default(),
        }
    }

    /// Create the context on first call; later calls just resume it
    pub fn start(&mut self) {
        if self.mixer.is_some() {
            self.resume();
            return;
        }
        match Self::build_mixer() {
            Some(mixer) => {
                self.mixer = Some(mixer);
                self.apply_volume();
                log::info!("Audio started");
            }
            None => log::warn!("Failed to create AudioContext - audio disabled"),
        }
    }

    fn build_mixer() -> Option<Mixer> {
        let ctx = AudioContext::new().ok()?;
        let master = ctx.create_gain().ok()?;
        let music = ctx.create_gain().ok()?;
        let sfx = ctx.create_gain().ok()?;
        music.connect_with_audio_node(&master).ok()?;
        sfx.connect_with_audio_node(&master).ok()?;
        master.connect_with_audio_node(&ctx.destination()).ok()?;

        let ambient = Self::start_ambient(&ctx, &music).unwrap_or_else(|| {
            log::warn!("Ambient tone unavailable");
            Vec::new()
        });

        Some(Mixer {
            ctx,
            master,
            music,
            sfx,
            _ambient: ambient,
        })
    }

    /// Two low sines, the upper one wobbled by a slow LFO
    fn start_ambient(ctx: &AudioContext, out: &GainNode) -> Option<Vec<OscillatorNode>> {
        let t0 = ctx.current_time();
        let osc_a = Self::create_osc(ctx, 110.0, OscillatorType::Sine)?;
        let osc_b = Self::create_osc(ctx, 165.0, OscillatorType::Sine)?;
        let lfo = Self::create_osc(ctx, 0.12, OscillatorType::Sine)?;

        let lfo_gain = ctx.create_gain().ok()?;
        lfo_gain.gain().set_value(8.0);
        lfo.connect_with_audio_node(&lfo_gain).ok()?;
        lfo_gain.connect_with_audio_param(&osc_b.frequency()).ok()?;

        let mix = ctx.create_gain().ok()?;
        mix.gain().set_value(0.7);
        osc_a.connect_with_audio_node(&mix).ok()?;
        osc_b.connect_with_audio_node(&mix).ok()?;
        mix.connect_with_audio_node(out).ok()?;

        for osc in [&osc_a, &osc_b, &lfo] {
            osc.start_with_when(t0).ok()?;
        }
        Some(vec![osc_a, osc_b, lfo])
    }

    pub fn suspend(&self) {
        if let Some(m) = &self.mixer {
            if m.ctx.state() == AudioContextState::Running {
                let _ = m.ctx.suspend();
            }
        }
    }

    pub fn resume(&self) {
        if let Some(m) = &self.mixer {
            if m.ctx.state() == AudioContextState::Suspended {
                let _ = m.ctx.resume();
            }
        }
    }

    /// Levels are clamped to 0.0..=1.0
    pub fn set_volume(&mut self, volume: VolumeState) {
        self.volume = volume.clamped();
        self.apply_volume();
    }

    fn apply_volume(&self) {
        if let Some(m) = &self.mixer {
            m.master.gain().set_value(self.volume.master);
            m.music.gain().set_value(self.volume.music);
            m.sfx.gain().set_value(self.volume.sfx);
        }
    }

    /// Play a sound effect. Silent until `start` has run.
    pub fn play(&self, effect: SoundEffect) {
        let Some(m) = &self.mixer else { return };
        let (freq, dur, wave) = effect.blip();
        let Some(osc) = Self::create_osc(&m.ctx, freq, wave) else {
            return;
        };
        let Ok(gain) = m.ctx.create_gain() else { return };
        if osc.connect_with_audio_node(&gain).is_err() || gain.connect_with_audio_node(&m.sfx).is_err() {
            return;
        }

        let t = m.ctx.current_time();
        // Short attack, exponential decay; exponential ramps can't touch 0
        gain.gain().set_value_at_time(0.0001, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.45, t + 0.01).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.0001, t + dur).ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + dur + 0.02).ok();
    }

    // === Sound generators ===

    /// Create an oscillator at `freq`, not yet connected
    fn create_osc(ctx: &AudioContext, freq: f32, osc_type: OscillatorType) -> Option<OscillatorNode> {
        let osc = ctx.create_oscillator().ok()?;
        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        Some(osc)
    }
}
