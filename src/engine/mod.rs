// Purpose: the narrow control surface of the audio engine, plus two
// implementations that live on this side of it.

pub mod params;
pub mod recorder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use params::{ParameterEngine, Ramp};
pub use recorder::{EngineCall, RecordingEngine};

/// ADSR shape of the shared amplitude envelope. Times are in seconds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShape {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl EnvelopeShape {
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack: attack.max(0.0),
            decay: decay.max(0.0),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(0.0),
        }
    }
}

impl Default for EnvelopeShape {
    /// Percussive pluck: instant attack, one second decay to silence.
    fn default() -> Self {
        Self::adsr(0.0, 1.0, 0.0, 0.25)
    }
}

/// What the voice scheduler may ask of the audio engine.
///
/// Voices index the engine's oscillator bank. Nothing here reads engine
/// state back.
pub trait SynthControl {
    fn set_frequency(&mut self, voice: usize, hz: f32, ramp: Duration);

    fn set_amplitude(&mut self, voice: usize, level: f32, ramp: Duration);

    fn open_gate(&mut self);

    fn close_gate(&mut self);

    fn set_filter_cutoff(&mut self, hz: f32);

    fn set_reverb_mix(&mut self, ratio: f32);

    /// Engines without an adjustable envelope ignore this.
    fn set_envelope(&mut self, _shape: EnvelopeShape) {}
}

impl<T: SynthControl + ?Sized> SynthControl for Box<T> {
    fn set_frequency(&mut self, voice: usize, hz: f32, ramp: Duration) {
        (**self).set_frequency(voice, hz, ramp)
    }

    fn set_amplitude(&mut self, voice: usize, level: f32, ramp: Duration) {
        (**self).set_amplitude(voice, level, ramp)
    }

    fn open_gate(&mut self) {
        (**self).open_gate()
    }

    fn close_gate(&mut self) {
        (**self).close_gate()
    }

    fn set_filter_cutoff(&mut self, hz: f32) {
        (**self).set_filter_cutoff(hz)
    }

    fn set_reverb_mix(&mut self, ratio: f32) {
        (**self).set_reverb_mix(ratio)
    }

    fn set_envelope(&mut self, shape: EnvelopeShape) {
        (**self).set_envelope(shape)
    }
}
