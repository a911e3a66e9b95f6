//! Session configuration: gate timing, octave bounds, oscillator layout and
//! the initial patch handed to the engine.
//!
//! Every struct deserializes with defaults for missing fields, so a config
//! file only needs to name what it changes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{ops::RangeInclusive, time::Duration};

use crate::engine::EnvelopeShape;

/// Which pitch an oscillator in the bank follows.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceRole {
    /// Tracks the played (transposed) note.
    Primary,
    /// Tracks the note one octave below, floored at MIDI 0.
    SubOctave,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Delay before a note-on reopens the gate, and before a note-off closes it.
    pub gate_delay_ms: u64,
    /// Glide applied to oscillator frequency changes.
    pub frequency_ramp_ms: u64,
    /// Oscillator level published on every note-on (applied without ramp).
    pub amplitude: f32,
    pub octave_min: i32,
    pub octave_max: i32,
    /// One entry per oscillator in the engine's bank, indexed by voice.
    pub oscillators: Vec<VoiceRole>,
}

/// Shortest gap between a retrigger close and the reopen that follows it.
/// Anything shorter lands both edges in the same control tick.
pub const MIN_GATE_DELAY: Duration = Duration::from_millis(1);

impl SchedulerConfig {
    /// Configured gate delay, never below [`MIN_GATE_DELAY`].
    pub fn gate_delay(&self) -> Duration {
        Duration::from_millis(self.gate_delay_ms).max(MIN_GATE_DELAY)
    }

    pub fn frequency_ramp(&self) -> Duration {
        Duration::from_millis(self.frequency_ramp_ms)
    }

    pub fn octave_bounds(&self) -> RangeInclusive<i32> {
        self.octave_min..=self.octave_max
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            gate_delay_ms: 10,
            frequency_ramp_ms: 100,
            amplitude: 0.2,
            octave_min: -2,
            octave_max: 3,
            oscillators: vec![VoiceRole::Primary, VoiceRole::Primary, VoiceRole::SubOctave],
        }
    }
}

/// Engine parameters applied once when a session starts.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct PatchConfig {
    pub cutoff_hz: f32,
    pub reverb_mix: f32,
    pub envelope: EnvelopeShape,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            cutoff_hz: 20_000.0,
            reverb_mix: 0.3,
            envelope: EnvelopeShape::default(),
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthConfig {
    pub scheduler: SchedulerConfig,
    pub patch: PatchConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_instrument() {
        let config = SynthConfig::default();
        assert_eq!(config.scheduler.gate_delay(), Duration::from_millis(10));
        assert_eq!(config.scheduler.frequency_ramp(), Duration::from_millis(100));
        assert_eq!(config.scheduler.octave_bounds(), -2..=3);
        assert_eq!(config.scheduler.oscillators.len(), 3);
        assert_eq!(config.patch.reverb_mix, 0.3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "scheduler": { "gate_delay_ms": 25 }, "patch": { "reverb_mix": 0.5 } }"#;
        let config: SynthConfig = serde_json::from_str(json).expect("valid config");
        assert_eq!(config.scheduler.gate_delay_ms, 25);
        assert_eq!(config.scheduler.frequency_ramp_ms, 100);
        assert_eq!(config.patch.reverb_mix, 0.5);
        assert_eq!(config.patch.envelope, EnvelopeShape::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn zero_gate_delay_is_raised_to_minimum() {
        let json = r#"{ "scheduler": { "gate_delay_ms": 0 } }"#;
        let config: SynthConfig = serde_json::from_str(json).expect("valid config");
        assert_eq!(config.scheduler.gate_delay_ms, 0);
        assert_eq!(config.scheduler.gate_delay(), MIN_GATE_DELAY);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn oscillator_roles_use_snake_case() {
        let json = r#"{ "oscillators": ["primary", "sub_octave"] }"#;
        let config: SchedulerConfig = serde_json::from_str(json).expect("valid config");
        assert_eq!(config.oscillators, vec![VoiceRole::Primary, VoiceRole::SubOctave]);
    }
}
