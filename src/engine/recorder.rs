use std::time::Duration;

use super::{EnvelopeShape, SynthControl};
use crate::voice::GateAction;

/// One call made through [`SynthControl`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineCall {
    SetFrequency { voice: usize, hz: f32, ramp: Duration },
    SetAmplitude { voice: usize, level: f32, ramp: Duration },
    Gate(GateAction),
    FilterCutoff(f32),
    ReverbMix(f32),
    Envelope(EnvelopeShape),
}

/// Engine stand-in that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    calls: Vec<EngineCall>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// Return and forget everything recorded so far.
    pub fn take_calls(&mut self) -> Vec<EngineCall> {
        std::mem::take(&mut self.calls)
    }

    /// Gate transitions only, in call order.
    pub fn gate_log(&self) -> Vec<GateAction> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                EngineCall::Gate(action) => Some(*action),
                _ => None,
            })
            .collect()
    }
}

impl SynthControl for RecordingEngine {
    fn set_frequency(&mut self, voice: usize, hz: f32, ramp: Duration) {
        self.calls.push(EngineCall::SetFrequency { voice, hz, ramp });
    }

    fn set_amplitude(&mut self, voice: usize, level: f32, ramp: Duration) {
        self.calls.push(EngineCall::SetAmplitude { voice, level, ramp });
    }

    fn open_gate(&mut self) {
        self.calls.push(EngineCall::Gate(GateAction::Open));
    }

    fn close_gate(&mut self) {
        self.calls.push(EngineCall::Gate(GateAction::Close));
    }

    fn set_filter_cutoff(&mut self, hz: f32) {
        self.calls.push(EngineCall::FilterCutoff(hz));
    }

    fn set_reverb_mix(&mut self, ratio: f32) {
        self.calls.push(EngineCall::ReverbMix(ratio));
    }

    fn set_envelope(&mut self, shape: EnvelopeShape) {
        self.calls.push(EngineCall::Envelope(shape));
    }
}
