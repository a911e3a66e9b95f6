//! State shipped from the control thread to the UI
//!
//! Copy-only so the control thread never allocates to publish it.

use wernstrom::{
    engine::{EnvelopeShape, ParameterEngine},
    synth::{VoiceController, VoiceSnapshot},
};

/// Oscillators shown in the UI; extra ones in a config are not displayed.
pub const MAX_OSCILLATORS: usize = 4;

#[derive(Clone, Copy, Debug)]
pub struct SessionSnapshot {
    pub voice: VoiceSnapshot,
    /// Current (gliding) frequency per oscillator
    pub oscillator_hz: [f32; MAX_OSCILLATORS],
    pub oscillator_count: u8,
    /// Closed → open edges seen by the engine
    pub gate_opens: u64,
    pub cutoff_hz: f32,
    pub reverb_mix: f32,
    pub envelope: EnvelopeShape,
}

impl SessionSnapshot {
    pub fn capture(controller: &VoiceController<ParameterEngine>) -> Self {
        let engine = controller.engine();
        let mut oscillator_hz = [0.0; MAX_OSCILLATORS];
        let oscillators = engine.oscillators();
        for (slot, oscillator) in oscillator_hz.iter_mut().zip(oscillators) {
            *slot = oscillator.frequency.value();
        }

        Self {
            voice: controller.snapshot(),
            oscillator_hz,
            oscillator_count: oscillators.len().min(MAX_OSCILLATORS) as u8,
            gate_opens: engine.gate_opens(),
            cutoff_hz: engine.cutoff_hz(),
            reverb_mix: engine.reverb_mix(),
            envelope: engine.envelope(),
        }
    }
}
