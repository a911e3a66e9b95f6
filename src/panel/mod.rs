// Purpose: the synth's knob row. Maps gestures to parameter values and
// parameter values to engine messages.

pub mod knob;

pub use knob::Knob;

use crate::{config::PatchConfig, engine::EnvelopeShape, synth::ControlMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Cutoff,
    Attack,
    Decay,
    Sustain,
    Release,
    Reverb,
}

impl Param {
    /// Left-to-right panel order.
    pub const ALL: [Param; 6] = [
        Param::Cutoff,
        Param::Attack,
        Param::Decay,
        Param::Sustain,
        Param::Release,
        Param::Reverb,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Param::Cutoff => "Filter",
            Param::Attack => "Attack",
            Param::Decay => "Decay",
            Param::Sustain => "Sustain",
            Param::Release => "Release",
            Param::Reverb => "Reverb",
        }
    }

    pub fn range(&self) -> std::ops::RangeInclusive<f32> {
        match self {
            Param::Cutoff => 12.0..=12_000.0,
            Param::Attack | Param::Decay | Param::Release => 0.0..=10.0,
            Param::Sustain | Param::Reverb => 0.0..=1.0,
        }
    }

    /// Display text for `value`: cutoff in whole Hz, reverb as a percentage.
    pub fn format(&self, value: f32) -> String {
        match self {
            Param::Cutoff => format!("{}", value as i32),
            Param::Reverb => format!("{:.2}", value * 100.0),
            _ => format!("{:.2}", value),
        }
    }

    fn index(&self) -> usize {
        Param::ALL.iter().position(|p| p == self).unwrap_or(0)
    }
}

pub struct Panel {
    knobs: [Knob; 6],
}

impl Panel {
    pub fn new(patch: &PatchConfig) -> Self {
        let envelope = patch.envelope;
        let knobs = Param::ALL.map(|param| {
            let value = match param {
                Param::Cutoff => patch.cutoff_hz,
                Param::Attack => envelope.attack,
                Param::Decay => envelope.decay,
                Param::Sustain => envelope.sustain,
                Param::Release => envelope.release,
                Param::Reverb => patch.reverb_mix,
            };
            Knob::new(value, param.range())
        });
        Self { knobs }
    }

    pub fn knob(&self, param: Param) -> &Knob {
        &self.knobs[param.index()]
    }

    /// Drag one knob; returns the engine message when its value changed.
    pub fn drag(&mut self, param: Param, dx: f32, dy: f32, extent: f32) -> Option<ControlMessage> {
        if self.knobs[param.index()].drag(dx, dy, extent) {
            Some(self.message(param))
        } else {
            None
        }
    }

    pub fn set(&mut self, param: Param, value: f32) -> ControlMessage {
        self.knobs[param.index()].set(value);
        self.message(param)
    }

    pub fn envelope(&self) -> EnvelopeShape {
        EnvelopeShape::adsr(
            self.knob(Param::Attack).value(),
            self.knob(Param::Decay).value(),
            self.knob(Param::Sustain).value(),
            self.knob(Param::Release).value(),
        )
    }

    /// Message that brings the engine in line with `param`'s knob.
    pub fn message(&self, param: Param) -> ControlMessage {
        match param {
            Param::Cutoff => ControlMessage::FilterCutoff(self.knob(param).value()),
            Param::Reverb => ControlMessage::ReverbMix(self.knob(param).value()),
            Param::Attack | Param::Decay | Param::Sustain | Param::Release => {
                ControlMessage::Envelope(self.envelope())
            }
        }
    }

    /// Label and formatted value, e.g. ("Filter", "1200").
    pub fn readout(&self, param: Param) -> (&'static str, String) {
        (param.label(), param.format(self.knob(param).value()))
    }
}
