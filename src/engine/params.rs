use std::time::Duration;

use super::{EnvelopeShape, SynthControl};

/*
Control-Rate Parameter Model
============================

`ParameterEngine` stands where a real audio engine would: it accepts the
same control calls and keeps the values they produce, advanced in wall-clock
steps instead of samples. It renders no audio. The terminal front end reads
it to show what the engine would be doing.

A ramp moves linearly from wherever it currently is to the new target:

  value
    t ┤            ●━━━━━━━━
      │          ╱
      │        ╱
    s ┤━━━━━━●
      └──────┴─────┴───────→ time
           set()  set() + duration

Setting a new target mid-ramp restarts from the current value, so glides
never jump. A zero duration lands on the target immediately.
*/

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    start: f32,
    target: f32,
    current: f32,
    elapsed: f32,  // seconds since set()
    duration: f32, // seconds for the whole glide
}

impl Ramp {
    pub fn new(value: f32) -> Self {
        Self {
            start: value,
            target: value,
            current: value,
            elapsed: 0.0,
            duration: 0.0,
        }
    }

    pub fn set(&mut self, target: f32, duration: Duration) {
        self.start = self.current;
        self.target = target;
        self.elapsed = 0.0;
        self.duration = duration.as_secs_f32();
        if self.duration <= 0.0 {
            self.current = target;
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.is_settled() {
            return;
        }
        self.elapsed += dt.as_secs_f32();
        if self.elapsed >= self.duration {
            self.current = self.target;
        } else {
            let progress = self.elapsed / self.duration;
            self.current = self.start + (self.target - self.start) * progress;
        }
    }

    pub fn value(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorState {
    pub frequency: Ramp,
    pub amplitude: Ramp,
}

pub struct ParameterEngine {
    oscillators: Vec<OscillatorState>,
    gate_open: bool,
    gate_opens: u64,
    envelope: EnvelopeShape,
    cutoff_hz: f32,
    reverb_mix: f32,
}

impl ParameterEngine {
    pub fn new(voices: usize) -> Self {
        let oscillator = OscillatorState {
            frequency: Ramp::new(440.0),
            amplitude: Ramp::new(0.0),
        };
        Self {
            oscillators: vec![oscillator; voices],
            gate_open: false,
            gate_opens: 0,
            envelope: EnvelopeShape::default(),
            cutoff_hz: 20_000.0,
            reverb_mix: 0.3,
        }
    }

    /// Move every ramp forward by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        for oscillator in &mut self.oscillators {
            oscillator.frequency.advance(dt);
            oscillator.amplitude.advance(dt);
        }
    }

    pub fn oscillators(&self) -> &[OscillatorState] {
        &self.oscillators
    }

    pub fn gate_open(&self) -> bool {
        self.gate_open
    }

    /// How many closed→open edges the envelope has seen.
    pub fn gate_opens(&self) -> u64 {
        self.gate_opens
    }

    pub fn envelope(&self) -> EnvelopeShape {
        self.envelope
    }

    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn reverb_mix(&self) -> f32 {
        self.reverb_mix
    }
}

impl SynthControl for ParameterEngine {
    fn set_frequency(&mut self, voice: usize, hz: f32, ramp: Duration) {
        if let Some(oscillator) = self.oscillators.get_mut(voice) {
            oscillator.frequency.set(hz.max(0.0), ramp);
        }
    }

    fn set_amplitude(&mut self, voice: usize, level: f32, ramp: Duration) {
        if let Some(oscillator) = self.oscillators.get_mut(voice) {
            oscillator.amplitude.set(level.clamp(0.0, 1.0), ramp);
        }
    }

    fn open_gate(&mut self) {
        if !self.gate_open {
            self.gate_opens += 1;
        }
        self.gate_open = true;
    }

    fn close_gate(&mut self) {
        self.gate_open = false;
    }

    fn set_filter_cutoff(&mut self, hz: f32) {
        self.cutoff_hz = hz.max(0.0);
    }

    fn set_reverb_mix(&mut self, ratio: f32) {
        self.reverb_mix = ratio.clamp(0.0, 1.0);
    }

    fn set_envelope(&mut self, shape: EnvelopeShape) {
        self.envelope = shape;
    }
}
