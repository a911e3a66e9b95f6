use log::{debug, info};
use std::time::Duration;

use super::message::{ControlMessage, MessageReceiver};
use crate::{
    config::SynthConfig,
    engine::{EnvelopeShape, SynthControl},
    voice::{
        Command, DelayQueue, GateAction, GateCommand, VoiceGateScheduler, SLOT_COUNT,
    },
};

/// Copyable view of the voice state, cheap enough to ship across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSnapshot {
    pub slots: [Option<u8>; SLOT_COUNT],
    pub gate_open: bool,
    pub octave_shift: i32,
    pub primary_hz: f32,
    pub secondary_hz: f32,
    /// Deferred gate commands not yet fired.
    pub pending: usize,
    pub now: Duration,
}

/// Drives an engine from note events.
///
/// Owns the scheduler, the deferred gate queue and the engine. Immediate
/// commands are applied inside the note call; deferred ones fire from
/// [`advance_to`](Self::advance_to). All calls must come from one thread.
pub struct VoiceController<E: SynthControl> {
    scheduler: VoiceGateScheduler,
    pending: DelayQueue<GateCommand>,
    engine: E,
    // raw key -> transposed note it sounded
    held_keys: [Option<u8>; 128],
    now: Duration,
}

impl<E: SynthControl> VoiceController<E> {
    /// Build a controller and push the initial patch to `engine`.
    pub fn new(config: &SynthConfig, mut engine: E) -> Self {
        engine.set_filter_cutoff(config.patch.cutoff_hz);
        engine.set_reverb_mix(config.patch.reverb_mix);
        engine.set_envelope(config.patch.envelope);

        Self {
            scheduler: VoiceGateScheduler::new(config.scheduler.clone()),
            pending: DelayQueue::new(),
            engine,
            held_keys: [None; 128],
            now: Duration::ZERO,
        }
    }

    /// Play keyboard key `key` at the current octave shift.
    ///
    /// A key that is already down is ignored, so auto-repeat does not
    /// retrigger. Returns the transposed note for a new press.
    pub fn press(&mut self, key: u8) -> Option<u8> {
        let held = self.held_keys.get_mut(key as usize)?;
        if held.is_some() {
            return None;
        }
        let shift = self.scheduler.octave_shift();
        let (note, commands) = self.scheduler.note_on(key, shift);
        self.held_keys[key as usize] = Some(note);
        self.execute(commands);
        Some(note)
    }

    /// Release keyboard key `key`, sending note-off for the note its press
    /// produced even if the octave shift has changed since.
    pub fn release(&mut self, key: u8) -> Option<u8> {
        let note = self.held_keys.get_mut(key as usize)?.take()?;
        let commands = self.scheduler.note_off(note);
        self.execute(commands);
        Some(note)
    }

    /// Low-level note-on, bypassing the keyboard map. Returns the transposed note.
    pub fn note_on(&mut self, pitch: u8, octave_shift: i32) -> u8 {
        let (note, commands) = self.scheduler.note_on(pitch, octave_shift);
        self.execute(commands);
        note
    }

    /// Low-level note-off by transposed note.
    pub fn note_off(&mut self, pitch: u8) {
        let commands = self.scheduler.note_off(pitch);
        self.execute(commands);
    }

    /// Silence everything now. Pending deferred gate commands are dropped.
    pub fn all_notes_off(&mut self) {
        self.pending.clear();
        self.held_keys = [None; 128];
        let commands = self.scheduler.all_notes_off();
        self.execute(commands);
    }

    pub fn set_octave_shift(&mut self, shift: i32) -> i32 {
        let shift = self.scheduler.set_octave_shift(shift);
        info!("octave shift {shift}");
        shift
    }

    pub fn shift_octave(&mut self, delta: i32) -> i32 {
        let shift = self.scheduler.shift_octave(delta);
        info!("octave shift {shift}");
        shift
    }

    pub fn octave_shift(&self) -> i32 {
        self.scheduler.octave_shift()
    }

    pub fn set_filter_cutoff(&mut self, hz: f32) {
        self.engine.set_filter_cutoff(hz);
    }

    pub fn set_reverb_mix(&mut self, ratio: f32) {
        self.engine.set_reverb_mix(ratio);
    }

    pub fn set_envelope(&mut self, shape: EnvelopeShape) {
        self.engine.set_envelope(shape);
    }

    /// Apply every queued message in arrival order.
    pub fn process_messages(&mut self, rx: &mut impl MessageReceiver) {
        while let Some(message) = rx.pop() {
            self.handle(message);
        }
    }

    /// One control tick: move the clock to `now`, then apply queued messages
    /// so the gate commands they produce are timed from `now`.
    pub fn tick(&mut self, now: Duration, rx: &mut impl MessageReceiver) {
        self.advance_to(now);
        self.process_messages(rx);
    }

    pub fn handle(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::Press { key } => {
                self.press(key);
            }
            ControlMessage::Release { key } => {
                self.release(key);
            }
            ControlMessage::NoteOn {
                pitch,
                octave_shift,
            } => {
                self.note_on(pitch, octave_shift);
            }
            ControlMessage::NoteOff { pitch } => self.note_off(pitch),
            ControlMessage::SetOctaveShift(shift) => {
                self.set_octave_shift(shift);
            }
            ControlMessage::ShiftOctave(delta) => {
                self.shift_octave(delta);
            }
            ControlMessage::FilterCutoff(hz) => self.set_filter_cutoff(hz),
            ControlMessage::ReverbMix(ratio) => self.set_reverb_mix(ratio),
            ControlMessage::Envelope(shape) => self.set_envelope(shape),
            ControlMessage::AllNotesOff => self.all_notes_off(),
        }
    }

    /// Move the clock to `now` and fire every deferred gate command due by
    /// then. A clock that goes backwards is held where it was.
    pub fn advance_to(&mut self, now: Duration) {
        self.now = self.now.max(now);
        while let Some((_, gate)) = self.pending.pop_due(self.now) {
            if let Some(action) = self.scheduler.resolve(gate) {
                self.apply_gate(action);
            }
        }

        debug_assert!(
            !self.is_settled() || self.scheduler.gate_open() != self.scheduler.pool().is_empty(),
            "settled gate must be open exactly while notes are held"
        );
    }

    pub fn advance(&mut self, dt: Duration) {
        self.advance_to(self.now.saturating_add(dt));
    }

    /// Run the clock forward until no deferred command is pending.
    pub fn settle(&mut self) {
        while let Some(deadline) = self.pending.next_deadline() {
            self.advance_to(deadline);
        }
    }

    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest deadline among pending gate commands.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.next_deadline()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn snapshot(&self) -> VoiceSnapshot {
        let (primary_hz, secondary_hz) = self.scheduler.frequencies();
        VoiceSnapshot {
            slots: *self.scheduler.pool().slots(),
            gate_open: self.scheduler.gate_open(),
            octave_shift: self.scheduler.octave_shift(),
            primary_hz,
            secondary_hz,
            pending: self.pending.len(),
            now: self.now,
        }
    }

    pub fn scheduler(&self) -> &VoiceGateScheduler {
        &self.scheduler
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    fn execute(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::SetFrequency { voice, hz, ramp } => {
                    self.engine.set_frequency(voice, hz, ramp)
                }
                Command::SetAmplitude { voice, level, ramp } => {
                    self.engine.set_amplitude(voice, level, ramp)
                }
                Command::Gate(gate) if gate.is_deferred() => {
                    debug!("gate {:?} due at {:?}", gate.action, self.now + gate.after);
                    self.pending.schedule(self.now, gate.after, gate);
                }
                Command::Gate(gate) => {
                    if let Some(action) = self.scheduler.resolve(gate) {
                        self.apply_gate(action);
                    }
                }
            }
        }
    }

    fn apply_gate(&mut self, action: GateAction) {
        match action {
            GateAction::Open => self.engine.open_gate(),
            GateAction::Close => self.engine.close_gate(),
        }
    }
}
