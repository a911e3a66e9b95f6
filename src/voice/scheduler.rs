use log::{debug, trace};

use super::{
    command::{Command, GateAction, GateCommand},
    slots::SlotPool,
};
use crate::{
    config::{SchedulerConfig, VoiceRole},
    pitch::{midi_to_frequency, sub_octave, transpose, OctaveShift},
};

/*
Voice-Gate Scheduling
=====================

The engine behind this scheduler has one amplitude envelope shared by every
oscillator, so "polyphony" here means bookkeeping: which notes are held, and
whether the one gate should be open.

  slot pool   11 optional note numbers. A press takes the first free slot;
              a release clears every slot holding that note.

  gate        Closed immediately on every note-on so the envelope restarts,
              then reopened after `gate_delay`. Closing and reopening in the
              same control tick can be merged by the envelope and lose the
              attack, hence the delay.

  release     When the last distinguishable note is cleared, a close is
              scheduled after `gate_delay`, letting an overlapping note-on's
              reopen land first.


Timeline of one note (gate_delay = 10 ms)
-----------------------------------------

    t=0     note_on(60)    close ──────┐
                                       │ 10 ms
    t=10                   open  ◄─────┘
    t=500   note_off(60)   (nothing yet)
    t=510                  close


Settle Rule
-----------

Deferred commands are never cancelled. Instead, when one fires:

    deferred open     always applied (every press gets its attack edge)
    deferred close    dropped while any note is still held

so a release racing a newer press cannot shut the gate under the new note.
*/

/// Input to the decision function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceEvent {
    NoteOn { pitch: u8, octave_shift: i32 },
    /// `pitch` is the transposed note stored at note-on.
    NoteOff { pitch: u8 },
    AllNotesOff,
}

/// Outcome of one event: the new pool and the side effects to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub pool: SlotPool,
    pub commands: Vec<Command>,
    /// The transposed note for note-on events.
    pub note: Option<u8>,
    /// Slot taken by a note-on, `None` when the pool was full.
    pub slot: Option<usize>,
}

/// Pure scheduling step: `(pool, event) -> (pool', commands)`.
pub fn decide(pool: &SlotPool, event: VoiceEvent, config: &SchedulerConfig) -> Decision {
    let mut pool = *pool;
    let mut commands = Vec::new();

    match event {
        VoiceEvent::NoteOn {
            pitch,
            octave_shift,
        } => {
            let shift = OctaveShift::new(config.octave_bounds()).clamp(octave_shift);
            let note = transpose(pitch, shift);

            commands.push(Command::Gate(GateCommand::now(GateAction::Close)));

            let primary = midi_to_frequency(note);
            let secondary = midi_to_frequency(sub_octave(note));
            for (voice, role) in config.oscillators.iter().enumerate() {
                let hz = match role {
                    VoiceRole::Primary => primary,
                    VoiceRole::SubOctave => secondary,
                };
                commands.push(Command::SetFrequency {
                    voice,
                    hz,
                    ramp: config.frequency_ramp(),
                });
            }
            for voice in 0..config.oscillators.len() {
                commands.push(Command::SetAmplitude {
                    voice,
                    level: config.amplitude,
                    ramp: std::time::Duration::ZERO,
                });
            }

            let slot = pool.insert(note);
            commands.push(Command::Gate(GateCommand::after(
                GateAction::Open,
                config.gate_delay(),
            )));

            Decision {
                pool,
                commands,
                note: Some(note),
                slot,
            }
        }

        VoiceEvent::NoteOff { pitch } => {
            if pool.clear(pitch) > 0 && pool.distinct_values() <= 1 {
                commands.push(Command::Gate(GateCommand::after(
                    GateAction::Close,
                    config.gate_delay(),
                )));
            }
            Decision {
                pool,
                commands,
                note: None,
                slot: None,
            }
        }

        VoiceEvent::AllNotesOff => {
            pool.clear_all();
            commands.push(Command::Gate(GateCommand::now(GateAction::Close)));
            Decision {
                pool,
                commands,
                note: None,
                slot: None,
            }
        }
    }
}

/// Stateful owner of the slot pool, octave shift and gate flag.
///
/// Each note call returns the commands to execute. Gate commands are run
/// back through [`VoiceGateScheduler::resolve`] when they take effect so the
/// gate flag tracks what the engine was actually told.
#[derive(Debug, Clone)]
pub struct VoiceGateScheduler {
    config: SchedulerConfig,
    pool: SlotPool,
    octave: OctaveShift,
    gate_open: bool,
    primary_hz: f32,
    secondary_hz: f32,
}

impl VoiceGateScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        let octave = OctaveShift::new(config.octave_bounds());
        Self {
            config,
            pool: SlotPool::new(),
            octave,
            gate_open: false,
            primary_hz: midi_to_frequency(69),
            secondary_hz: midi_to_frequency(sub_octave(69)),
        }
    }

    /// Start a note. Returns `(transposed note, commands)`.
    pub fn note_on(&mut self, pitch: u8, octave_shift: i32) -> (u8, Vec<Command>) {
        let decision = self.apply(VoiceEvent::NoteOn {
            pitch,
            octave_shift,
        });
        let note = decision.note.unwrap_or(pitch);

        self.primary_hz = midi_to_frequency(note);
        self.secondary_hz = midi_to_frequency(sub_octave(note));

        match decision.slot {
            Some(slot) => debug!("note on {note} (pitch {pitch}) -> slot {slot}"),
            None => debug!("note on {note} (pitch {pitch}): slot pool full, not tracked"),
        }
        (note, decision.commands)
    }

    /// Release a transposed note. An absent note is a no-op.
    pub fn note_off(&mut self, pitch: u8) -> Vec<Command> {
        let decision = self.apply(VoiceEvent::NoteOff { pitch });
        debug!(
            "note off {pitch}: {} held, close scheduled: {}",
            self.pool.occupied(),
            !decision.commands.is_empty()
        );
        decision.commands
    }

    pub fn all_notes_off(&mut self) -> Vec<Command> {
        debug!("all notes off");
        self.apply(VoiceEvent::AllNotesOff).commands
    }

    fn apply(&mut self, event: VoiceEvent) -> Decision {
        let decision = decide(&self.pool, event, &self.config);
        self.pool = decision.pool;
        debug_assert!(self.pool.occupied() <= super::slots::SLOT_COUNT);
        decision
    }

    /// Decide whether a gate command takes effect now that it is due.
    ///
    /// Returns the action to send to the engine, or `None` when the settle
    /// rule drops it.
    pub fn resolve(&mut self, gate: GateCommand) -> Option<GateAction> {
        if gate.is_deferred() && gate.action == GateAction::Close && !self.pool.is_empty() {
            trace!("deferred close dropped, {} notes held", self.pool.occupied());
            return None;
        }
        self.gate_open = gate.action == GateAction::Open;
        trace!("gate {:?}", gate.action);
        Some(gate.action)
    }

    pub fn set_octave_shift(&mut self, shift: i32) -> i32 {
        self.octave.set(shift)
    }

    pub fn shift_octave(&mut self, delta: i32) -> i32 {
        self.octave.shift_by(delta)
    }

    pub fn octave_shift(&self) -> i32 {
        self.octave.value()
    }

    pub fn pool(&self) -> &SlotPool {
        &self.pool
    }

    pub fn gate_open(&self) -> bool {
        self.gate_open
    }

    /// Last published `(primary, sub-octave)` frequency targets.
    pub fn frequencies(&self) -> (f32, f32) {
        (self.primary_hz, self.secondary_hz)
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn gates(commands: &[Command]) -> Vec<GateCommand> {
        commands.iter().filter_map(Command::gate).collect()
    }

    #[test]
    fn note_on_closes_then_reopens_after_delay() {
        let config = SchedulerConfig::default();
        let decision = decide(
            &SlotPool::new(),
            VoiceEvent::NoteOn {
                pitch: 60,
                octave_shift: 0,
            },
            &config,
        );

        assert_eq!(
            decision.commands.first(),
            Some(&Command::Gate(GateCommand::now(GateAction::Close)))
        );
        assert_eq!(
            decision.commands.last(),
            Some(&Command::Gate(GateCommand::after(
                GateAction::Open,
                Duration::from_millis(10)
            )))
        );
        assert_eq!(gates(&decision.commands).len(), 2);
        assert_eq!(decision.slot, Some(0));
        assert!(decision.pool.contains(60));
    }

    #[test]
    fn note_on_publishes_primary_and_sub_octave() {
        let config = SchedulerConfig::default();
        let decision = decide(
            &SlotPool::new(),
            VoiceEvent::NoteOn {
                pitch: 69,
                octave_shift: 0,
            },
            &config,
        );

        let frequencies: Vec<(usize, f32, Duration)> = decision
            .commands
            .iter()
            .filter_map(|command| match command {
                Command::SetFrequency { voice, hz, ramp } => Some((*voice, *hz, *ramp)),
                _ => None,
            })
            .collect();
        let ramp = Duration::from_millis(100);
        assert_eq!(
            frequencies,
            vec![(0, 440.0, ramp), (1, 440.0, ramp), (2, 220.0, ramp)]
        );

        let amplitudes = decision
            .commands
            .iter()
            .filter(|command| {
                matches!(command, Command::SetAmplitude { level, ramp, .. }
                    if *level == 0.2 && ramp.is_zero())
            })
            .count();
        assert_eq!(amplitudes, 3);
    }

    #[test]
    fn note_on_transposes_and_clamps() {
        let config = SchedulerConfig::default();
        let on = |pitch, octave_shift| {
            decide(
                &SlotPool::new(),
                VoiceEvent::NoteOn {
                    pitch,
                    octave_shift,
                },
                &config,
            )
            .note
        };
        assert_eq!(on(60, 2), Some(84));
        assert_eq!(on(60, 10), Some(96));
        assert_eq!(on(10, -2), Some(0));
        assert_eq!(on(127, 3), Some(127));
    }

    #[test]
    fn full_pool_still_retriggers() {
        let config = SchedulerConfig::default();
        let mut pool = SlotPool::new();
        for note in 40..51 {
            pool.insert(note);
        }
        let decision = decide(
            &pool,
            VoiceEvent::NoteOn {
                pitch: 72,
                octave_shift: 0,
            },
            &config,
        );
        assert_eq!(decision.slot, None);
        assert_eq!(decision.pool, pool);
        assert_eq!(gates(&decision.commands).len(), 2);
    }

    #[test]
    fn last_release_schedules_close() {
        let config = SchedulerConfig::default();
        let mut pool = SlotPool::new();
        pool.insert(60);
        let decision = decide(&pool, VoiceEvent::NoteOff { pitch: 60 }, &config);
        assert!(decision.pool.is_empty());
        assert_eq!(
            gates(&decision.commands),
            vec![GateCommand::after(
                GateAction::Close,
                Duration::from_millis(10)
            )]
        );
    }

    #[test]
    fn release_with_notes_left_schedules_nothing() {
        let config = SchedulerConfig::default();
        let mut pool = SlotPool::new();
        pool.insert(60);
        pool.insert(64);
        let decision = decide(&pool, VoiceEvent::NoteOff { pitch: 60 }, &config);
        assert!(decision.commands.is_empty());
        assert_eq!(decision.pool.active_notes().collect::<Vec<_>>(), vec![64]);
    }

    #[test]
    fn releasing_absent_note_is_a_no_op() {
        let config = SchedulerConfig::default();
        let mut pool = SlotPool::new();
        pool.insert(60);
        let decision = decide(&pool, VoiceEvent::NoteOff { pitch: 61 }, &config);
        assert_eq!(decision.pool, pool);
        assert!(decision.commands.is_empty());
    }

    #[test]
    fn deferred_close_dropped_while_notes_held() {
        let mut scheduler = VoiceGateScheduler::new(SchedulerConfig::default());
        scheduler.note_on(60, 0);
        let close = GateCommand::after(GateAction::Close, Duration::from_millis(10));
        assert_eq!(scheduler.resolve(close), None);

        scheduler.note_off(60);
        assert_eq!(scheduler.resolve(close), Some(GateAction::Close));
        assert!(!scheduler.gate_open());
    }

    #[test]
    fn immediate_close_always_applies() {
        let mut scheduler = VoiceGateScheduler::new(SchedulerConfig::default());
        scheduler.note_on(60, 0);
        scheduler.resolve(GateCommand::after(GateAction::Open, Duration::from_millis(10)));
        assert!(scheduler.gate_open());
        assert_eq!(
            scheduler.resolve(GateCommand::now(GateAction::Close)),
            Some(GateAction::Close)
        );
        assert!(!scheduler.gate_open());
    }

    #[test]
    fn scheduler_tracks_frequencies_and_octave() {
        let mut scheduler = VoiceGateScheduler::new(SchedulerConfig::default());
        assert_eq!(scheduler.set_octave_shift(10), 3);
        assert_eq!(scheduler.shift_octave(-1), 2);

        let (note, _) = scheduler.note_on(57, -1);
        assert_eq!(note, 45);
        assert_eq!(scheduler.frequencies(), (110.0, 55.0));
    }

    #[test]
    fn all_notes_off_empties_pool_and_closes_now() {
        let mut scheduler = VoiceGateScheduler::new(SchedulerConfig::default());
        scheduler.note_on(60, 0);
        scheduler.note_on(64, 0);
        let commands = scheduler.all_notes_off();
        assert!(scheduler.pool().is_empty());
        assert_eq!(gates(&commands), vec![GateCommand::now(GateAction::Close)]);
    }
}
