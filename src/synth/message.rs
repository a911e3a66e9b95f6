#[cfg(feature = "rtrb")]
use rtrb::Consumer;
use std::collections::VecDeque;

use crate::engine::EnvelopeShape;

/// Control input for a [`VoiceController`](super::VoiceController).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    /// A keyboard key went down; transposed by the controller's octave shift.
    Press { key: u8 },
    /// A keyboard key came up; releases whatever note its press produced.
    Release { key: u8 },
    NoteOn { pitch: u8, octave_shift: i32 },
    /// Release by transposed note number.
    NoteOff { pitch: u8 },
    SetOctaveShift(i32),
    ShiftOctave(i32),
    FilterCutoff(f32),
    ReverbMix(f32),
    Envelope(EnvelopeShape),
    AllNotesOff,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

impl MessageReceiver for VecDeque<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        self.pop_front()
    }
}
