//! Pitch helpers: MIDI note → Hz, octave transposition, bounded octave shift.

use std::ops::RangeInclusive;

/// Highest MIDI note number.
pub const MIDI_MAX: u8 = 127;

/// A4 = 440 Hz = MIDI note 69
const A4_NOTE: i32 = 69;
const A4_HZ: f32 = 440.0;

/// Convert a MIDI note number to frequency in Hz.
///
/// The octave part is applied as an exact power of two, so a note twelve
/// semitones lower is always exactly half the frequency.
#[inline]
pub fn midi_to_frequency(note: u8) -> f32 {
    let offset = note as i32 - A4_NOTE;
    let octaves = offset.div_euclid(12);
    let semitones = offset.rem_euclid(12);
    let ratio = 2.0_f32.powf(semitones as f32 / 12.0);
    (A4_HZ * ratio) * 2.0_f32.powi(octaves)
}

/// Shift `pitch` by whole octaves and clamp into the MIDI range.
#[inline]
pub fn transpose(pitch: u8, octave_shift: i32) -> u8 {
    (pitch as i32)
        .saturating_add(octave_shift.saturating_mul(12))
        .clamp(0, MIDI_MAX as i32) as u8
}

/// The sub-octave companion of `note`, floored at note 0.
#[inline]
pub fn sub_octave(note: u8) -> u8 {
    note.saturating_sub(12)
}

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Scientific pitch name, middle C (60) = "C4".
pub fn note_name(note: u8) -> String {
    let octave = note as i32 / 12 - 1;
    format!("{}{}", NOTE_NAMES[note as usize % 12], octave)
}

/// Octave transposition bounded to a configured range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OctaveShift {
    value: i32,
    bounds: RangeInclusive<i32>,
}

impl OctaveShift {
    /// Starts at 0, or at the nearest bound when 0 lies outside `bounds`.
    /// Reversed bounds are swapped.
    pub fn new(bounds: RangeInclusive<i32>) -> Self {
        let (lo, hi) = (*bounds.start(), *bounds.end());
        let bounds = lo.min(hi)..=lo.max(hi);
        let value = 0_i32.clamp(*bounds.start(), *bounds.end());
        Self { value, bounds }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn bounds(&self) -> &RangeInclusive<i32> {
        &self.bounds
    }

    /// Clamp an arbitrary shift into the bounds without storing it.
    pub fn clamp(&self, shift: i32) -> i32 {
        shift.clamp(*self.bounds.start(), *self.bounds.end())
    }

    /// Set an absolute shift, returning the clamped value now in effect.
    pub fn set(&mut self, shift: i32) -> i32 {
        self.value = self.clamp(shift);
        self.value
    }

    /// Move by `delta` octaves, returning the clamped value now in effect.
    pub fn shift_by(&mut self, delta: i32) -> i32 {
        self.set(self.value.saturating_add(delta))
    }
}

impl Default for OctaveShift {
    fn default() -> Self {
        Self::new(-2..=3)
    }
}
