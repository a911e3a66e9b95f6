//! Two-octave piano surface, C4..B5, played from a computer keyboard.
//!
//! Lower octave on the bottom letter row with sharps above it, upper octave
//! on the top letter row with sharps on the digit row:
//!
//! ```text
//!  s d   g h j        2 3   5 6 7
//! z x c v b n m      q w e r t y u
//! ```

use std::ops::RangeInclusive;

pub const PIANO_RANGE: RangeInclusive<u8> = 60..=83;

const LOWER_OCTAVE: [char; 12] = ['z', 's', 'x', 'd', 'c', 'v', 'g', 'b', 'h', 'n', 'j', 'm'];
const UPPER_OCTAVE: [char; 12] = ['q', '2', 'w', '3', 'e', 'r', '5', 't', '6', 'y', '7', 'u'];

/// Piano key (untransposed MIDI note) played by `c`, if any.
pub fn key_for_char(c: char) -> Option<u8> {
    let c = c.to_ascii_lowercase();
    let low = *PIANO_RANGE.start();
    if let Some(index) = LOWER_OCTAVE.iter().position(|&k| k == c) {
        return Some(low + index as u8);
    }
    UPPER_OCTAVE
        .iter()
        .position(|&k| k == c)
        .map(|index| low + 12 + index as u8)
}

/// Whether `key` is a black key.
pub fn is_sharp(key: u8) -> bool {
    matches!(key % 12, 1 | 3 | 6 | 8 | 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_cover_the_whole_range() {
        let mut keys: Vec<u8> = LOWER_OCTAVE
            .iter()
            .chain(UPPER_OCTAVE.iter())
            .filter_map(|&c| key_for_char(c))
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, PIANO_RANGE.collect::<Vec<_>>());
    }

    #[test]
    fn landmarks() {
        assert_eq!(key_for_char('z'), Some(60));
        assert_eq!(key_for_char('Z'), Some(60));
        assert_eq!(key_for_char('s'), Some(61));
        assert_eq!(key_for_char('q'), Some(72));
        assert_eq!(key_for_char('u'), Some(83));
        assert_eq!(key_for_char('-'), None);
    }

    #[test]
    fn sharps() {
        assert!(is_sharp(61));
        assert!(!is_sharp(64));
        assert!(is_sharp(82));
    }
}
