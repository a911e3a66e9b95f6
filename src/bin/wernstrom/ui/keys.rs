//! Keyboard widget - the two-octave surface with the computer key for each note

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::{collections::HashMap, time::Instant};

use wernstrom::synth::keyboard::{is_sharp, key_for_char, PIANO_RANGE};

const KEY_CHARS: &str = "zsxdcvgbhnjmq2w3er5t6y7u";

/// Computer key that plays piano key `key`
fn char_for_key(key: u8) -> char {
    KEY_CHARS
        .chars()
        .find(|&c| key_for_char(c) == Some(key))
        .unwrap_or(' ')
}

pub fn render_keys(frame: &mut Frame, area: Rect, held: &HashMap<u8, Instant>) {
    let block = Block::default().title(" Keys ").borders(Borders::ALL);

    let mut upper = vec![Span::raw(" ")];
    let mut lower = vec![Span::raw(" ")];
    for key in PIANO_RANGE {
        let pressed = held.contains_key(&key);
        let cell = format!(" {} ", char_for_key(key));
        let style = match (pressed, is_sharp(key)) {
            (true, _) => Style::default().fg(Color::Black).bg(Color::Rgb(250, 168, 30)),
            (false, true) => Style::default().fg(Color::White).bg(Color::Black),
            (false, false) => Style::default().fg(Color::Black).bg(Color::Gray),
        };
        // sharps sit on the top row, naturals on the bottom
        if is_sharp(key) {
            upper.push(Span::styled(cell, style));
            lower.push(Span::raw("   "));
        } else {
            upper.push(Span::raw("   "));
            lower.push(Span::styled(cell, style));
        }
    }

    let paragraph = Paragraph::new(vec![Line::from(upper), Line::from(lower)]).block(block);
    frame.render_widget(paragraph, area);
}
