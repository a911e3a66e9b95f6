//! Slot strip widget - one cell per finger slot

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use wernstrom::pitch::note_name;

use super::SessionSnapshot;

const CELL_WIDTH: usize = 6;

pub fn render_slots(frame: &mut Frame, area: Rect, state: Option<&SessionSnapshot>) {
    let title = match state {
        Some(state) if state.voice.pending > 0 => format!(" Slots ({} gate pending) ", state.voice.pending),
        _ => " Slots ".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let mut spans = vec![Span::raw(" ")];
    if let Some(state) = state {
        for slot in &state.voice.slots {
            let span = match slot {
                Some(note) => Span::styled(
                    format!("{:^width$}", note_name(*note), width = CELL_WIDTH),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Rgb(250, 168, 30))
                        .add_modifier(Modifier::BOLD),
                ),
                None => Span::styled(
                    format!("{:^width$}", "·", width = CELL_WIDTH),
                    Style::default().fg(Color::DarkGray),
                ),
            };
            spans.push(span);
            spans.push(Span::raw(" "));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
