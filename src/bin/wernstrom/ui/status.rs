//! Status bar widget - gate, octave, pitch targets and engine parameters

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::SessionSnapshot;

/// Render the status bar
pub fn render_status(frame: &mut Frame, area: Rect, state: Option<&SessionSnapshot>) {
    let block = Block::default().title(" wernstrom ").borders(Borders::ALL);

    let Some(state) = state else {
        let waiting = Paragraph::new(" waiting for control thread...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(waiting, area);
        return;
    };

    let voice = &state.voice;
    let (gate_symbol, gate_label, gate_color) = if voice.gate_open {
        ("●", "OPEN  ", Color::Green)
    } else {
        ("○", "closed", Color::DarkGray)
    };

    let held = voice.slots.iter().flatten().count();

    let oscillators = state.oscillator_hz[..state.oscillator_count as usize]
        .iter()
        .map(|hz| format!("{hz:.1}"))
        .collect::<Vec<_>>()
        .join(" / ");

    let line = Line::from(vec![
        Span::styled(
            format!(" {gate_symbol} Gate {gate_label}  "),
            Style::default().fg(gate_color),
        ),
        Span::styled(
            format!("Octave: {:+}  ", voice.octave_shift),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Held: {held:2}/{}  ", voice.slots.len()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Osc Hz: {oscillators}  "),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("Attacks: {}  ", state.gate_opens),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!(
                "Cutoff {:.0} Hz  Mix {:.0}%  ADSR {:.2}/{:.2}/{:.2}/{:.2}",
                state.cutoff_hz,
                state.reverb_mix * 100.0,
                state.envelope.attack,
                state.envelope.decay,
                state.envelope.sustain,
                state.envelope.release,
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
