//! Knob row widget - label, readout and travel gauge per parameter

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

use wernstrom::panel::{Panel, Param};

pub fn render_knobs(frame: &mut Frame, area: Rect, panel: &Panel, selected: usize) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, Param::ALL.len() as u32); Param::ALL.len()])
        .split(area);

    for (index, (param, column)) in Param::ALL.iter().zip(columns.iter()).enumerate() {
        let (label, readout) = panel.readout(*param);
        let is_selected = index == selected;

        let border_style = if is_selected {
            Style::default().fg(Color::Rgb(250, 168, 30))
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(format!(" {label} "))
            .borders(Borders::ALL)
            .border_style(border_style);

        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(if is_selected { Color::Cyan } else { Color::Blue }))
            .ratio(panel.knob(*param).normalized().clamp(0.0, 1.0) as f64)
            .label(readout);

        frame.render_widget(gauge, *column);
    }
}
