//! TUI module for wernstrom
//!
//! Keyboard in, voice state out. All synthesis state lives on the control
//! thread; the UI only sends messages and draws the latest snapshot.

mod keys;
mod knobs;
mod slots;
pub mod state;
mod status;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer, PushError};
use std::{
    collections::HashMap,
    thread,
    time::{Duration, Instant},
};

use wernstrom::{
    panel::{Panel, Param},
    synth::keyboard::key_for_char,
    ControlMessage,
};

pub use state::SessionSnapshot;

use keys::render_keys;
use knobs::render_knobs;
use slots::render_slots;
use status::render_status;

/// Without key-up events a key counts as released this long after its last
/// press or auto-repeat. Longer than typical repeat delay so holds sustain.
const HOLD_FALLBACK: Duration = Duration::from_millis(550);
/// One arrow press drags the selected knob this many pixels...
const KNOB_STEP_PX: f32 = 2.0;
/// ...across a knob this many pixels wide (so 50 presses sweep the range).
const KNOB_EXTENT_PX: f32 = 100.0;

pub struct UiApp {
    /// Messages to the control thread
    tx: Producer<ControlMessage>,
    /// Snapshots from the control thread
    state_rx: Consumer<SessionSnapshot>,
    /// Latest snapshot, `None` until the first arrives
    current_state: Option<SessionSnapshot>,
    panel: Panel,
    selected: usize,
    /// Held piano keys and when they were last seen down
    held: HashMap<u8, Instant>,
    release_events: bool,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        tx: Producer<ControlMessage>,
        state_rx: Consumer<SessionSnapshot>,
        panel: Panel,
        release_events: bool,
    ) -> Self {
        Self {
            tx,
            state_rx,
            current_state: None,
            panel,
            selected: 0,
            held: HashMap::new(),
            release_events,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_state();
            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if !self.release_events {
                self.expire_held_keys();
            }
        }

        self.send(ControlMessage::AllNotesOff);
        Ok(())
    }

    /// Keep only the latest snapshot
    fn poll_state(&mut self) {
        while let Ok(state) = self.state_rx.pop() {
            self.current_state = Some(state);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let KeyCode::Char(c) = key.code {
            if let Some(piano_key) = key_for_char(c) {
                self.handle_piano_key(piano_key, key.kind);
                return;
            }
        }

        if key.kind == KeyEventKind::Release {
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('-') => self.send(ControlMessage::ShiftOctave(-1)),
            KeyCode::Char('=') | KeyCode::Char('+') => self.send(ControlMessage::ShiftOctave(1)),
            KeyCode::Left => {
                self.selected = (self.selected + Param::ALL.len() - 1) % Param::ALL.len();
            }
            KeyCode::Right => self.selected = (self.selected + 1) % Param::ALL.len(),
            // screen y grows downward, so "up" is a negative drag
            KeyCode::Up => self.drag_selected(-KNOB_STEP_PX),
            KeyCode::Down => self.drag_selected(KNOB_STEP_PX),
            _ => {}
        }
    }

    fn handle_piano_key(&mut self, key: u8, kind: KeyEventKind) {
        let now = Instant::now();
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if self.held.insert(key, now).is_none() {
                    self.send(ControlMessage::Press { key });
                }
            }
            KeyEventKind::Release => {
                if self.held.remove(&key).is_some() {
                    self.send(ControlMessage::Release { key });
                }
            }
        }
    }

    fn expire_held_keys(&mut self) {
        let now = Instant::now();
        let expired: Vec<u8> = self
            .held
            .iter()
            .filter(|(_, seen)| now.duration_since(**seen) >= HOLD_FALLBACK)
            .map(|(key, _)| *key)
            .collect();
        for key in expired {
            self.held.remove(&key);
            self.send(ControlMessage::Release { key });
        }
    }

    fn drag_selected(&mut self, dy: f32) {
        let param = Param::ALL[self.selected];
        if let Some(message) = self.panel.drag(param, 0.0, dy, KNOB_EXTENT_PX) {
            self.send(message);
        }
    }

    /// Push to the control thread, waiting briefly if the queue is full
    fn send(&mut self, message: ControlMessage) {
        let mut pending = message;
        loop {
            match self.tx.push(pending) {
                Ok(_) => break,
                Err(PushError::Full(returned)) => {
                    if self.tx.is_abandoned() {
                        log::warn!("control queue abandoned; dropping {:?}", returned);
                        break;
                    }
                    pending = returned;
                    thread::sleep(Duration::from_micros(200));
                }
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Gate, octave, pitch
                Constraint::Length(3), // Slot strip
                Constraint::Length(6), // Knob row
                Constraint::Min(6),    // Keyboard
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_status(frame, chunks[0], self.current_state.as_ref());
        render_slots(frame, chunks[1], self.current_state.as_ref());
        render_knobs(frame, chunks[2], &self.panel, self.selected);
        render_keys(frame, chunks[3], &self.held);

        let help = Paragraph::new(
            " [z..m q..u] Play  [-/=] Octave  [←/→] Knob  [↑/↓] Turn  [Esc] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[4]);
    }
}
