//! Session wiring: ring buffers, control thread, terminal

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};
use rtrb::RingBuffer;
use std::io::stdout;

use wernstrom::{panel::Panel, ControlMessage, SynthConfig};

use super::{
    control,
    ui::{SessionSnapshot, UiApp},
};

const MESSAGE_QUEUE_SIZE: usize = 256;
const SNAPSHOT_QUEUE_SIZE: usize = 8;

pub fn run(config: SynthConfig) -> EyreResult<()> {
    let (msg_tx, msg_rx) = RingBuffer::<ControlMessage>::new(MESSAGE_QUEUE_SIZE);
    let (state_tx, state_rx) = RingBuffer::<SessionSnapshot>::new(SNAPSHOT_QUEUE_SIZE);

    let panel = Panel::new(&config.patch);
    let control = control::spawn(config, msg_rx, state_tx)
        .wrap_err("failed to start control thread")?;

    let mut terminal = ratatui::init();
    let restore_terminal = OnDrop(ratatui::restore);

    // Key-up events need the kitty keyboard protocol; without it the UI
    // releases keys on a timeout instead.
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .wrap_err("failed to enable key release events")?;
    }
    let pop_flags = OnDrop(move || {
        if release_events {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
    });
    log::info!("key release events: {release_events}");

    let result = {
        let mut app = UiApp::new(msg_tx, state_rx, panel, release_events);
        app.run(&mut terminal)
        // app (and its message producer) drops here, which stops the control thread
    };

    drop(pop_flags);
    drop(restore_terminal);

    control
        .join()
        .map_err(|_| eyre!("control thread panicked"))?;
    result
}

/// Runs its closure when dropped, so terminal cleanup happens on early
/// returns too.
struct OnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        (self.0)()
    }
}
