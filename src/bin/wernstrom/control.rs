//! Control thread - owns the voice controller and the engine model
//!
//! Drains UI messages, advances the deferred gate queue on a wall clock and
//! publishes snapshots. Stops once the UI drops its message producer.

use log::{info, trace};
use rtrb::{Consumer, Producer};
use std::{
    io,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use wernstrom::{engine::ParameterEngine, ControlMessage, SynthConfig, VoiceController};

use super::ui::SessionSnapshot;

/// Control-rate tick. Gate delays are resolved to this granularity.
const TICK: Duration = Duration::from_millis(1);
/// How often a snapshot goes to the UI (~60 fps).
const PUBLISH_INTERVAL: Duration = Duration::from_millis(16);

pub fn spawn(
    config: SynthConfig,
    mut rx: Consumer<ControlMessage>,
    mut tx: Producer<SessionSnapshot>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("wernstrom-control".into())
        .spawn(move || {
            let engine = ParameterEngine::new(config.scheduler.oscillators.len());
            let mut controller = VoiceController::new(&config, engine);

            let start = Instant::now();
            let mut last = Duration::ZERO;
            let mut last_publish: Option<Duration> = None;

            while !(rx.is_abandoned() && rx.is_empty()) {
                let now = start.elapsed();
                controller.engine_mut().advance(now.saturating_sub(last));
                controller.tick(now, &mut rx);
                last = now;

                let due = last_publish.map_or(true, |at| now.saturating_sub(at) >= PUBLISH_INTERVAL);
                if due {
                    // UI only wants the latest; a full queue just skips a frame
                    if tx.push(SessionSnapshot::capture(&controller)).is_err() {
                        trace!("snapshot queue full");
                    }
                    last_publish = Some(now);
                }

                thread::sleep(TICK);
            }

            controller.all_notes_off();
            info!("control thread stopped");
        })
}
