// Purpose: which notes are held, and when the shared envelope gate moves.
// Decisions are pure; timing is carried by commands and a deadline queue.

pub mod command;
pub mod scheduler;
pub mod slots;
pub mod timer;

pub use command::{Command, GateAction, GateCommand};
pub use scheduler::{decide, Decision, VoiceEvent, VoiceGateScheduler};
pub use slots::{SlotPool, SLOT_COUNT};
pub use timer::DelayQueue;
