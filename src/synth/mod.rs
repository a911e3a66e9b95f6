// Purpose: the session-facing layer. Turns keys and messages into scheduler
// calls and runs the resulting commands against an engine.

pub mod controller;
pub mod keyboard;
pub mod message;

pub use controller::{VoiceController, VoiceSnapshot};
pub use message::{ControlMessage, MessageReceiver};
