pub mod config; // Session configuration
pub mod engine; // Control surface of the audio engine
pub mod panel; // Knobs and gesture mapping
pub mod pitch;
pub mod synth; // Keys and messages -> scheduler -> engine
pub mod voice; // Slot pool and gate scheduling

pub use config::{SchedulerConfig, SynthConfig};
pub use engine::SynthControl;
pub use synth::{ControlMessage, VoiceController};
