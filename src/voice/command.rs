use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateAction {
    Open,
    Close,
}

/// A gate transition, either immediate or deferred by `after`.
///
/// A deferred command stays deferred even with a zero delay, so it still
/// goes through the queue and the settle rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateCommand {
    pub action: GateAction,
    pub after: Duration,
    deferred: bool,
}

impl GateCommand {
    pub fn now(action: GateAction) -> Self {
        Self {
            action,
            after: Duration::ZERO,
            deferred: false,
        }
    }

    pub fn after(action: GateAction, after: Duration) -> Self {
        Self {
            action,
            after,
            deferred: true,
        }
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred
    }
}

/// Side effect requested by the scheduler, executed by the caller against
/// the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetFrequency { voice: usize, hz: f32, ramp: Duration },
    SetAmplitude { voice: usize, level: f32, ramp: Duration },
    Gate(GateCommand),
}

impl Command {
    pub fn gate(&self) -> Option<GateCommand> {
        match self {
            Command::Gate(gate) => Some(*gate),
            _ => None,
        }
    }
}
