//! Notifications sent to the tick driver

/// What just happened to the engine, as far as the tick driver cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// The timer was started or resumed; arm the tick source
    Started,
    /// The timer was reset; disarm the tick source
    Reset,
    /// A new session replaced the old one; disarm the tick source
    ModeChanged,
}

impl TimerCommand {
    pub fn disarms(&self) -> bool {
        matches!(self, TimerCommand::Reset | TimerCommand::ModeChanged)
    }
}
