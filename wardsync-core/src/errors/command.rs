use super::{DeviceError, ScheduleError};

/// Top-level error for the command service. Every variant degrades to a
/// textual reply; none terminates the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("provide state=true/false to switch the {device}")]
    MissingState { device: String },

    #[error("provide a delta to change the temperature")]
    MissingDelta,
}
