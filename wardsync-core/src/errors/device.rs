use wardsync_api::models::{Device, UnknownDevice};

/// Errors raised by the device store. The classifier's closed vocabulary
/// cannot produce them; they guard the structured command path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    #[error(transparent)]
    Unknown(#[from] UnknownDevice),

    #[error("{0} holds a numeric setpoint and cannot be switched on or off")]
    NotSwitchable(Device),
}
