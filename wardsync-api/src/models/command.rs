use serde::{Deserialize, Serialize};

/// Structured device control request, the typed counterpart of a free-form
/// phrase. The name is validated against the fixed device set on application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCommand {
    /// Device name
    pub device: String,
    /// Desired power state, required for switchable devices
    #[serde(default)]
    pub state: Option<bool>,
    /// Signed setpoint change, required for the temperature device
    #[serde(default)]
    pub delta: Option<i32>,
}
