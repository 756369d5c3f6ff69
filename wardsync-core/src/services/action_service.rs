use std::sync::Arc;

use tracing::warn;

use wardsync_api::models::Action;

use crate::services::DeviceService;

/// Applies classified actions to the device store. Each action yields exactly
/// one reply line; a command's lines are joined with spaces.
pub struct ActionService {
    devices: Arc<DeviceService>,
}

impl ActionService {
    pub fn new(devices: Arc<DeviceService>) -> Self {
        Self { devices }
    }

    /// Apply actions in classification order and join their reply lines.
    pub async fn apply(&self, actions: &[Action]) -> String {
        let mut replies = Vec::with_capacity(actions.len());

        for action in actions {
            replies.push(self.apply_one(*action).await);
        }

        replies.join(" ")
    }

    /// Apply a single action. Unapplicable actions degrade to a warning line
    /// rather than an error; the classifier's closed vocabulary never emits
    /// them, but manual callers can.
    pub async fn apply_one(&self, action: Action) -> String {
        match action {
            Action::SetPower { device, on } => match self.devices.set_power(device, on).await {
                Ok(()) => format!(
                    "{} turned {}.",
                    device.display_name(),
                    if on { "ON" } else { "OFF" }
                ),
                Err(error) => {
                    warn!(%error, "skipped unapplicable action");
                    format!("Cannot switch the {device} on or off.")
                }
            },
            Action::AdjustTemperature { delta } => {
                let (previous, current) = self.devices.adjust_temperature(delta).await;

                if current == previous {
                    format!("Temperature stays at {current}°C.")
                } else {
                    format!("Temperature set to {current}°C.")
                }
            }
        }
    }
}
