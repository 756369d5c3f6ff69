use std::sync::Arc;

use time::OffsetDateTime;
use tracing::debug;

use wardsync_api::models::{
    Action, Device, DeviceCommand, EngineSnapshot, Intent, ScheduledTask, display_fire_time,
};

use crate::configs::Settings;
use crate::errors::{CommandError, DeviceError};
use crate::services::{ActionService, DeviceService, IntentClassifier, SchedulerService};

const HELP_REPLY: &str = "I can help control the fan, light and AC, or adjust the temperature. \
    You can also schedule, e.g. 'turn on light at 6 pm'.";

/// Single entry point for the transport layer: text in, reply text out.
/// Classifies each phrase, applies immediate actions to the shared store, and
/// registers deferred ones with the scheduler.
pub struct CommandService {
    devices: Arc<DeviceService>,
    actions: Arc<ActionService>,
    scheduler: Arc<SchedulerService>,
    classifier: IntentClassifier,
}

impl CommandService {
    pub fn new(settings: &Settings) -> Self {
        let devices = Arc::new(DeviceService::new(settings.initial_temperature()));
        let actions = Arc::new(ActionService::new(devices.clone()));
        let scheduler = Arc::new(SchedulerService::new(actions.clone()));
        let classifier = IntentClassifier::new(settings.classifier.clone());

        Self {
            devices,
            actions,
            scheduler,
            classifier,
        }
    }

    /// Handle one free-form phrase. Every failure path degrades to a reply;
    /// nothing here terminates the process.
    pub async fn execute(&self, text: &str, now: OffsetDateTime) -> String {
        let current_temperature = self.devices.snapshot().await.temperature;

        match self.classifier.classify(text, now, current_temperature) {
            Ok(Intent::Smalltalk(reply)) => reply,
            Ok(Intent::Schedule(request)) => {
                let task = ScheduledTask::from_request(request);
                let confirmation = format!(
                    "Okay, I will {} at {}.",
                    task.label,
                    display_fire_time(task.fire_at)
                );

                self.scheduler.schedule(task).await;

                confirmation
            }
            Ok(Intent::Actions(actions)) if actions.is_empty() => HELP_REPLY.to_string(),
            Ok(Intent::Actions(actions)) => self.actions.apply(&actions).await,
            Err(error) => {
                debug!(%error, text, "rejected command");
                format!("Sorry, I cannot do that: {error}.")
            }
        }
    }

    /// Apply a structured command, validating the device name and required
    /// fields against the fixed set.
    pub async fn apply_command(&self, command: &DeviceCommand) -> Result<String, CommandError> {
        let device: Device = command.device.parse().map_err(DeviceError::from)?;

        let action = if device.is_switch() {
            let on = command.state.ok_or_else(|| CommandError::MissingState {
                device: device.to_string(),
            })?;
            Action::SetPower { device, on }
        } else {
            let delta = command.delta.ok_or(CommandError::MissingDelta)?;
            Action::AdjustTemperature { delta }
        };

        Ok(self.actions.apply_one(action).await)
    }

    /// Devices plus pending scheduled tasks, for display.
    pub async fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            devices: self.devices.snapshot().await,
            scheduled: self.scheduler.pending().await,
        }
    }

    /// Handle on the shared device store.
    pub fn devices(&self) -> Arc<DeviceService> {
        self.devices.clone()
    }
}
