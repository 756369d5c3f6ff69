use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use wardsync_api::models::{Device, DeviceSnapshot, clamp_temperature};

use crate::errors::DeviceError;

/// Single source of truth for device state. Every mutation goes through the
/// write lock, so concurrent adjustments serialize and readers never observe
/// a torn snapshot.
pub struct DeviceService {
    devices: Arc<RwLock<DeviceSnapshot>>,
}

impl DeviceService {
    pub fn new(initial_temperature: i32) -> Self {
        let snapshot = DeviceSnapshot {
            temperature: clamp_temperature(initial_temperature),
            ..DeviceSnapshot::default()
        };

        Self {
            devices: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Coherent copy of the current state of every device.
    pub async fn snapshot(&self) -> DeviceSnapshot {
        *self.devices.read().await
    }

    /// Set the power flag of a switchable device.
    pub async fn set_power(&self, device: Device, on: bool) -> Result<(), DeviceError> {
        let mut devices = self.devices.write().await;

        match device {
            Device::Fan => devices.fan = on,
            Device::Light => devices.light = on,
            Device::Ac => devices.ac = on,
            Device::Temperature => return Err(DeviceError::NotSwitchable(device)),
        }

        debug!(device = %device, on, "device power updated");

        Ok(())
    }

    /// Shift the temperature setpoint by `delta`, clamped into the supported
    /// range. Returns the setpoint before and after the adjustment.
    pub async fn adjust_temperature(&self, delta: i32) -> (i32, i32) {
        let mut devices = self.devices.write().await;

        let previous = devices.temperature;
        devices.temperature = clamp_temperature(previous.saturating_add(delta));

        debug!(
            previous,
            current = devices.temperature,
            delta,
            "temperature adjusted"
        );

        (previous, devices.temperature)
    }
}
