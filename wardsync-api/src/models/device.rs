use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lowest accepted temperature setpoint, in degrees Celsius.
pub const TEMPERATURE_MIN: i32 = 16;
/// Highest accepted temperature setpoint, in degrees Celsius.
pub const TEMPERATURE_MAX: i32 = 30;
/// Setpoint every store starts from unless configured otherwise.
pub const TEMPERATURE_DEFAULT: i32 = 24;

/// Clamp a candidate setpoint into the supported range.
pub fn clamp_temperature(value: i32) -> i32 {
    value.clamp(TEMPERATURE_MIN, TEMPERATURE_MAX)
}

/// One of the fixed controllable devices. The set is closed; names outside it
/// are rejected at parse time and never reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Ceiling fan
    Fan,
    /// Room light
    Light,
    /// Air conditioner
    Ac,
    /// Temperature setpoint
    Temperature,
}

impl Device {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Fan => "fan",
            Device::Light => "light",
            Device::Ac => "ac",
            Device::Temperature => "temperature",
        }
    }

    /// Human-facing name used in reply lines.
    pub fn display_name(&self) -> &'static str {
        match self {
            Device::Fan => "Fan",
            Device::Light => "Light",
            Device::Ac => "AC",
            Device::Temperature => "Temperature",
        }
    }

    /// Devices holding an on/off flag; the temperature setpoint is numeric.
    pub fn is_switch(&self) -> bool {
        !matches!(self, Device::Temperature)
    }

    /// All devices, in the order the classifier checks them.
    pub fn all() -> [Device; 4] {
        [Device::Fan, Device::Light, Device::Ac, Device::Temperature]
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a device name outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDevice(pub String);

impl fmt::Display for UnknownDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown device '{}'", self.0)
    }
}

impl std::error::Error for UnknownDevice {}

impl FromStr for Device {
    type Err = UnknownDevice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fan" => Ok(Device::Fan),
            "light" => Ok(Device::Light),
            "ac" => Ok(Device::Ac),
            "temperature" => Ok(Device::Temperature),
            _ => Err(UnknownDevice(s.to_string())),
        }
    }
}

/// Coherent copy of every device state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    /// Fan power flag
    pub fan: bool,
    /// Light power flag
    pub light: bool,
    /// Air conditioner power flag
    pub ac: bool,
    /// Temperature setpoint in Celsius
    pub temperature: i32,
}

impl Default for DeviceSnapshot {
    fn default() -> Self {
        Self {
            fan: false,
            light: false,
            ac: false,
            temperature: TEMPERATURE_DEFAULT,
        }
    }
}

impl DeviceSnapshot {
    /// Power flag of a switchable device; `None` for the temperature setpoint.
    pub fn power(&self, device: Device) -> Option<bool> {
        match device {
            Device::Fan => Some(self.fan),
            Device::Light => Some(self.light),
            Device::Ac => Some(self.ac),
            Device::Temperature => None,
        }
    }
}
