use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use wardsync_api::models::{TEMPERATURE_DEFAULT, clamp_temperature};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Devices {
    pub initial_temperature: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classifier {
    /// Whether mentioning the AC alone is enough to parse temperature wording.
    pub ac_implies_temperature: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub devices: Devices,
    pub classifier: Classifier,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logger: Logger {
                level: String::from("info"),
            },
            devices: Devices {
                initial_temperature: TEMPERATURE_DEFAULT,
            },
            classifier: Classifier {
                ac_implies_temperature: true,
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let base: toml::Value = toml::from_str(&fs::read_to_string("configs/default.toml")?)?;

        let overlay_path = format!("configs/{run_mode}.toml");
        if Path::new(&overlay_path).is_file() {
            let overlay: toml::Value = toml::from_str(&fs::read_to_string(&overlay_path)?)?;

            Self::merge(base, overlay)
        } else {
            Ok(serde_json::from_value(serde_json::to_value(&base)?)?)
        }
    }

    /// Overlay `right` onto `left` section by section, keeping `left` where
    /// `right` has nothing.
    pub fn merge<L, R, T>(left: L, right: R) -> Result<T, Box<dyn Error>>
    where
        L: Serialize,
        R: Serialize,
        T: Serialize + DeserializeOwned,
    {
        let mut left_map = serde_json::to_value(&left)?
            .as_object()
            .map(|map| map.to_owned())
            .ok_or("Failed to serialize left value which is not an object")?;

        let mut right_map = serde_json::to_value(&right)?
            .as_object()
            .map(|map| map.to_owned())
            .ok_or("Failed to serialize right value which is not an object")?;

        right_map.retain(|_, v| !v.is_null());
        left_map.extend(right_map);

        let value = serde_json::to_value(&left_map)?;

        Ok(serde_json::from_value(value)?)
    }

    /// Initial temperature setpoint, clamped into the supported range.
    pub fn initial_temperature(&self) -> i32 {
        clamp_temperature(self.devices.initial_temperature)
    }
}
