mod command;
mod device;
mod intent;
mod schedule;

pub use command::*;
pub use device::*;
pub use intent::*;
pub use schedule::*;

use serde::{Deserialize, Serialize};

/// Full externally visible state: current devices plus pending scheduled tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Current device states
    pub devices: DeviceSnapshot,
    /// Tasks waiting on the scheduler, ordered by fire time
    pub scheduled: Vec<ScheduledTask>,
}
