use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Device;

/// One immediate state change produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Flip a switchable device on or off.
    SetPower { device: Device, on: bool },
    /// Shift the temperature setpoint by a signed amount.
    AdjustTemperature { delta: i32 },
}

/// A deferred on/off request parsed from an "at <time>" phrase. The fire time
/// is already absolute, with any next-day rollover applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Target switchable device
    pub device: Device,
    /// Desired power state when the task fires
    pub on: bool,
    /// Absolute wall-clock moment to execute at
    pub fire_at: OffsetDateTime,
}

/// Classified meaning of one user phrase. Exactly one variant per phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Conversational phrase answered with a canned reply, no state change.
    Smalltalk(String),
    /// Deferred action to register with the scheduler.
    Schedule(ScheduleRequest),
    /// Immediate actions; empty when nothing was recognized.
    Actions(Vec<Action>),
}
