use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use uuid::Uuid;

use super::{Device, ScheduleRequest};

static FIRE_TIME_DISPLAY: &[BorrowedFormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute] [period case:upper]");

/// Render a fire time in the 12-hour form used in user replies, e.g. "07:30 PM".
pub fn display_fire_time(at: OffsetDateTime) -> String {
    at.format(FIRE_TIME_DISPLAY)
        .unwrap_or_else(|_| format!("{:02}:{:02}", at.hour(), at.minute()))
}

/// A pending future state change. Owned by the scheduler from registration
/// until it fires, then discarded; never reused and never recurring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Task identity, for logs and display
    pub id: Uuid,
    /// Target switchable device
    pub device: Device,
    /// Desired power state when the task fires
    pub on: bool,
    /// Absolute wall-clock moment to execute at
    pub fire_at: OffsetDateTime,
    /// Short description of the registered request, e.g. "turn on light"
    pub label: String,
}

impl ScheduledTask {
    /// Build a task for a classified schedule request.
    pub fn from_request(request: ScheduleRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            device: request.device,
            on: request.on,
            fire_at: request.fire_at,
            label: format!(
                "turn {} {}",
                if request.on { "on" } else { "off" },
                request.device
            ),
        }
    }
}
