/// Errors raised while turning a parsed phrase into a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// Wall-clock components out of range after meridian normalization.
    #[error("invalid schedule time {hour}:{minute:02}, expected hour 0-23 and minute 0-59")]
    InvalidTime { hour: u8, minute: u8 },
}
