pub mod command;
pub mod device;
pub mod schedule;

pub use command::CommandError;
pub use device::DeviceError;
pub use schedule::ScheduleError;
