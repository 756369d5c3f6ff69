mod action_service;
mod command_service;
mod device_service;
mod intent_service;
mod scheduler_service;

pub use action_service::*;
pub use command_service::*;
pub use device_service::*;
pub use intent_service::*;
pub use scheduler_service::*;
