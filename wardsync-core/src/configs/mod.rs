pub mod settings;

pub use settings::{Classifier, Devices, Logger, Settings};
