use wardsync_core::configs::Settings;
use wardsync_core::services::CommandService;

/// Engine fixture wired from default settings, one fresh store per test.
pub struct MockEngine {
    pub service: CommandService,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            service: CommandService::new(&Settings::default()),
        }
    }

    pub fn with_initial_temperature(temperature: i32) -> Self {
        let mut settings = Settings::default();
        settings.devices.initial_temperature = temperature;

        Self {
            service: CommandService::new(&settings),
        }
    }
}
