use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_TARGET_BOT: &str = "@polyssightsbot";

#[derive(Deserialize, Debug)]
pub struct TelegramSettings {
    pub token: String,
}

#[derive(Deserialize, Debug)]
pub struct RedirectSettings {
    pub target_bot: String,
}

#[derive(Deserialize, Debug)]
pub struct BroadcastSettings {
    pub enabled: bool,
    pub interval_secs: u64,
    pub first_delay_secs: u64,
    pub pacing_millis: u64,
    pub text: Option<String>,
}

impl BroadcastSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn first_delay(&self) -> Duration {
        Duration::from_secs(self.first_delay_secs)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_millis)
    }
}

#[derive(Deserialize, Debug)]
pub struct StorageSettings {
    pub registry_path: String,
}

#[derive(Deserialize, Debug)]
pub struct AppSettings {
    pub telegram: TelegramSettings,
    pub redirect: RedirectSettings,
    pub broadcast: BroadcastSettings,
    pub storage: StorageSettings,
}

impl AppSettings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Self::builder()?
            .add_source(File::with_name("appsettings").required(false))
            .add_source(File::with_name("appsettings.local").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("redirect.target_bot", DEFAULT_TARGET_BOT)?
            .set_default("broadcast.enabled", true)?
            .set_default("broadcast.interval_secs", 6 * 60 * 60)?
            .set_default("broadcast.first_delay_secs", 60)?
            .set_default("broadcast.pacing_millis", 50)?
            .set_default("storage.registry_path", "registry.json")
    }
}
