use std::env;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::configs::configs_root;
use crate::models::DEFAULT_CAPACITY;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backend {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub lux: String,
    pub dht: String,
    pub condition: String,
    pub servo_mode: String,
    pub servo_command: String,
    pub servo_status: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            lux: String::from("/api/realtime/lux"),
            dht: String::from("/api/realtime/dht"),
            condition: String::from("/api/realtime/condition"),
            servo_mode: String::from("/api/servo/mode"),
            servo_command: String::from("/api/servo/command"),
            servo_status: String::from("/api/servo/status"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Poll {
    pub interval_ms: u64,
    pub series_capacity: usize,
    /// Refresh the servo status in the background on every poll cycle.
    pub refresh_actuator: bool,
}

impl Poll {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for Poll {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            series_capacity: DEFAULT_CAPACITY,
            refresh_actuator: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub backend: Backend,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub poll: Poll,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());
        let root = configs_root().map_err(|e| ConfigError::Message(e.to_string()))?;

        let settings: Settings = Config::builder()
            .add_source(File::with_name(&root.join("default").to_string_lossy()))
            .add_source(File::with_name(&root.join(&run_mode).to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix("LUXGROW")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if settings.poll.interval_ms == 0 {
            return Err(ConfigError::Message("poll.interval_ms must be positive".into()));
        }

        Ok(settings)
    }
}
