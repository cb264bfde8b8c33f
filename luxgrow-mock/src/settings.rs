use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Servo {
    pub step: i32,
}

impl Default for Servo {
    fn default() -> Self {
        Self { step: 15 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulator {
    pub enabled: bool,
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub server: Server,
    #[serde(default)]
    pub servo: Servo,
    pub simulator: Simulator,
}

impl Settings {
    pub fn new() -> Result<Self, toml::de::Error> {
        toml::from_str(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/mock.toml"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_settings_parse() {
        let settings = Settings::new().unwrap();

        assert_eq!(settings.server.port, 5000);
        assert!(settings.servo.step > 0);
        assert!(settings.simulator.interval_secs > 0);
    }
}
