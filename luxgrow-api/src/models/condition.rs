use std::fmt;

use serde::{Deserialize, Serialize};

/// Below this illuminance the plants get too little light.
pub const DARK_LUX: f64 = 300.0;
/// Above this illuminance the plants get too much light.
pub const BRIGHT_LUX: f64 = 22800.0;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightCondition {
    /// Light within the growing range
    Good,
    /// Too dark
    Low,
    /// Too bright
    High,
    /// Label not recognised or missing
    #[default]
    Unknown,
}

impl LightCondition {
    /// Maps a backend classification label onto a condition.
    ///
    /// Labels are free text in Indonesian, so matching is by keyword and
    /// case-insensitive. `baik` (good) wins over the low/high keywords.
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();

        if lower.contains("baik") {
            LightCondition::Good
        } else if lower.contains("rendah") || lower.contains("kurang") {
            LightCondition::Low
        } else if lower.contains("tinggi") || lower.contains("berlebih") {
            LightCondition::High
        } else {
            LightCondition::Unknown
        }
    }

    pub fn from_lux(lux: f64) -> Self {
        if lux < DARK_LUX {
            LightCondition::Low
        } else if lux <= BRIGHT_LUX {
            LightCondition::Good
        } else {
            LightCondition::High
        }
    }

    /// Label the backend publishes for this condition.
    pub fn label(&self) -> &'static str {
        match self {
            LightCondition::Good => "Cahaya baik",
            LightCondition::Low => "Cahaya terlalu rendah",
            LightCondition::High => "Cahaya terlalu tinggi",
            LightCondition::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for LightCondition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LightCondition::Good => write!(f, "good"),
            LightCondition::Low => write!(f, "low"),
            LightCondition::High => write!(f, "high"),
            LightCondition::Unknown => write!(f, "unknown"),
        }
    }
}
