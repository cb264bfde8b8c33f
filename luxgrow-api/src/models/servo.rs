use std::fmt;

use serde::{Deserialize, Serialize};

pub const MIN_ANGLE: i32 = 0;
pub const MAX_ANGLE: i32 = 180;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServoMode {
    /// Position driven by the backend from the latest light reading
    Auto,
    /// Position driven by user commands
    #[default]
    Manual,
}

impl From<bool> for ServoMode {
    fn from(auto: bool) -> Self {
        if auto { ServoMode::Auto } else { ServoMode::Manual }
    }
}

impl fmt::Display for ServoMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServoMode::Auto => write!(f, "auto"),
            ServoMode::Manual => write!(f, "manual"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeRequest {
    /// Requested servo mode
    pub mode: ServoMode,
}

/// Motion request. At most one of the two fields is populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Named motion, e.g. `OPEN` or `UP`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Absolute target angle in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastCommand {
    /// Angle the device was last told to hold
    pub angle: i32,
    /// Name of the motion that produced the angle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServoStatusResponse {
    /// Mode currently held by the backend
    pub mode: ServoMode,
    /// Most recent command, absent before the first one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_command: Option<LastCommand>,
}

/// Command handed to the servo node when it polls for work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceCommand {
    pub command: String,
    pub angle: i32,
    pub mode: ServoMode,
    /// Why the backend issued the command in auto mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Lux reading that triggered an auto command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lux: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_request_omits_empty_fields() {
        let named = CommandRequest {
            command: Some("UP".into()),
            angle: None,
        };
        assert_eq!(serde_json::to_string(&named).unwrap(), r#"{"command":"UP"}"#);

        let angled = CommandRequest {
            command: None,
            angle: Some(45),
        };
        assert_eq!(serde_json::to_string(&angled).unwrap(), r#"{"angle":45}"#);
    }

    #[test]
    fn test_status_without_last_command() {
        let status: ServoStatusResponse = serde_json::from_str(r#"{"mode":"manual"}"#).unwrap();

        assert_eq!(status.mode, ServoMode::Manual);
        assert!(status.last_command.is_none());
    }

    #[test]
    fn test_status_rejects_unknown_mode() {
        assert!(serde_json::from_str::<ServoStatusResponse>(r#"{"mode":"turbo"}"#).is_err());
    }
}
