use luxgrow_api::models::{CommandRequest, ServoMode, ServoStatusResponse};

/// Servo state as last reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorStatus {
    pub mode: ServoMode,
    pub last_angle: Option<i32>,
}

impl From<ServoStatusResponse> for ActuatorStatus {
    fn from(response: ServoStatusResponse) -> Self {
        Self {
            mode: response.mode,
            last_angle: response.last_command.map(|command| command.angle),
        }
    }
}

/// User intent for the servo. Dropped once dispatched.
#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCommand {
    SetMode(ServoMode),
    Move {
        name: Option<String>,
        angle: Option<f64>,
    },
}

/// Validated motion request, either a named motion or an absolute angle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionCommand {
    Named(String),
    Angle(i32),
}

impl MotionCommand {
    /// Picks the single motion to send. A non-empty name wins over an
    /// angle; the angle is truncated to whole degrees. Range checks are
    /// left to the device.
    pub fn from_input(name: Option<&str>, angle: Option<f64>) -> Option<Self> {
        if let Some(name) = name.map(str::trim).filter(|name| !name.is_empty()) {
            return Some(MotionCommand::Named(name.to_string()));
        }

        angle
            .filter(|angle| angle.is_finite())
            .map(|angle| MotionCommand::Angle(angle.trunc() as i32))
    }

    pub fn to_request(&self) -> CommandRequest {
        match self {
            MotionCommand::Named(name) => CommandRequest {
                command: Some(name.clone()),
                angle: None,
            },
            MotionCommand::Angle(angle) => CommandRequest {
                command: None,
                angle: Some(*angle),
            },
        }
    }
}

/// Display-ready servo state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActuatorView {
    pub mode_label: &'static str,
    pub angle_label: String,
    /// Manual motion controls only make sense outside auto mode
    pub manual_controls_enabled: bool,
}

impl From<&ActuatorStatus> for ActuatorView {
    fn from(status: &ActuatorStatus) -> Self {
        Self {
            mode_label: match status.mode {
                ServoMode::Auto => "AUTO",
                ServoMode::Manual => "MANUAL",
            },
            angle_label: status
                .last_angle
                .map(|angle| format!("{angle}°"))
                .unwrap_or_else(|| String::from("--")),
            manual_controls_enabled: status.mode == ServoMode::Manual,
        }
    }
}
