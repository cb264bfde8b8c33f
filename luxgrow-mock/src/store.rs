use luxgrow_api::models::{
    ClimateReading, CommandRequest, ConditionReading, ConditionRequest, DeviceCommand,
    LastCommand, LightCondition, LuxReading, MAX_ANGLE, MIN_ANGLE, ServoMode,
    ServoStatusResponse,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::Mutex;

use crate::errors::{RealtimeError, ServoError};

/// Angle the servo rests at before any command.
pub const REST_ANGLE: i32 = 90;

#[derive(Default)]
struct State {
    lux: Option<LuxReading>,
    climate: Option<ClimateReading>,
    condition: Option<ConditionReading>,
    mode: ServoMode,
    last_command: Option<LastCommand>,
    /// Command not yet collected by the servo node
    pending: Option<DeviceCommand>,
}

impl State {
    fn angle(&self) -> i32 {
        self.last_command.as_ref().map_or(REST_ANGLE, |command| command.angle)
    }

    fn issue(&mut self, command: DeviceCommand) -> LastCommand {
        let last = LastCommand {
            angle: command.angle,
            command: Some(command.command.clone()),
        };

        self.last_command = Some(last.clone());
        self.pending = Some(command);

        last
    }

    fn issue_auto(&mut self, lux: f64) {
        let (angle, condition) = auto_angle(lux);

        self.issue(DeviceCommand {
            command: String::from("AUTO"),
            angle,
            mode: ServoMode::Auto,
            reason: Some(condition.label().to_string()),
            lux: Some(lux),
        });
    }
}

/// Servo angle for a lux reading in auto mode: shade when too bright,
/// open up when too dark.
pub fn auto_angle(lux: f64) -> (i32, LightCondition) {
    let condition = LightCondition::from_lux(lux);
    let angle = match condition {
        LightCondition::High => MIN_ANGLE,
        LightCondition::Low => MAX_ANGLE,
        _ => REST_ANGLE,
    };

    (angle, condition)
}

fn timestamp() -> Option<String> {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .format(&Rfc3339)
        .ok()
}

/// In-memory state of the sensor and servo backend.
pub struct Store {
    state: Mutex<State>,
    step: i32,
}

impl Store {
    pub fn new(step: i32) -> Self {
        Self {
            state: Mutex::new(State::default()),
            step,
        }
    }

    pub async fn record_lux(&self, mut reading: LuxReading) {
        if reading.timestamp.is_none() {
            reading.timestamp = timestamp();
        }

        let mut state = self.state.lock().await;
        if state.mode == ServoMode::Auto {
            state.issue_auto(reading.lux);
        }
        state.lux = Some(reading);
    }

    pub async fn record_climate(&self, mut reading: ClimateReading) {
        if reading.timestamp.is_none() {
            reading.timestamp = timestamp();
        }

        self.state.lock().await.climate = Some(reading);
    }

    pub async fn lux(&self) -> Result<LuxReading, RealtimeError> {
        self.state
            .lock()
            .await
            .lux
            .clone()
            .ok_or(RealtimeError::NoReading("lux"))
    }

    pub async fn climate(&self) -> Result<ClimateReading, RealtimeError> {
        self.state
            .lock()
            .await
            .climate
            .clone()
            .ok_or(RealtimeError::NoReading("climate"))
    }

    pub async fn condition(&self) -> Result<ConditionReading, RealtimeError> {
        self.state
            .lock()
            .await
            .condition
            .clone()
            .ok_or(RealtimeError::NotClassified)
    }

    /// Recomputes the classification from the latest lux reading. A label
    /// in the request is stored as is.
    pub async fn classify(&self, request: ConditionRequest) -> Result<ConditionReading, RealtimeError> {
        let mut state = self.state.lock().await;

        let klasifikasi = match request.klasifikasi {
            Some(label) => label,
            None => {
                let lux = state.lux.as_ref().ok_or(RealtimeError::NoReading("lux"))?;
                LightCondition::from_lux(lux.lux).label().to_string()
            }
        };

        let reading = ConditionReading {
            klasifikasi,
            timestamp: request.timestamp.or_else(timestamp),
        };
        state.condition = Some(reading.clone());

        Ok(reading)
    }

    pub async fn status(&self) -> ServoStatusResponse {
        let state = self.state.lock().await;

        ServoStatusResponse {
            mode: state.mode,
            last_command: state.last_command.clone(),
        }
    }

    /// Switching to auto positions the servo from the latest lux reading
    /// straight away.
    pub async fn set_mode(&self, mode: ServoMode) -> ServoStatusResponse {
        let mut state = self.state.lock().await;

        if mode == ServoMode::Auto && state.mode != ServoMode::Auto {
            if let Some(lux) = state.lux.as_ref().map(|reading| reading.lux) {
                state.issue_auto(lux);
            }
        }
        state.mode = mode;

        ServoStatusResponse {
            mode: state.mode,
            last_command: state.last_command.clone(),
        }
    }

    pub async fn command(&self, request: CommandRequest) -> Result<LastCommand, ServoError> {
        let mut state = self.state.lock().await;

        if state.mode == ServoMode::Auto {
            return Err(ServoError::AutoMode);
        }

        let (command, angle) = match (request.command, request.angle) {
            (Some(name), None) => {
                let name = name.trim().to_ascii_uppercase();
                let angle = self.named_angle(&name, state.angle())?;
                (name, angle)
            }
            (None, Some(angle)) => (String::from("ANGLE"), angle),
            _ => return Err(ServoError::InvalidRequest),
        };

        Ok(state.issue(DeviceCommand {
            command,
            angle: angle.clamp(MIN_ANGLE, MAX_ANGLE),
            mode: ServoMode::Manual,
            reason: None,
            lux: None,
        }))
    }

    /// Hands the pending command to the servo node, once.
    pub async fn take_pending(&self) -> Option<DeviceCommand> {
        self.state.lock().await.pending.take()
    }

    fn named_angle(&self, name: &str, current: i32) -> Result<i32, ServoError> {
        match name {
            "OPEN" => Ok(MAX_ANGLE),
            "CLOSE" => Ok(MIN_ANGLE),
            "HALF" => Ok(REST_ANGLE),
            "UP" => Ok(current + self.step),
            "DOWN" => Ok(current - self.step),
            _ => Err(ServoError::UnknownCommand(name.to_string())),
        }
    }
}
