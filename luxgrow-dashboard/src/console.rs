use luxgrow_api::models::ServoMode;

use crate::models::ActuatorCommand;

/// One line of console input.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Refresh,
    Actuator(ActuatorCommand),
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("Unknown action `{0}`")]
    Unknown(String),

    #[error("`{0}` expects an argument")]
    MissingArgument(&'static str),

    #[error("Invalid angle `{0}`")]
    InvalidAngle(String),
}

pub const HELP: &str = "actions: refresh | auto | manual | cmd <NAME> | angle <DEG> | quit";

/// Parses a console line. Blank lines yield `Ok(None)`.
pub fn parse_action(line: &str) -> Result<Option<Action>, ActionError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();

    let action = match verb.to_ascii_lowercase().as_str() {
        "refresh" | "r" => Action::Refresh,
        "auto" => Action::Actuator(ActuatorCommand::SetMode(ServoMode::Auto)),
        "manual" => Action::Actuator(ActuatorCommand::SetMode(ServoMode::Manual)),
        "cmd" => {
            let name = argument.ok_or(ActionError::MissingArgument("cmd"))?;
            Action::Actuator(ActuatorCommand::Move {
                name: Some(name.to_ascii_uppercase()),
                angle: None,
            })
        }
        "angle" => {
            let raw = argument.ok_or(ActionError::MissingArgument("angle"))?;
            let angle = raw
                .parse::<f64>()
                .map_err(|_| ActionError::InvalidAngle(raw.to_string()))?;
            Action::Actuator(ActuatorCommand::Move {
                name: None,
                angle: Some(angle),
            })
        }
        "quit" | "exit" | "q" => Action::Quit,
        other => return Err(ActionError::Unknown(other.to_string())),
    };

    Ok(Some(action))
}
