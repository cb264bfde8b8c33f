use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use luxgrow_api::models::{ModeRequest, ServoMode, ServoStatusResponse};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::configs::Endpoints;
use crate::errors::FetchError;
use crate::models::{ActuatorCommand, ActuatorStatus, ActuatorView, MotionCommand};
use crate::presenter::Presenter;
use crate::services::transport::{Transport, decode, encode};

#[derive(Default)]
struct Displayed {
    status: Option<ActuatorStatus>,
    ticket: u64,
}

/// Sends servo commands and re-reads the device state after each one.
///
/// Local commands are only requests: the displayed status always comes from
/// a status read, never from what was asked for.
pub struct ActuatorController {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
    presenter: Arc<dyn Presenter>,
    displayed: Mutex<Displayed>,
    tickets: AtomicU64,
}

impl ActuatorController {
    pub fn new(
        transport: Arc<dyn Transport>,
        endpoints: Endpoints,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            transport,
            endpoints,
            presenter,
            displayed: Mutex::new(Displayed::default()),
            tickets: AtomicU64::new(0),
        }
    }

    pub async fn execute(&self, command: ActuatorCommand) -> Option<ActuatorStatus> {
        match command {
            ActuatorCommand::SetMode(mode) => self.set_mode(mode == ServoMode::Auto).await,
            ActuatorCommand::Move { name, angle } => self.send_command(name.as_deref(), angle).await,
        }
    }

    pub async fn set_mode(&self, auto: bool) -> Option<ActuatorStatus> {
        let mode = ServoMode::from(auto);

        if let Err(e) = self.dispatch(&self.endpoints.servo_mode, &ModeRequest { mode }).await {
            tracing::error!("Failed to set servo mode to {mode}: {e}");
        }

        self.refresh_status().await
    }

    /// Sends one motion. A name takes precedence over an angle; with
    /// neither nothing is sent, but the status is still refreshed.
    pub async fn send_command(&self, name: Option<&str>, angle: Option<f64>) -> Option<ActuatorStatus> {
        match MotionCommand::from_input(name, angle) {
            Some(motion) => {
                if let Err(e) = self
                    .dispatch(&self.endpoints.servo_command, &motion.to_request())
                    .await
                {
                    tracing::error!("Failed to send servo command {motion:?}: {e}");
                }
            }
            None => tracing::warn!("Ignoring servo command without a name or angle"),
        }

        self.refresh_status().await
    }

    /// Reads the authoritative servo state and displays it.
    ///
    /// On failure the displayed state is left as it was and `None` is
    /// returned. A read that completes after a newer one has already been
    /// displayed is returned but not displayed.
    pub async fn refresh_status(&self) -> Option<ActuatorStatus> {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        let path = &self.endpoints.servo_status;

        let result = match self.transport.get(path).await {
            Ok(value) => decode::<ServoStatusResponse>(path, value),
            Err(e) => Err(e),
        };

        let status = match result {
            Ok(response) => ActuatorStatus::from(response),
            Err(e) => {
                tracing::error!("Failed to refresh servo status: {e}");
                return None;
            }
        };

        let mut displayed = self.displayed.lock().await;
        if ticket < displayed.ticket {
            tracing::debug!(ticket, newest = displayed.ticket, "Discarding stale servo status");
            return Some(status);
        }

        displayed.ticket = ticket;
        displayed.status = Some(status);
        self.presenter.render_actuator(&ActuatorView::from(&status));

        Some(status)
    }

    /// Status currently on display.
    pub async fn displayed(&self) -> Option<ActuatorStatus> {
        self.displayed.lock().await.status
    }

    async fn dispatch<T: Serialize>(&self, path: &str, body: &T) -> Result<(), FetchError> {
        let body = encode(path, body)?;
        self.transport.post(path, &body).await
    }
}
