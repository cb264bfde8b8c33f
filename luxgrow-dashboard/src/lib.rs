use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::configs::Settings;
use crate::console::{Action, HELP, parse_action};
use crate::dashboard::Dashboard;
use crate::presenter::LogPresenter;
use crate::services::{HttpTransport, PollScheduler};

pub mod configs;
pub mod console;
pub mod dashboard;
pub mod errors;
pub mod models;
pub mod presenter;
pub mod services;

#[cfg(any(test, feature = "mock"))]
pub mod tests;

pub async fn run(settings: &Arc<Settings>) {
    let transport = Arc::new(HttpTransport::new(&settings.backend));
    let dashboard = Arc::new(Dashboard::new(
        transport,
        Arc::new(LogPresenter),
        settings.endpoints.clone(),
        &settings.poll,
    ));

    tracing::info!(
        "Polling {} every {} ms",
        settings.backend.base_url,
        settings.poll.interval_ms
    );
    tracing::info!("{HELP}");

    let handle = PollScheduler::new(dashboard, settings.poll.interval()).start();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!("Failed to read console input: {e}");
                        break;
                    }
                };

                match parse_action(&line) {
                    Ok(Some(Action::Refresh)) => handle.refresh().await,
                    Ok(Some(Action::Actuator(command))) => handle.execute(command).await,
                    Ok(Some(Action::Quit)) => break,
                    Ok(None) => {}
                    Err(e) => tracing::warn!("{e}; {HELP}"),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.stop().await;
}
