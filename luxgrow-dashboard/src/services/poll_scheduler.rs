use std::sync::Arc;
use std::time::Duration;

use luxgrow_api::models::ServoMode;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::dashboard::Dashboard;
use crate::models::ActuatorCommand;

/// On-demand work for the scheduler loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    Refresh,
    Actuator(ActuatorCommand),
    Stop,
}

/// Drives a [`Dashboard`] on a fixed period and on demand.
///
/// The loop only decides *when* to run; every cycle is spawned, so a slow
/// backend never delays the next tick or a trigger. Overlapping periodic
/// cycles are refused by [`Dashboard::poll`].
pub struct PollScheduler {
    dashboard: Arc<Dashboard>,
    period: Duration,
}

impl PollScheduler {
    pub fn new(dashboard: Arc<Dashboard>, period: Duration) -> Self {
        Self { dashboard, period }
    }

    /// Starts the loop. The first periodic cycle runs right away.
    pub fn start(self) -> SchedulerHandle {
        let (trigger_tx, trigger_rx) = mpsc::channel(32);
        let task = tokio::spawn(self.run(trigger_rx));

        SchedulerHandle { trigger_tx, task }
    }

    async fn run(self, mut trigger_rx: mpsc::Receiver<Trigger>) {
        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                trigger = trigger_rx.recv() => match trigger {
                    Some(Trigger::Refresh) => {
                        let dashboard = Arc::clone(&self.dashboard);
                        tokio::spawn(async move {
                            dashboard.refresh().await;
                        });
                    }
                    Some(Trigger::Actuator(command)) => {
                        let dashboard = Arc::clone(&self.dashboard);
                        tokio::spawn(async move {
                            dashboard.execute(command).await;
                        });
                    }
                    Some(Trigger::Stop) | None => break,
                },
                _ = interval.tick() => {
                    let dashboard = Arc::clone(&self.dashboard);
                    tokio::spawn(async move {
                        dashboard.poll().await;
                    });
                }
            }
        }

        tracing::info!("Poll scheduler stopped");
    }
}

pub struct SchedulerHandle {
    trigger_tx: mpsc::Sender<Trigger>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    pub async fn refresh(&self) {
        self.send(Trigger::Refresh).await;
    }

    pub async fn execute(&self, command: ActuatorCommand) {
        self.send(Trigger::Actuator(command)).await;
    }

    pub async fn set_mode(&self, auto: bool) {
        self.execute(ActuatorCommand::SetMode(ServoMode::from(auto))).await;
    }

    pub async fn send_command(&self, name: Option<&str>, angle: Option<f64>) {
        self.execute(ActuatorCommand::Move {
            name: name.map(str::to_string),
            angle,
        })
        .await;
    }

    /// Stops future ticks and waits for the loop to exit. Cycles already
    /// running are left to finish on their own.
    pub async fn stop(self) {
        self.send(Trigger::Stop).await;

        if let Err(e) = self.task.await {
            tracing::error!("Poll scheduler task failed: {e}");
        }
    }

    async fn send(&self, trigger: Trigger) {
        if self.trigger_tx.send(trigger).await.is_err() {
            tracing::warn!("Poll scheduler is not running");
        }
    }
}
