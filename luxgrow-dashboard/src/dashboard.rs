use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use tokio::sync::Mutex;

use crate::configs::{Endpoints, Poll};
use crate::models::{ActuatorCommand, ActuatorStatus, SeriesBuffer, Snapshot};
use crate::presenter::Presenter;
use crate::services::{ActuatorController, SnapshotFetcher, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
}

struct Session {
    series: SeriesBuffer,
    snapshot: Option<Snapshot>,
    /// Ticket of the newest cycle whose results are on display
    committed: u64,
}

/// Display state of one dashboard session and the cycles that update it.
///
/// Snapshot, series and servo status are only ever written by a finished
/// cycle, and a cycle that finishes after a newer one has been committed is
/// dropped.
pub struct Dashboard {
    fetcher: SnapshotFetcher,
    actuator: Arc<ActuatorController>,
    presenter: Arc<dyn Presenter>,
    session: Mutex<Session>,
    polling: AtomicBool,
    tickets: AtomicU64,
    busy: AtomicUsize,
    refresh_actuator: bool,
}

impl Dashboard {
    pub fn new(
        transport: Arc<dyn Transport>,
        presenter: Arc<dyn Presenter>,
        endpoints: Endpoints,
        poll: &Poll,
    ) -> Self {
        let actuator = Arc::new(ActuatorController::new(
            Arc::clone(&transport),
            endpoints.clone(),
            Arc::clone(&presenter),
        ));

        Self {
            fetcher: SnapshotFetcher::new(transport, endpoints),
            actuator,
            presenter,
            session: Mutex::new(Session {
                series: SeriesBuffer::new(poll.series_capacity),
                snapshot: None,
                committed: 0,
            }),
            polling: AtomicBool::new(false),
            tickets: AtomicU64::new(0),
            busy: AtomicUsize::new(0),
            refresh_actuator: poll.refresh_actuator,
        }
    }

    pub fn state(&self) -> PollState {
        if self.polling.load(Ordering::SeqCst) {
            PollState::Polling
        } else {
            PollState::Idle
        }
    }

    pub fn actuator(&self) -> &Arc<ActuatorController> {
        &self.actuator
    }

    /// Periodic cycle. Does nothing and returns `false` while another
    /// periodic cycle is still running.
    pub async fn poll(&self) -> bool {
        if self
            .polling
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Previous poll still running, skipping tick");
            return false;
        }
        let _polling = PollingGuard(&self.polling);

        self.run_cycle().await;
        true
    }

    /// On-demand cycle, independent of the periodic one. Returns whether
    /// its results were committed.
    pub async fn refresh(&self) -> bool {
        self.run_cycle().await
    }

    pub async fn execute(&self, command: ActuatorCommand) -> Option<ActuatorStatus> {
        self.actuator.execute(command).await
    }

    pub async fn snapshot(&self) -> Option<Snapshot> {
        self.session.lock().await.snapshot.clone()
    }

    pub async fn series(&self) -> SeriesBuffer {
        self.session.lock().await.series.clone()
    }

    async fn run_cycle(&self) -> bool {
        let _busy = BusyGuard::enter(&self.busy, self.presenter.as_ref());
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;

        if self.refresh_actuator {
            let actuator = Arc::clone(&self.actuator);
            tokio::spawn(async move {
                actuator.refresh_status().await;
            });
        }

        let snapshot = self.fetcher.fetch_snapshot().await;

        self.commit(ticket, snapshot).await
    }

    async fn commit(&self, ticket: u64, snapshot: Snapshot) -> bool {
        let mut session = self.session.lock().await;

        if ticket < session.committed {
            tracing::debug!(ticket, committed = session.committed, "Discarding stale poll cycle");
            return false;
        }
        session.committed = ticket;

        match snapshot.series_point() {
            Some(point) => {
                session.series.append(point);
                self.presenter.render_series(&session.series);
            }
            None => tracing::debug!("Incomplete snapshot, chart left unchanged"),
        }

        self.presenter.render(&snapshot);
        session.snapshot = Some(snapshot);

        true
    }
}

struct PollingGuard<'a>(&'a AtomicBool);

impl Drop for PollingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Keeps the busy indicator up while at least one cycle is running.
struct BusyGuard<'a> {
    count: &'a AtomicUsize,
    presenter: &'a dyn Presenter,
}

impl<'a> BusyGuard<'a> {
    fn enter(count: &'a AtomicUsize, presenter: &'a dyn Presenter) -> Self {
        if count.fetch_add(1, Ordering::SeqCst) == 0 {
            presenter.set_busy(true);
        }

        Self { count, presenter }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if self.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.presenter.set_busy(false);
        }
    }
}
