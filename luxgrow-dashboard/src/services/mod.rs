pub use actuator_service::ActuatorController;
pub use poll_scheduler::{PollScheduler, SchedulerHandle};
pub use snapshot_service::SnapshotFetcher;
pub use transport::{HttpTransport, Transport};

pub mod actuator_service;
pub mod poll_scheduler;
pub mod snapshot_service;
pub mod transport;
