//! Work queue and worker implementations

pub mod config;
pub mod stats;
pub mod work_queue;
pub mod worker;

pub use config::{ErrorSink, QueueConfig};
pub use stats::QueueStats;
pub use work_queue::{
    BoundedWorkQueue, DequeWorkQueue, Handler, ListWorkQueue, RingWorkQueue, VecWorkQueue,
};
pub use worker::{ItemOutcome, Worker, WorkerStatSnapshot, WorkerStats};
