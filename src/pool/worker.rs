//! Worker thread implementation

use crate::core::{Result, TaskQueueError};
use crate::pool::work_queue::Shared;
use crate::queue::Backend;
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
use tracing::{span, Level};

/// How a single handler invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The handler returned `Ok`
    Processed,
    /// The handler returned `Err`
    Failed,
    /// The handler panicked
    Panicked,
}

/// Counters one worker updates after every item it takes off the queue.
///
/// Readers may observe the counters mid-update; use [`snapshot`](Self::snapshot)
/// for a consistent-enough copy to log or serialize.
#[derive(Debug, Default)]
pub struct WorkerStats {
    processed: AtomicU64,
    failed: AtomicU64,
    panicked: AtomicU64,
    handler_time_us: AtomicU64,
}

/// Plain copy of a worker's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkerStatSnapshot {
    /// Handler returned `Ok`
    pub items_processed: u64,
    /// Handler returned `Err`
    pub items_failed: u64,
    /// Handler panicked
    pub items_panicked: u64,
    /// Wall time spent inside the handler, in microseconds
    pub total_processing_time_us: u64,
}

impl WorkerStats {
    /// Zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one handled item and the time its handler took.
    pub fn record(&self, outcome: ItemOutcome, elapsed: Duration) {
        let counter = match outcome {
            ItemOutcome::Processed => &self.processed,
            ItemOutcome::Failed => &self.failed,
            ItemOutcome::Panicked => &self.panicked,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.handler_time_us.fetch_add(micros, Ordering::Relaxed);
    }

    /// Items whose handler returned `Ok`
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    /// Items whose handler returned `Err`
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Items whose handler panicked
    pub fn panicked(&self) -> u64 {
        self.panicked.load(Ordering::Relaxed)
    }

    /// Items taken off the queue, whatever the outcome
    pub fn handled(&self) -> u64 {
        self.processed() + self.failed() + self.panicked()
    }

    /// Mean handler time over every handled item, in microseconds
    pub fn average_handler_time_us(&self) -> f64 {
        match self.handled() {
            0 => 0.0,
            n => self.handler_time_us.load(Ordering::Relaxed) as f64 / n as f64,
        }
    }

    /// Copy the counters out
    pub fn snapshot(&self) -> WorkerStatSnapshot {
        WorkerStatSnapshot {
            items_processed: self.processed(),
            items_failed: self.failed(),
            items_panicked: self.panicked(),
            total_processing_time_us: self.handler_time_us.load(Ordering::Relaxed),
        }
    }
}

/// A worker thread that drains one queue
#[derive(Debug)]
pub struct Worker {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Spawn a worker bound to `shared`.
    ///
    /// # Shutdown Behavior
    ///
    /// The worker exits only once shutdown has been signalled and the queue
    /// is empty, so every queued item is handled before it stops.
    pub(crate) fn spawn<B: Backend>(id: usize, shared: Arc<Shared<B>>, name_prefix: &str) -> Result<Self> {
        let stats = Arc::new(WorkerStats::new());
        let stats_clone = Arc::clone(&stats);

        let thread = thread::Builder::new()
            .name(format!("{}-{}", name_prefix, id))
            .spawn(move || {
                Self::run(id, shared, stats_clone);
            })
            .map_err(|e| TaskQueueError::spawn_with_source(id, "thread spawn failed", e))?;

        Ok(Self {
            id,
            thread: Some(thread),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get worker statistics
    pub fn stats(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    /// OS thread id of the worker, while it has not been joined or detached
    pub fn thread_id(&self) -> Option<ThreadId> {
        self.thread.as_ref().map(|t| t.thread().id())
    }

    /// Join the worker thread
    pub fn join(mut self) -> Result<()> {
        match self.thread.take() {
            Some(thread) => thread
                .join()
                .map_err(|panic| TaskQueueError::join(self.id, panic_message(panic.as_ref()))),
            None => Ok(()),
        }
    }

    /// Let the thread finish on its own without waiting for it.
    pub(crate) fn detach(mut self) {
        self.thread.take();
    }

    /// Main worker loop
    fn run<B: Backend>(id: usize, shared: Arc<Shared<B>>, stats: Arc<WorkerStats>) {
        #[cfg(feature = "tracing")]
        let worker_span = span!(Level::DEBUG, "worker", id = id);
        #[cfg(feature = "tracing")]
        let _guard = worker_span.enter();

        log::debug!("worker {} started", id);

        while let Some(item) = shared.next_item() {
            Self::handle_item(id, item, &shared, &stats);
        }

        log::debug!(
            "worker {} stopped (processed={}, failed={}, panicked={})",
            id,
            stats.processed(),
            stats.failed(),
            stats.panicked()
        );
    }

    /// Run the handler on one item with panic protection
    fn handle_item<B: Backend>(id: usize, item: B::Item, shared: &Shared<B>, stats: &WorkerStats) {
        #[cfg(feature = "tracing")]
        let item_span = span!(Level::TRACE, "handle_item");
        #[cfg(feature = "tracing")]
        let _item_guard = item_span.enter();

        let start = Instant::now();
        let result = catch_unwind(AssertUnwindSafe(|| shared.handle(item)));
        let elapsed = start.elapsed();

        let (outcome, failure) = match result {
            Ok(Ok(())) => (ItemOutcome::Processed, None),
            Ok(Err(e)) => (
                ItemOutcome::Failed,
                Some(TaskQueueError::handler_failed(id, e.to_string())),
            ),
            Err(panic) => (
                ItemOutcome::Panicked,
                Some(TaskQueueError::handler_panicked(id, panic_message(panic.as_ref()))),
            ),
        };
        stats.record(outcome, elapsed);

        if let Some(err) = failure {
            shared.report(&err);
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            if let Err(panic) = thread.join() {
                log::error!(
                    "worker {} panicked during shutdown: {}",
                    self.id,
                    panic_message(panic.as_ref())
                );
            }
        }
    }
}

pub(crate) fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
