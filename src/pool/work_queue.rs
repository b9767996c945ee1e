//! Bounded work queue implementation

use crate::core::{Result, TaskQueueError};
use crate::pool::config::{ErrorSink, QueueConfig};
use crate::pool::stats::QueueStats;
use crate::pool::worker::{panic_message, Worker, WorkerStats};
use crate::queue::{Backend, ContainerAdapter, RingBuffer};
use chrono::Utc;
use parking_lot::{Condvar, Mutex};
use std::collections::{LinkedList, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, ThreadId};
use uuid::Uuid;

/// Per-item callback run by the workers
pub type Handler<T> = Box<dyn Fn(T) -> Result<()> + Send + Sync>;

/// Work queue backed by a [`Vec`]
pub type VecWorkQueue<T> = BoundedWorkQueue<Vec<T>>;
/// Work queue backed by a [`LinkedList`]
pub type ListWorkQueue<T> = BoundedWorkQueue<LinkedList<T>>;
/// Work queue backed by a [`VecDeque`]
pub type DequeWorkQueue<T> = BoundedWorkQueue<VecDeque<T>>;
/// Work queue backed by a [`RingBuffer`]; `max_elements` is required
pub type RingWorkQueue<T> = BoundedWorkQueue<RingBuffer<T>>;

struct QueueState<B: Backend> {
    container: ContainerAdapter<B>,
    shutdown: bool,
}

/// State shared between the queue handle and its workers
pub(crate) struct Shared<B: Backend> {
    state: Mutex<QueueState<B>>,
    not_empty: Condvar,
    not_full: Condvar,
    handler: Handler<B::Item>,
    error_sink: ErrorSink,
}

impl<B: Backend> Shared<B> {
    /// Block until an item is available and pop it.
    ///
    /// Returns `None` once shutdown has been signalled and the queue is empty.
    pub(crate) fn next_item(&self) -> Option<B::Item> {
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.container.pop_front() {
                let bounded = state.container.is_bounded();
                drop(state);
                if bounded {
                    self.not_full.notify_one();
                }
                return Some(item);
            }
            if state.shutdown {
                return None;
            }
            self.not_empty.wait(&mut state);
        }
    }

    pub(crate) fn handle(&self, item: B::Item) -> Result<()> {
        (self.handler)(item)
    }

    /// Pass a failure to the error sink. A panicking sink is logged and
    /// otherwise ignored so the reporting worker stays alive.
    pub(crate) fn report(&self, err: &TaskQueueError) {
        if let Err(panic) = catch_unwind(AssertUnwindSafe(|| (self.error_sink)(err))) {
            log::error!(
                "error sink panicked while reporting '{}': {}",
                err,
                panic_message(panic.as_ref())
            );
        }
    }

    /// Flag shutdown and wake everyone. Returns false if already flagged.
    fn begin_shutdown(&self) -> bool {
        let first = {
            let mut state = self.state.lock();
            !std::mem::replace(&mut state.shutdown, true)
        };
        self.not_empty.notify_all();
        self.not_full.notify_all();
        first
    }
}

/// A fixed pool of worker threads draining one FIFO queue.
///
/// Items are handed to the handler in enqueue order. With one worker they are
/// also handled in that order; with several, handlers may finish out of order.
///
/// # Backpressure
///
/// When the queue is bounded (`max_elements`, or always for the ring
/// buffer backend) [`enqueue`](Self::enqueue) blocks until a worker frees a
/// slot. There is no timeout.
///
/// # Handler Failures
///
/// Handler panics are caught. Panics and `Err` returns are counted in
/// [`WorkerStats`] and passed to the configured error sink; the worker keeps
/// running.
///
/// # Shutdown
///
/// [`shutdown`](Self::shutdown) (also run on drop) stops new enqueues, lets
/// the workers drain every queued item, then joins them. Concurrent callers
/// all wait for the join to finish. Called from a handler, it only flags
/// shutdown and returns; the remaining workers still drain the queue.
///
/// # Example
///
/// ```rust
/// use rust_task_queue::prelude::*;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// # fn main() -> Result<()> {
/// let sum = Arc::new(AtomicUsize::new(0));
/// let sum_clone = Arc::clone(&sum);
///
/// let queue: VecWorkQueue<usize> = BoundedWorkQueue::new(
///     move |n| {
///         sum_clone.fetch_add(n, Ordering::SeqCst);
///         Ok(())
///     },
///     QueueConfig::new(2).with_max_elements(4),
/// )?;
///
/// for n in 1..=10 {
///     queue.enqueue(n)?;
/// }
/// queue.shutdown()?;
/// assert_eq!(sum.load(Ordering::SeqCst), 55);
/// # Ok(())
/// # }
/// ```
pub struct BoundedWorkQueue<B: Backend> {
    id: Uuid,
    config: QueueConfig,
    shared: Arc<Shared<B>>,
    workers: Mutex<Vec<Worker>>,
    worker_threads: Vec<ThreadId>,
    worker_stats: Vec<Arc<WorkerStats>>,
    total_enqueued: AtomicU64,
}

impl<B: Backend> std::fmt::Debug for BoundedWorkQueue<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedWorkQueue")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("running", &self.is_running())
            .field(
                "total_enqueued",
                &self.total_enqueued.load(Ordering::Relaxed),
            )
            .finish()
    }
}

impl<B: Backend> BoundedWorkQueue<B> {
    /// Create a queue and start its workers.
    ///
    /// # Errors
    ///
    /// - `TaskQueueError::InvalidConfig` - zero workers, a zero bound, or a
    ///   ring buffer backend without `max_elements`
    /// - `TaskQueueError::SpawnError` - a worker thread could not be started;
    ///   workers already started are shut down first
    pub fn new<F>(handler: F, config: QueueConfig) -> Result<Self>
    where
        F: Fn(B::Item) -> Result<()> + Send + Sync + 'static,
    {
        Self::with_handler(Box::new(handler), config)
    }

    /// Create an unbounded queue with `worker_count` workers.
    pub fn with_workers<F>(handler: F, worker_count: usize) -> Result<Self>
    where
        F: Fn(B::Item) -> Result<()> + Send + Sync + 'static,
    {
        Self::new(handler, QueueConfig::new(worker_count))
    }

    pub(crate) fn with_handler(handler: Handler<B::Item>, config: QueueConfig) -> Result<Self> {
        config.validate()?;

        let container = ContainerAdapter::<B>::new(config.max_elements)?;
        let backend_name = container.backend().name();
        let shared = Arc::new(Shared {
            state: Mutex::new(QueueState {
                container,
                shutdown: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            handler,
            error_sink: config.error_sink(),
        });

        let id = Uuid::new_v4();
        let mut workers = Vec::with_capacity(config.worker_count);
        for worker_id in 0..config.worker_count {
            match Worker::spawn(worker_id, Arc::clone(&shared), &config.thread_name_prefix) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    shared.begin_shutdown();
                    for worker in workers {
                        let _ = worker.join();
                    }
                    return Err(e);
                }
            }
        }
        let worker_stats = workers.iter().map(Worker::stats).collect();
        let worker_threads = workers.iter().filter_map(Worker::thread_id).collect();

        log::debug!(
            "queue {} started: backend={}, workers={}, max_elements={:?}",
            id,
            backend_name,
            config.worker_count,
            config.max_elements
        );

        Ok(Self {
            id,
            config,
            shared,
            workers: Mutex::new(workers),
            worker_threads,
            worker_stats,
            total_enqueued: AtomicU64::new(0),
        })
    }

    /// Add an item at the back of the queue.
    ///
    /// Blocks while the queue is bounded and full.
    ///
    /// # Errors
    ///
    /// - `TaskQueueError::ShuttingDown` - shutdown has begun, including while
    ///   this call was waiting for space
    pub fn enqueue(&self, item: B::Item) -> Result<()> {
        self.enqueue_with(|| item)
    }

    /// Construct an item directly in the queue's storage.
    ///
    /// `make` runs while the queue lock is held, once space is available; keep
    /// it short. Blocking and error behaviour match [`enqueue`](Self::enqueue).
    pub fn enqueue_with<F>(&self, make: F) -> Result<()>
    where
        F: FnOnce() -> B::Item,
    {
        let mut state = self.shared.state.lock();
        while !state.shutdown && !state.container.has_room() {
            self.shared.not_full.wait(&mut state);
        }
        if state.shutdown {
            return Err(TaskQueueError::shutting_down(state.container.size()));
        }
        state.container.emplace(make);
        drop(state);

        self.shared.not_empty.notify_one();
        self.total_enqueued.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Run `f` with exclusive access to the underlying container.
    ///
    /// Producers and workers are blocked for the whole call, so `f` must
    /// return promptly. Waiters are woken afterwards since `f` may have
    /// changed the occupancy.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rust_task_queue::prelude::*;
    ///
    /// # fn main() -> Result<()> {
    /// let queue: DequeWorkQueue<u32> = BoundedWorkQueue::with_workers(|_| Ok(()), 1)?;
    /// let bound = queue.with_exclusive_access(|container| container.capacity_bound());
    /// assert_eq!(bound, None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_exclusive_access<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut ContainerAdapter<B>) -> R,
    {
        let result = {
            let mut state = self.shared.state.lock();
            f(&mut state.container)
        };
        self.shared.not_empty.notify_all();
        self.shared.not_full.notify_all();
        result
    }

    /// Identifier of this queue instance
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Number of worker threads
    pub fn worker_count(&self) -> usize {
        self.config.worker_count
    }

    /// Effective capacity bound, if any
    pub fn capacity_bound(&self) -> Option<usize> {
        self.shared.state.lock().container.capacity_bound()
    }

    /// Items waiting to be dequeued
    pub fn len(&self) -> usize {
        self.shared.state.lock().container.size()
    }

    /// Returns true if nothing is waiting to be dequeued
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true until shutdown begins
    pub fn is_running(&self) -> bool {
        !self.shared.state.lock().shutdown
    }

    /// Get statistics for all workers
    pub fn stats(&self) -> Vec<Arc<WorkerStats>> {
        self.worker_stats.iter().map(Arc::clone).collect()
    }

    /// Get total number of items accepted by enqueue
    pub fn total_enqueued(&self) -> u64 {
        self.total_enqueued.load(Ordering::Relaxed)
    }

    /// Get total items handled successfully across all workers
    pub fn total_processed(&self) -> u64 {
        self.worker_stats.iter().map(|s| s.processed()).sum()
    }

    /// Get total items whose handler returned an error
    pub fn total_failed(&self) -> u64 {
        self.worker_stats.iter().map(|s| s.failed()).sum()
    }

    /// Get total items whose handler panicked
    pub fn total_panicked(&self) -> u64 {
        self.worker_stats.iter().map(|s| s.panicked()).sum()
    }

    /// Get total items handled to any outcome
    pub fn total_handled(&self) -> u64 {
        self.worker_stats.iter().map(|s| s.handled()).sum()
    }

    /// Take a serializable snapshot of the queue
    pub fn snapshot(&self) -> QueueStats {
        let (backend, capacity_bound, queued) = {
            let state = self.shared.state.lock();
            (
                state.container.backend().name(),
                state.container.capacity_bound(),
                state.container.size(),
            )
        };
        QueueStats {
            queue_id: self.id,
            backend,
            worker_count: self.config.worker_count,
            capacity_bound,
            queued,
            total_enqueued: self.total_enqueued(),
            workers: self.worker_stats.iter().map(|s| s.snapshot()).collect(),
            captured_at: Utc::now(),
        }
    }

    /// Stop accepting items, drain the queue and join every worker.
    ///
    /// # Graceful Shutdown
    ///
    /// 1. Flags shutdown; later and blocked enqueues fail with `ShuttingDown`
    /// 2. Workers keep handling items until the queue is empty, then exit
    /// 3. Waits for every worker thread to finish
    ///
    /// Calling it again is a no-op once the workers are joined. A call racing
    /// an in-progress shutdown blocks until that join completes. From a worker
    /// thread only step 1 runs.
    ///
    /// # Errors
    ///
    /// Returns `TaskQueueError::JoinError` if a worker thread died outside a
    /// handler.
    pub fn shutdown(&self) -> Result<()> {
        if self.shared.begin_shutdown() {
            log::debug!("queue {} shutting down, draining {} items", self.id, self.len());
        }

        if self.on_worker_thread() {
            log::debug!("queue {}: shutdown requested from a worker, not joining", self.id);
            return Ok(());
        }

        // Held across the joins so a concurrent caller waits for them
        let mut workers = self.workers.lock();
        let mut first_error = None;
        for worker in workers.drain(..) {
            if let Err(e) = worker.join() {
                log::error!("queue {}: {}", self.id, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn on_worker_thread(&self) -> bool {
        let current = thread::current().id();
        self.worker_threads.contains(&current)
    }
}

impl<B: Backend> Drop for BoundedWorkQueue<B> {
    fn drop(&mut self) {
        if self.on_worker_thread() {
            // The last handle went away inside a handler; the workers hold
            // the shared state and exit once the queue is drained.
            self.shared.begin_shutdown();
            for worker in self.workers.get_mut().drain(..) {
                worker.detach();
            }
            log::debug!("queue {} dropped from a worker, workers detached", self.id);
            return;
        }

        if let Err(e) = self.shutdown() {
            log::error!("Failed to shut down queue {} during drop: {}", self.id, e);
        }
    }
}
