//! Work queue that routes each item to the handler for its payload type

use super::type_list::{Inject, IntoCallbackTable, TypeList};
use crate::core::Result;
use crate::pool::{BoundedWorkQueue, Handler, QueueConfig, QueueStats, WorkerStats};
use crate::queue::{ContainerAdapter, DequeStorage, ListStorage, RingStorage, Storage, VecStorage};
use std::sync::Arc;
use uuid::Uuid;

/// Backend container used by a dispatch queue over storage `S` and list `L`
pub type DispatchContainer<S, L> = <S as Storage>::Container<<L as TypeList>::Union>;

/// Dispatch queue stored in a `Vec`
pub type VecDispatchQueue<L> = TypedDispatchQueue<VecStorage, L>;
/// Dispatch queue stored in a `LinkedList`
pub type ListDispatchQueue<L> = TypedDispatchQueue<ListStorage, L>;
/// Dispatch queue stored in a `VecDeque`
pub type DequeDispatchQueue<L> = TypedDispatchQueue<DequeStorage, L>;
/// Dispatch queue stored in a [`RingBuffer`](crate::queue::RingBuffer)
pub type RingDispatchQueue<L> = TypedDispatchQueue<RingStorage, L>;

/// A [`BoundedWorkQueue`] whose items are drawn from a closed list of
/// payload types, each with its own handler.
///
/// Items keep their enqueue order regardless of type. Blocking, shutdown and
/// failure reporting behave exactly as for [`BoundedWorkQueue`].
///
/// # Example
///
/// ```rust
/// use rust_task_queue::prelude::*;
/// use rust_task_queue::typed::DequeDispatchQueue;
///
/// # fn main() -> Result<()> {
/// let queue: DequeDispatchQueue<(u32, String)> = DequeDispatchQueue::new(
///     (
///         |n: u32| {
///             println!("number {}", n);
///             Ok(())
///         },
///         |s: String| {
///             println!("text {}", s);
///             Ok(())
///         },
///     ),
///     QueueConfig::new(1),
/// )?;
///
/// queue.enqueue(7_u32)?;
/// queue.enqueue(String::from("seven"))?;
/// queue.shutdown()?;
/// # Ok(())
/// # }
/// ```
pub struct TypedDispatchQueue<S: Storage, L: TypeList> {
    inner: BoundedWorkQueue<DispatchContainer<S, L>>,
}

impl<S: Storage, L: TypeList> std::fmt::Debug for TypedDispatchQueue<S, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedDispatchQueue")
            .field("payload_types", &L::LEN)
            .field("inner", &self.inner)
            .finish()
    }
}

impl<S: Storage, L: TypeList> TypedDispatchQueue<S, L> {
    /// Create a queue from one handler per payload type and start its workers.
    ///
    /// `handlers` is a tuple of closures in list order; the closure for
    /// position `i` must accept the `i`-th payload type.
    ///
    /// # Errors
    ///
    /// Same as [`BoundedWorkQueue::new`].
    pub fn new<H>(handlers: H, config: QueueConfig) -> Result<Self>
    where
        H: IntoCallbackTable<L>,
    {
        let table = handlers.into_table();
        let dispatch: Handler<L::Union> = Box::new(move |item: L::Union| L::dispatch(&table, item));
        Ok(Self {
            inner: BoundedWorkQueue::with_handler(dispatch, config)?,
        })
    }

    /// Create an unbounded queue with `worker_count` workers.
    pub fn with_workers<H>(handlers: H, worker_count: usize) -> Result<Self>
    where
        H: IntoCallbackTable<L>,
    {
        Self::new(handlers, QueueConfig::new(worker_count))
    }

    /// Add a payload value at the back of the queue.
    ///
    /// The variant is chosen from the value's type; values whose type is not
    /// in the list, or appears in it more than once, are rejected at compile
    /// time.
    ///
    /// # Errors
    ///
    /// - `TaskQueueError::ShuttingDown` - shutdown has begun
    pub fn enqueue<V, I>(&self, value: V) -> Result<()>
    where
        L: Inject<V, I>,
    {
        self.inner.enqueue(L::inject(value))
    }

    /// Construct a payload value directly in the queue's storage.
    ///
    /// `make` runs under the queue lock once space is available.
    pub fn emplace<V, I, F>(&self, make: F) -> Result<()>
    where
        L: Inject<V, I>,
        F: FnOnce() -> V,
    {
        self.inner.enqueue_with(|| L::inject(make()))
    }

    /// Add an already wrapped union value.
    pub fn enqueue_union(&self, item: L::Union) -> Result<()> {
        self.inner.enqueue(item)
    }

    /// Run `f` with exclusive access to the underlying container.
    ///
    /// See [`BoundedWorkQueue::with_exclusive_access`].
    pub fn with_exclusive_access<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut ContainerAdapter<DispatchContainer<S, L>>) -> R,
    {
        self.inner.with_exclusive_access(f)
    }

    /// Stop accepting items, drain the queue and join the workers.
    pub fn shutdown(&self) -> Result<()> {
        self.inner.shutdown()
    }

    /// Identifier of this queue instance
    pub fn id(&self) -> Uuid {
        self.inner.id()
    }

    /// Number of worker threads
    pub fn worker_count(&self) -> usize {
        self.inner.worker_count()
    }

    /// Capacity bound, if any
    pub fn capacity_bound(&self) -> Option<usize> {
        self.inner.capacity_bound()
    }

    /// Items currently waiting
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no items are waiting
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether the queue still accepts items
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    /// Per-worker statistics
    pub fn stats(&self) -> Vec<Arc<WorkerStats>> {
        self.inner.stats()
    }

    /// Items handled successfully
    pub fn total_processed(&self) -> u64 {
        self.inner.total_processed()
    }

    /// Items whose handler returned an error
    pub fn total_failed(&self) -> u64 {
        self.inner.total_failed()
    }

    /// Items whose handler panicked
    pub fn total_panicked(&self) -> u64 {
        self.inner.total_panicked()
    }

    /// Point-in-time statistics
    pub fn snapshot(&self) -> QueueStats {
        self.inner.snapshot()
    }

    /// The untyped queue underneath
    pub fn inner(&self) -> &BoundedWorkQueue<DispatchContainer<S, L>> {
        &self.inner
    }
}
