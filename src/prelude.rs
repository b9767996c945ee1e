//! Convenient re-exports for common types and traits

pub use crate::core::{Result, TaskQueueError};
pub use crate::pool::{
    BoundedWorkQueue, DequeWorkQueue, ListWorkQueue, QueueConfig, RingWorkQueue, VecWorkQueue,
    WorkerStats,
};
pub use crate::queue::{Backend, ContainerAdapter, RingBuffer, Storage};
pub use crate::typed::{Inject, IntoCallbackTable, TypeList, TypedDispatchQueue};
