//! # Rust Task Queue
//!
//! Bounded, multi-worker work queues over pluggable storage backends.
//!
//! ## Features
//!
//! - **Work Queue**: a fixed pool of worker threads draining one FIFO queue
//!   through a single handler
//! - **Backpressure**: producers block while a bounded queue is full
//! - **Storage Backends**: `Vec`, `LinkedList`, `VecDeque` or a fixed-capacity
//!   [`RingBuffer`], behind one [`ContainerAdapter`](queue::ContainerAdapter)
//! - **Typed Dispatch**: one queue carrying several payload types, each routed
//!   to its own handler
//! - **Graceful Shutdown**: every accepted item is handled before workers exit
//! - **Worker Statistics**: per-worker counters and serializable snapshots
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_task_queue::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let queue: VecWorkQueue<u32> = BoundedWorkQueue::new(
//!     |n: u32| {
//!         println!("item {}", n);
//!         Ok(())
//!     },
//!     QueueConfig::new(4).with_max_elements(16),
//! )?;
//!
//! for i in 0..10 {
//!     queue.enqueue(i)?;
//! }
//!
//! // Drains the remaining items, then joins the workers
//! queue.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Queue Configuration
//!
//! ```rust
//! use rust_task_queue::QueueConfig;
//!
//! # fn main() -> rust_task_queue::Result<()> {
//! let config = QueueConfig::from_json(r#"{ "worker_count": 8, "max_elements": 1000 }"#)?
//!     .with_thread_name_prefix("ingest");
//! config.validate()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Handler Failures
//!
//! A handler that returns an error or panics does not stop its worker. The
//! failure is counted and passed to the configured error sink, which logs it
//! by default:
//!
//! ```rust
//! use rust_task_queue::prelude::*;
//! use rust_task_queue::TaskQueueError;
//!
//! # fn main() -> Result<()> {
//! let config = QueueConfig::new(1).with_error_sink(|e: &TaskQueueError| {
//!     eprintln!("handler failed: {}", e);
//! });
//! let queue: DequeWorkQueue<i64> = BoundedWorkQueue::new(
//!     |n: i64| {
//!         if n < 0 {
//!             return Err(TaskQueueError::other("negative input"));
//!         }
//!         Ok(())
//!     },
//!     config,
//! )?;
//!
//! queue.enqueue(-1)?;
//! queue.enqueue(1)?;
//! queue.shutdown()?;
//! assert_eq!(queue.total_failed(), 1);
//! assert_eq!(queue.total_processed(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Worker Statistics
//!
//! ```rust
//! use rust_task_queue::prelude::*;
//!
//! # fn main() -> Result<()> {
//! # let queue: VecWorkQueue<u8> = BoundedWorkQueue::with_workers(|_| Ok(()), 2)?;
//! # for i in 0..10 {
//! #     queue.enqueue(i)?;
//! # }
//! # queue.shutdown()?;
//! for (i, stat) in queue.stats().iter().enumerate() {
//!     println!("Worker {}: {} items processed", i, stat.processed());
//! }
//!
//! println!("{}", queue.snapshot().to_json());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod pool;
pub mod prelude;
pub mod queue;
pub mod typed;

pub use crate::core::{Result, TaskQueueError};
pub use crate::pool::{BoundedWorkQueue, QueueConfig, QueueStats, WorkerStats};
pub use crate::queue::RingBuffer;
pub use crate::typed::TypedDispatchQueue;
