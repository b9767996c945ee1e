//! Storage for queued work items.
//!
//! This module provides the [`Backend`] trait that abstracts the native container
//! operations a work queue needs, enabling several container shapes to be used
//! interchangeably with [`BoundedWorkQueue`].
//!
//! # Built-in Backends
//!
//! - [`Vec`]: dynamic array; `pop_front` is linear in the queue length
//! - [`LinkedList`](std::collections::LinkedList): doubly linked list
//! - [`VecDeque`](std::collections::VecDeque): double-ended queue
//! - [`RingBuffer`]: fixed-capacity ring; the queue must be bounded
//!
//! [`ContainerAdapter`] wraps any backend and applies the optional capacity
//! bound, so the queue is written once against a single interface.
//!
//! # Backend Families
//!
//! [`Storage`] selects a backend for an element type chosen elsewhere, which is
//! how [`TypedDispatchQueue`] stores its generated union type:
//!
//! ```rust
//! use rust_task_queue::queue::{Backend, RingStorage, Storage};
//!
//! fn describe<S: Storage>() -> &'static str {
//!     let backend = <S::Container<u64> as Backend>::create(Some(8)).unwrap();
//!     backend.name()
//! }
//!
//! assert_eq!(describe::<RingStorage>(), "ring");
//! ```
//!
//! [`BoundedWorkQueue`]: crate::pool::BoundedWorkQueue
//! [`TypedDispatchQueue`]: crate::typed::TypedDispatchQueue

mod adapter;
mod backend;
mod ring;

pub use adapter::ContainerAdapter;
pub use backend::{Backend, DequeStorage, ListStorage, RingStorage, Storage, VecStorage};
pub use ring::RingBuffer;
