//! Work queues over a closed set of payload types.
//!
//! A [`TypedDispatchQueue`] accepts values of any type in its payload list
//! and hands each one to the handler registered for that type. All payloads
//! share one FIFO order and one pool of workers.
//!
//! # Components
//!
//! - [`TypeList`]: a tuple of payload types, with its union and handler table
//! - [`Inject`]: compile-time selection of the union variant for a value
//! - [`IntoCallbackTable`]: turns a tuple of closures into a handler table
//! - [`OneOf2`] .. [`OneOf6`]: unions for lists of two to six types
//! - [`TypedDispatchQueue`]: the queue itself, generic over a [`Storage`]
//!   family
//!
//! # Quick Start
//!
//! ```rust
//! use rust_task_queue::prelude::*;
//! use rust_task_queue::typed::VecDispatchQueue;
//!
//! # fn main() -> Result<()> {
//! struct Resize {
//!     width: u32,
//! }
//!
//! let queue: VecDispatchQueue<(Resize, String)> = VecDispatchQueue::new(
//!     (
//!         |r: Resize| {
//!             println!("resize to {}", r.width);
//!             Ok(())
//!         },
//!         |path: String| {
//!             println!("load {}", path);
//!             Ok(())
//!         },
//!     ),
//!     QueueConfig::new(2).with_max_elements(64),
//! )?;
//!
//! queue.enqueue(String::from("a.png"))?;
//! queue.enqueue(Resize { width: 640 })?;
//! queue.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! A single-type list such as `(u64,)` stores `u64` directly with no wrapper.
//!
//! [`Storage`]: crate::queue::Storage

mod dispatch;
mod type_list;

pub use dispatch::{
    DequeDispatchQueue, DispatchContainer, ListDispatchQueue, RingDispatchQueue,
    TypedDispatchQueue, VecDispatchQueue,
};
pub use type_list::{
    Index0, Index1, Index2, Index3, Index4, Index5, Inject, IntoCallbackTable, OneOf2, OneOf3,
    OneOf4, OneOf5, OneOf6, TypeList,
};
