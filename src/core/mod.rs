//! Core types shared by every queue flavour

pub mod error;

pub use error::{Result, TaskQueueError};
