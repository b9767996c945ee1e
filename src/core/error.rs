//! Error types for the task queue

/// Result type for task queue operations
pub type Result<T> = std::result::Result<T, TaskQueueError>;

/// Errors that can occur in the task queue
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TaskQueueError {
    /// Invalid configuration with parameter
    #[error("Invalid configuration for '{parameter}': {message}")]
    InvalidConfig {
        /// Configuration parameter name
        parameter: String,
        /// Error message
        message: String,
    },

    /// Failed to spawn a worker thread with details
    #[error("Failed to spawn worker thread #{worker_id}: {message}")]
    SpawnError {
        /// Index of the worker that failed to spawn
        worker_id: usize,
        /// Error message
        message: String,
        /// Source IO error
        #[source]
        source: Option<std::io::Error>,
    },

    /// Failed to join a worker thread
    #[error("Failed to join worker thread #{worker_id}: {message}")]
    JoinError {
        /// Index of the worker that failed to join
        worker_id: usize,
        /// Error message
        message: String,
    },

    /// The queue has begun shutting down and accepts no new items
    #[error("Task queue is shutting down ({pending} items pending)")]
    ShuttingDown {
        /// Number of items still waiting to be drained
        pending: usize,
    },

    /// A handler returned an error for an item
    #[error("Handler failed on worker #{worker_id}: {message}")]
    HandlerFailed {
        /// Index of the worker that ran the handler
        worker_id: usize,
        /// Error message
        message: String,
    },

    /// A handler panicked while processing an item
    #[error("Handler panicked on worker #{worker_id}: {message}")]
    HandlerPanicked {
        /// Index of the worker that ran the handler
        worker_id: usize,
        /// Panic message
        message: String,
    },

    /// General error
    #[error("{0}")]
    Other(String),
}

impl TaskQueueError {
    /// Create an invalid config error
    pub fn invalid_config(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        TaskQueueError::InvalidConfig {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a spawn error
    pub fn spawn(worker_id: usize, message: impl Into<String>) -> Self {
        TaskQueueError::SpawnError {
            worker_id,
            message: message.into(),
            source: None,
        }
    }

    /// Create a spawn error with source
    pub fn spawn_with_source(
        worker_id: usize,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        TaskQueueError::SpawnError {
            worker_id,
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a join error
    pub fn join(worker_id: usize, message: impl Into<String>) -> Self {
        TaskQueueError::JoinError {
            worker_id,
            message: message.into(),
        }
    }

    /// Create a shutting down error
    pub fn shutting_down(pending: usize) -> Self {
        TaskQueueError::ShuttingDown { pending }
    }

    /// Create a handler failure error
    pub fn handler_failed(worker_id: usize, message: impl Into<String>) -> Self {
        TaskQueueError::HandlerFailed {
            worker_id,
            message: message.into(),
        }
    }

    /// Create a handler panic error
    pub fn handler_panicked(worker_id: usize, message: impl Into<String>) -> Self {
        TaskQueueError::HandlerPanicked {
            worker_id,
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TaskQueueError::Other(msg.into())
    }

    /// Whether this error describes a handler outcome rather than a queue fault
    pub fn is_handler_error(&self) -> bool {
        matches!(
            self,
            TaskQueueError::HandlerFailed { .. } | TaskQueueError::HandlerPanicked { .. }
        )
    }
}
