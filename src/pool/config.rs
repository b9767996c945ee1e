//! Queue configuration

use crate::core::{Result, TaskQueueError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Receives handler failures and panics reported by workers.
///
/// The sink runs on the worker thread that observed the failure, outside the
/// queue lock.
pub type ErrorSink = Arc<dyn Fn(&TaskQueueError) + Send + Sync>;

/// Default sink: report through the `log` facade.
fn log_error_sink(err: &TaskQueueError) {
    match err {
        TaskQueueError::HandlerPanicked { .. } => log::error!("{}", err),
        _ => log::warn!("{}", err),
    }
}

/// Configuration for a work queue
///
/// Plain fields (de)serialize with serde so a queue can be configured from a
/// JSON document; the error sink is runtime-only.
///
/// # Example
///
/// ```rust
/// use rust_task_queue::QueueConfig;
///
/// let config = QueueConfig::new(4)
///     .with_max_elements(128)
///     .with_thread_name_prefix("ingest");
/// assert!(config.validate().is_ok());
///
/// let from_json = QueueConfig::from_json(r#"{ "worker_count": 2, "max_elements": 16 }"#)?;
/// assert_eq!(from_json.max_elements, Some(16));
/// assert_eq!(from_json.thread_name_prefix, "task-queue");
/// # Ok::<(), rust_task_queue::TaskQueueError>(())
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Number of worker threads (default 1)
    pub worker_count: usize,
    /// Capacity bound (None = unbounded). Required by the ring buffer backend.
    pub max_elements: Option<usize>,
    /// Thread name prefix; workers are named `<prefix>-<index>`
    pub thread_name_prefix: String,
    #[serde(skip)]
    error_sink: Option<ErrorSink>,
}

impl fmt::Debug for QueueConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueConfig")
            .field("worker_count", &self.worker_count)
            .field("max_elements", &self.max_elements)
            .field("thread_name_prefix", &self.thread_name_prefix)
            .field(
                "error_sink",
                &self.error_sink.as_ref().map_or("<log>", |_| "<custom sink>"),
            )
            .finish()
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            worker_count: 1,
            max_elements: None,
            thread_name_prefix: "task-queue".to_string(),
            error_sink: None,
        }
    }
}

impl QueueConfig {
    /// Create a new unbounded configuration with the given number of workers
    #[must_use]
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count,
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueueError::InvalidConfig`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TaskQueueError::invalid_config("json", e.to_string()))
    }

    /// Set the number of worker threads
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_workers(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Bound the queue to `max_elements` items
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = Some(max_elements);
        self
    }

    /// Remove any capacity bound
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn unbounded(mut self) -> Self {
        self.max_elements = None;
        self
    }

    /// Set thread name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Route handler failures and panics to `sink` instead of the log.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rust_task_queue::QueueConfig;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let failures = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&failures);
    /// let config = QueueConfig::default().with_error_sink(move |_err| {
    ///     counter.fetch_add(1, Ordering::Relaxed);
    /// });
    /// # let _ = config;
    /// ```
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_error_sink<F>(mut self, sink: F) -> Self
    where
        F: Fn(&TaskQueueError) + Send + Sync + 'static,
    {
        self.error_sink = Some(Arc::new(sink));
        self
    }

    /// The configured error sink, or the logging default.
    pub fn error_sink(&self) -> ErrorSink {
        match &self.error_sink {
            Some(sink) => Arc::clone(sink),
            None => {
                let sink: ErrorSink = Arc::new(log_error_sink);
                sink
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(TaskQueueError::invalid_config(
                "worker_count",
                "Number of workers must be greater than 0",
            ));
        }
        if self.max_elements == Some(0) {
            return Err(TaskQueueError::invalid_config(
                "max_elements",
                "Capacity bound must be greater than 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_defaults() {
        let config = QueueConfig::default();
        assert_eq!(config.worker_count, 1);
        assert_eq!(config.max_elements, None);
        assert_eq!(config.thread_name_prefix, "task-queue");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = QueueConfig::new(3)
            .with_max_elements(10)
            .with_thread_name_prefix("io");
        assert_eq!(config.worker_count, 3);
        assert_eq!(config.max_elements, Some(10));
        assert_eq!(config.thread_name_prefix, "io");
        assert_eq!(config.unbounded().max_elements, None);
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let err = QueueConfig::new(0).validate().unwrap_err();
        assert!(matches!(
            err,
            TaskQueueError::InvalidConfig { ref parameter, .. } if parameter == "worker_count"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let err = QueueConfig::new(1).with_max_elements(0).validate().unwrap_err();
        assert!(matches!(
            err,
            TaskQueueError::InvalidConfig { ref parameter, .. } if parameter == "max_elements"
        ));
    }

    #[test]
    fn test_json_round_trip_skips_sink() {
        let config = QueueConfig::new(2)
            .with_max_elements(5)
            .with_error_sink(|_| {});
        let json = serde_json::to_string(&config).expect("Failed to serialize config");
        assert!(!json.contains("error_sink"));

        let parsed = QueueConfig::from_json(&json).expect("Failed to parse config");
        assert_eq!(parsed.worker_count, 2);
        assert_eq!(parsed.max_elements, Some(5));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = QueueConfig::from_json("{ worker_count: ").unwrap_err();
        assert!(matches!(err, TaskQueueError::InvalidConfig { .. }));
    }

    #[test]
    fn test_custom_error_sink_is_used() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        let config = QueueConfig::default().with_error_sink(move |_| {
            seen_clone.fetch_add(1, Ordering::SeqCst);
        });

        let sink = config.error_sink();
        sink(&TaskQueueError::handler_failed(0, "x"));
        sink(&TaskQueueError::handler_panicked(0, "y"));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}
