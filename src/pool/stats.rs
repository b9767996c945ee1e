//! Queue-level statistics snapshot

use super::worker::WorkerStatSnapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A point-in-time view of one queue, suitable for logging or export.
#[derive(Debug, Clone, Serialize)]
pub struct QueueStats {
    /// Identifier of the queue instance
    pub queue_id: Uuid,
    /// Backend name (`vec`, `list`, `deque`, `ring`)
    pub backend: &'static str,
    /// Number of worker threads
    pub worker_count: usize,
    /// Capacity bound, if any
    pub capacity_bound: Option<usize>,
    /// Items waiting in the queue
    pub queued: usize,
    /// Items accepted by `enqueue` so far
    pub total_enqueued: u64,
    /// Per-worker counters, indexed by worker id
    pub workers: Vec<WorkerStatSnapshot>,
    /// When the snapshot was taken
    pub captured_at: DateTime<Utc>,
}

impl QueueStats {
    /// Items handled successfully across all workers
    pub fn total_processed(&self) -> u64 {
        self.workers.iter().map(|w| w.items_processed).sum()
    }

    /// Items whose handler returned an error across all workers
    pub fn total_failed(&self) -> u64 {
        self.workers.iter().map(|w| w.items_failed).sum()
    }

    /// Items whose handler panicked across all workers
    pub fn total_panicked(&self) -> u64 {
        self.workers.iter().map(|w| w.items_panicked).sum()
    }

    /// Items dequeued and handled to any outcome
    pub fn total_handled(&self) -> u64 {
        self.total_processed() + self.total_failed() + self.total_panicked()
    }

    /// Render the snapshot as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QueueStats {
        QueueStats {
            queue_id: Uuid::new_v4(),
            backend: "ring",
            worker_count: 2,
            capacity_bound: Some(8),
            queued: 3,
            total_enqueued: 10,
            workers: vec![
                WorkerStatSnapshot {
                    items_processed: 4,
                    items_failed: 1,
                    items_panicked: 0,
                    total_processing_time_us: 100,
                },
                WorkerStatSnapshot {
                    items_processed: 1,
                    items_failed: 0,
                    items_panicked: 1,
                    total_processing_time_us: 50,
                },
            ],
            captured_at: Utc::now(),
        }
    }

    #[test]
    fn test_totals() {
        let stats = sample();
        assert_eq!(stats.total_processed(), 5);
        assert_eq!(stats.total_failed(), 1);
        assert_eq!(stats.total_panicked(), 1);
        assert_eq!(stats.total_handled(), 7);
    }

    #[test]
    fn test_to_json() {
        let stats = sample();
        let value: serde_json::Value =
            serde_json::from_str(&stats.to_json()).expect("Failed to parse snapshot JSON");
        assert_eq!(value["backend"], "ring");
        assert_eq!(value["capacity_bound"], 8);
        assert_eq!(value["workers"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["queue_id"], stats.queue_id.to_string());
    }
}
