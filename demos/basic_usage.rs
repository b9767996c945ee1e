//! Basic work queue usage example
//!
//! Demonstrates queue creation, enqueueing, graceful shutdown and statistics.
//!
//! Run with: cargo run --example basic_usage

use rust_task_queue::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Rust Task Queue - Basic Usage Example ===\n");

    let total = Arc::new(AtomicU64::new(0));
    let total_clone = Arc::clone(&total);

    let config = QueueConfig::new(4)
        .with_max_elements(8)
        .with_thread_name_prefix("demo-worker");

    let queue: DequeWorkQueue<u64> = BoundedWorkQueue::new(
        move |n| {
            let name = thread::current().name().unwrap_or("unnamed").to_string();
            println!("   {} handling item {}", name, n);
            thread::sleep(Duration::from_millis(10));
            total_clone.fetch_add(n, Ordering::SeqCst);
            Ok(())
        },
        config,
    )?;

    println!(
        "1. Started queue {} with {} workers, bound {:?}",
        queue.id(),
        queue.worker_count(),
        queue.capacity_bound()
    );

    println!("\n2. Enqueueing 20 items:");
    for i in 1..=20 {
        queue.enqueue(i)?;
    }

    println!("\n3. Shutting down (drains remaining items)");
    queue.shutdown()?;

    println!("\n4. Statistics:");
    for (i, stats) in queue.stats().iter().enumerate() {
        println!(
            "   Worker {}: {} items, avg {:.1}us",
            i,
            stats.processed(),
            stats.average_handler_time_us()
        );
    }
    println!("   Sum of handled items: {}", total.load(Ordering::SeqCst));
    println!("   Snapshot: {}", queue.snapshot().to_json());

    match queue.enqueue(99) {
        Err(e) => println!("\n5. Enqueue after shutdown rejected: {}", e),
        Ok(()) => println!("\n5. Unexpected: enqueue after shutdown accepted"),
    }

    Ok(())
}
