//! Ring buffer backpressure example
//!
//! Fast producers feed a small ring-buffer queue drained by slow workers;
//! producers block whenever the ring is full.
//!
//! Run with: cargo run --example ring_backpressure

use rand::Rng;
use rust_task_queue::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    println!("=== Rust Task Queue - Ring Backpressure Example ===\n");

    let queue: RingWorkQueue<(usize, u64)> = BoundedWorkQueue::new(
        |(producer, delay_ms): (usize, u64)| {
            thread::sleep(Duration::from_millis(delay_ms));
            log::trace!("item from producer {} took {}ms", producer, delay_ms);
            Ok(())
        },
        QueueConfig::new(2)
            .with_max_elements(4)
            .with_thread_name_prefix("ring-worker"),
    )?;
    let queue = Arc::new(queue);

    let start = Instant::now();
    let producers: Vec<_> = (0..3)
        .map(|producer| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || -> Result<()> {
                let mut rng = rand::thread_rng();
                for _ in 0..10 {
                    queue.enqueue((producer, rng.gen_range(1..20)))?;
                }
                println!("   producer {} done after {:?}", producer, start.elapsed());
                Ok(())
            })
        })
        .collect();

    for handle in producers {
        match handle.join() {
            Ok(result) => result?,
            Err(_) => return Err(TaskQueueError::other("producer thread panicked")),
        }
    }

    println!("\nAll producers finished; {} items still queued", queue.len());
    queue.shutdown()?;
    println!("Drained in {:?}", start.elapsed());
    println!("{}", queue.snapshot().to_json());
    Ok(())
}
