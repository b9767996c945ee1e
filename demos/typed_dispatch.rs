//! Typed dispatch example
//!
//! One queue carries several message types; each type has its own handler.
//!
//! Run with: cargo run --example typed_dispatch

use rust_task_queue::prelude::*;
use rust_task_queue::typed::DequeDispatchQueue;

#[derive(Debug)]
struct Resize {
    path: String,
    width: u32,
}

#[derive(Debug)]
struct Delete {
    path: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Rust Task Queue - Typed Dispatch Example ===\n");

    let queue: DequeDispatchQueue<(Resize, Delete, String)> = DequeDispatchQueue::new(
        (
            |job: Resize| {
                println!("   resize {} to {}px", job.path, job.width);
                Ok(())
            },
            |job: Delete| {
                if job.path.starts_with('/') {
                    return Err(TaskQueueError::other(format!(
                        "refusing to delete absolute path {}",
                        job.path
                    )));
                }
                println!("   delete {}", job.path);
                Ok(())
            },
            |note: String| {
                println!("   note: {}", note);
                Ok(())
            },
        ),
        QueueConfig::new(1).with_max_elements(4),
    )?;

    queue.enqueue(String::from("batch started"))?;
    queue.enqueue(Resize {
        path: "cat.png".into(),
        width: 640,
    })?;
    queue.enqueue(Delete {
        path: "tmp/cat.raw".into(),
    })?;
    queue.enqueue(Delete {
        path: "/etc/passwd".into(),
    })?;
    queue.emplace(|| format!("batch of {} finished", 3))?;

    queue.shutdown()?;

    println!(
        "\nProcessed {}, failed {} (failures are logged by the default error sink)",
        queue.total_processed(),
        queue.total_failed()
    );
    Ok(())
}
