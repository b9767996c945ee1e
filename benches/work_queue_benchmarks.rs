use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rust_task_queue::prelude::*;
use rust_task_queue::typed::VecDispatchQueue;
use std::collections::{LinkedList, VecDeque};
use std::sync::Arc;
use std::thread;

const ITEMS: u64 = 1_000;

fn drain<B: Backend<Item = u64>>(config: QueueConfig) {
    let queue: BoundedWorkQueue<B> = BoundedWorkQueue::new(
        |n| {
            black_box(n.wrapping_mul(31));
            Ok(())
        },
        config,
    )
    .expect("Failed to create queue");
    for i in 0..ITEMS {
        queue.enqueue(i).expect("Failed to enqueue");
    }
    queue.shutdown().expect("Failed to shutdown queue");
}

fn benchmark_queue_creation(c: &mut Criterion) {
    c.bench_function("queue_creation", |b| {
        b.iter(|| {
            let queue: DequeWorkQueue<u64> =
                BoundedWorkQueue::with_workers(|_| Ok(()), 4).expect("Failed to create queue");
            queue.shutdown().expect("Failed to shutdown queue");
        });
    });
}

fn benchmark_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("backend_drain_1000");

    for max in [16_usize, 256] {
        let config = QueueConfig::new(2).with_max_elements(max);
        group.bench_with_input(BenchmarkId::new("vec", max), &config, |b, config| {
            b.iter(|| drain::<Vec<u64>>(config.clone()));
        });
        group.bench_with_input(BenchmarkId::new("list", max), &config, |b, config| {
            b.iter(|| drain::<LinkedList<u64>>(config.clone()));
        });
        group.bench_with_input(BenchmarkId::new("deque", max), &config, |b, config| {
            b.iter(|| drain::<VecDeque<u64>>(config.clone()));
        });
        group.bench_with_input(BenchmarkId::new("ring", max), &config, |b, config| {
            b.iter(|| drain::<RingBuffer<u64>>(config.clone()));
        });
    }

    group.finish();
}

fn benchmark_concurrent_producers(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_producers");

    for producers in [1_u64, 4] {
        group.bench_with_input(
            BenchmarkId::from_parameter(producers),
            &producers,
            |b, &producers| {
                b.iter_batched(
                    || {
                        Arc::new(
                            RingWorkQueue::<u64>::new(
                                |n| {
                                    black_box(n);
                                    Ok(())
                                },
                                QueueConfig::new(4).with_max_elements(64),
                            )
                            .expect("Failed to create queue"),
                        )
                    },
                    |queue| {
                        let handles: Vec<_> = (0..producers)
                            .map(|_| {
                                let queue = Arc::clone(&queue);
                                thread::spawn(move || {
                                    for i in 0..ITEMS / producers {
                                        queue.enqueue(i).expect("Failed to enqueue");
                                    }
                                })
                            })
                            .collect();
                        for handle in handles {
                            handle.join().expect("Producer panicked");
                        }
                        queue.shutdown().expect("Failed to shutdown queue");
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn benchmark_typed_dispatch(c: &mut Criterion) {
    c.bench_function("typed_dispatch_1000", |b| {
        b.iter(|| {
            let queue: VecDispatchQueue<(u64, String)> = VecDispatchQueue::new(
                (
                    |n: u64| {
                        black_box(n);
                        Ok(())
                    },
                    |s: String| {
                        black_box(s.len());
                        Ok(())
                    },
                ),
                QueueConfig::new(2).with_max_elements(128),
            )
            .expect("Failed to create dispatch queue");

            for i in 0..ITEMS {
                if i % 2 == 0 {
                    queue.enqueue(i).expect("Failed to enqueue");
                } else {
                    queue.emplace(|| i.to_string()).expect("Failed to emplace");
                }
            }
            queue.shutdown().expect("Failed to shutdown queue");
        });
    });
}

fn benchmark_ring_buffer(c: &mut Criterion) {
    c.bench_function("ring_buffer_cycle", |b| {
        let mut ring = RingBuffer::new(64);
        b.iter(|| {
            for i in 0..64_u64 {
                ring.append(i);
            }
            while let Some(value) = ring.try_take_front() {
                black_box(value);
            }
        });
    });
}

criterion_group!(
    benches,
    benchmark_queue_creation,
    benchmark_backends,
    benchmark_concurrent_producers,
    benchmark_typed_dispatch,
    benchmark_ring_buffer
);
criterion_main!(benches);
