//! Performance benchmarks for the shortest-job-first scheduler
//!
//! - Queue insertion cost with ascending, descending and mixed costs
//! - Pool round-trip: submit a batch of trivial jobs and drain

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mapreduce_engine::pool::{Job, JobQueue, WorkerPool};
use std::hint::black_box;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn costs(pattern: &str, n: u64) -> Vec<u64> {
    match pattern {
        "ascending" => (0..n).collect(),
        "descending" => (0..n).rev().collect(),
        _ => (0..n).map(|i| (i * 7919) % n).collect(),
    }
}

fn bench_queue_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("sjf_queue_insert");

    for pattern in ["ascending", "descending", "mixed"] {
        let costs = costs(pattern, 5_000);
        group.bench_with_input(BenchmarkId::new(pattern, costs.len()), &costs, |b, costs| {
            b.iter(|| {
                let mut queue = JobQueue::new();
                for &cost in costs {
                    queue.push(Job::map("bench", cost, || {}));
                }
                black_box(queue.len())
            });
        });
    }

    group.finish();
}

fn bench_submit_and_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_submit_drain");

    for workers in [1usize, 4, 8] {
        let pool = WorkerPool::new(workers).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, _| {
            b.iter(|| {
                for i in 0..1_000u64 {
                    let counter = Arc::clone(&counter);
                    pool.submit(Job::map("bench", i % 13, move || {
                        counter.fetch_add(1, Ordering::Relaxed);
                    }))
                    .unwrap();
                }
                pool.drain().unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_queue_insert, bench_submit_and_drain);
criterion_main!(benches);
