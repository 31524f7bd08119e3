//! Fixed-size pool of worker threads with a drain barrier
//!
//! All mutable pool state lives behind a single lock. Two condition variables
//! coordinate the threads:
//!
//! - `work_available` wakes one idle worker per submitted job, and every
//!   worker on shutdown
//! - `idle` wakes barrier waiters once the queue is empty and no job is in
//!   flight
//!
//! A worker releases its in-flight slot only after its job returned, so a
//! transiently empty queue never lets `drain` return early.

use super::job::{Job, JobKind};
use super::queue::JobQueue;
use crate::error::{EngineError, Result};
use parking_lot::{Condvar, Mutex};
use serde::Serialize;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, error, trace, warn};

/// Counters describing what the pool has done so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub submitted: usize,
    pub completed: usize,
    pub panicked: usize,
    pub discarded: usize,
}

#[derive(Default)]
struct PoolState {
    queue: JobQueue,
    in_flight: usize,
    idle_workers: usize,
    shutdown: bool,
    stats: PoolStats,
    failure: Option<(JobKind, String)>,
}

impl PoolState {
    fn is_quiescent(&self) -> bool {
        self.queue.is_empty() && self.in_flight == 0
    }
}

struct Shared {
    state: Mutex<PoolState>,
    work_available: Condvar,
    idle: Condvar,
}

/// A fixed set of worker threads executing jobs shortest-first
///
/// # Callback contract
///
/// Jobs must not fail in a way the caller has to handle. A job that panics is
/// fatal for the run: the pool keeps its barrier sound, remembers the first
/// panic, and every subsequent [`WorkerPool::drain`] reports it as
/// [`EngineError::JobPanicked`]. Nothing is retried.
///
/// `drain` must not be called from inside a job; the calling worker would
/// wait on itself.
pub struct WorkerPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
    num_workers: usize,
}

impl WorkerPool {
    /// Spawn `num_workers` worker threads
    ///
    /// If a thread cannot be spawned, the threads already started are shut
    /// down and the spawn error is returned.
    pub fn new(num_workers: usize) -> Result<Self> {
        if num_workers == 0 {
            return Err(EngineError::invalid_config(
                "workers",
                "worker pool needs at least one thread",
            ));
        }

        let shared = Arc::new(Shared {
            state: Mutex::new(PoolState::default()),
            work_available: Condvar::new(),
            idle: Condvar::new(),
        });

        let mut pool = Self {
            shared,
            workers: Vec::with_capacity(num_workers),
            num_workers,
        };

        for id in 0..num_workers {
            let shared = Arc::clone(&pool.shared);
            let spawned = thread::Builder::new()
                .name(format!("mr-worker-{id}"))
                .spawn(move || worker_loop(&shared, id));

            match spawned {
                Ok(handle) => pool.workers.push(handle),
                Err(e) => {
                    error!("Failed to spawn worker {}: {}", id, e);
                    pool.shutdown();
                    return Err(EngineError::WorkerSpawn(e));
                }
            }
        }

        debug!("Started worker pool with {} threads", num_workers);
        Ok(pool)
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Queue `job` and wake one waiting worker
    pub fn submit(&self, job: Job) -> Result<()> {
        {
            let mut state = self.shared.state.lock();
            if state.shutdown {
                return Err(EngineError::PoolShutDown);
            }
            trace!("Queueing {} with cost {}", job.kind(), job.cost());
            state.queue.push(job);
            state.stats.submitted += 1;
        }
        self.shared.work_available.notify_one();
        Ok(())
    }

    /// Block until the queue is empty and no worker is executing a job
    ///
    /// Returns immediately when there is nothing to wait for. If any job
    /// panicked since the pool was created, the panic is reported here.
    pub fn drain(&self) -> Result<()> {
        let mut state = self.shared.state.lock();
        while !state.is_quiescent() {
            self.shared.idle.wait(&mut state);
        }

        match &state.failure {
            Some((kind, message)) => Err(EngineError::JobPanicked {
                kind: kind.clone(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Jobs queued or currently executing
    pub fn pending(&self) -> usize {
        let state = self.shared.state.lock();
        state.queue.len() + state.in_flight
    }

    /// Workers currently blocked waiting for work
    pub fn idle_workers(&self) -> usize {
        self.shared.state.lock().idle_workers
    }

    pub fn stats(&self) -> PoolStats {
        self.shared.state.lock().stats
    }

    /// Stop the pool and join every worker thread
    ///
    /// Jobs still queued are discarded, not executed; call [`WorkerPool::drain`]
    /// first when all submitted work has to run. Jobs already executing run to
    /// completion. Calling this more than once is harmless.
    pub fn shutdown(&mut self) {
        {
            let mut state = self.shared.state.lock();
            if !state.shutdown {
                state.shutdown = true;
                let discarded = state.queue.clear();
                state.stats.discarded += discarded;
                if discarded > 0 {
                    debug!("Discarding {} queued jobs on shutdown", discarded);
                }
            }
        }
        self.shared.work_available.notify_all();
        self.shared.idle.notify_all();

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("Worker thread exited abnormally");
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(shared: &Shared, id: usize) {
    loop {
        let job = {
            let mut state = shared.state.lock();
            loop {
                if state.shutdown {
                    trace!("Worker {} exiting", id);
                    return;
                }
                if let Some(job) = state.queue.pop() {
                    state.in_flight += 1;
                    break job;
                }
                state.idle_workers += 1;
                shared.work_available.wait(&mut state);
                state.idle_workers -= 1;
            }
        };

        let (kind, cost, task) = job.into_parts();
        trace!("Worker {} running {} (cost {})", id, kind, cost);
        let started = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(task));

        let mut state = shared.state.lock();
        state.in_flight -= 1;
        match outcome {
            Ok(()) => {
                state.stats.completed += 1;
                trace!("Worker {} finished {} in {:?}", id, kind, started.elapsed());
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Worker {} job {} panicked: {}", id, kind, message);
                state.stats.panicked += 1;
                if state.failure.is_none() {
                    state.failure = Some((kind, message));
                }
            }
        }
        if state.is_quiescent() {
            shared.idle.notify_all();
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
