//! MapReduce engine: phase orchestration over the worker pool and store
//!
//! A run moves through a fixed sequence of phases, separated by the pool's
//! drain barrier:
//!
//! ```text
//! ┌─────────┐   one job    ┌─────────┐  drain   ┌──────────┐  drain   ┌──────────┐
//! │  Start  │ ──per input─>│   Map   │ ───────> │  Reduce  │ ───────> │ Teardown │
//! └─────────┘              └────┬────┘          └────┬─────┘          └──────────┘
//!                               │ panic              │ panic
//!                               v                    v
//!                          ┌─────────────────────────────┐
//!                          │ Error (run aborted)         │
//!                          └─────────────────────────────┘
//! ```
//!
//! - **Map**: one job per input, cost = input size. Mappers emit into the
//!   [`PartitionStore`](crate::store::PartitionStore) through an [`Emitter`].
//! - **Reduce**: one job per non-empty partition, cost = buffered record
//!   count. No reduce job exists before the map barrier returns, and no
//!   partition ever gets two reduce jobs.
//! - **Teardown**: the pool is shut down (nothing is pending at that point),
//!   then the store is dropped.
//!
//! # Callback contract
//!
//! Mapper and reducer callbacks must not panic. A panic is fatal for the run:
//! the engine does not retry and returns
//! [`EngineError::JobPanicked`](crate::error::EngineError::JobPanicked) once
//! the current phase drained.

pub mod coordinator;
pub mod input;
pub mod map;
pub mod reduce;

pub use coordinator::{run, Engine, PhaseContext};
pub use input::MapInput;
pub use map::MapPhaseExecutor;
pub use reduce::{drive_partition, ReduceOutcome, ReducePhaseExecutor};

use crate::pool::PoolStats;
use crate::store::{Emitter, Values};
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// User map logic for inputs of type `I`
pub trait Mapper<I: ?Sized>: Send + Sync {
    /// Process one input, emitting zero or more records
    fn map(&self, input: &I, emitter: &Emitter<'_>);
}

/// User reduce logic
pub trait Reducer: Send + Sync {
    /// Consume the values of `key`
    ///
    /// `values` is lazy and one-pass. Values left unconsumed when this returns
    /// are discarded by the engine.
    fn reduce(&self, key: &str, values: &mut Values<'_>);
}

/// Adapter turning a closure into a [`Mapper`]
pub struct FnMapper<I: ?Sized, F> {
    f: F,
    _input: PhantomData<fn(&I)>,
}

/// Wrap `f` as a [`Mapper`]
pub fn mapper_fn<I, F>(f: F) -> FnMapper<I, F>
where
    I: ?Sized,
    F: Fn(&I, &Emitter<'_>) + Send + Sync,
{
    FnMapper {
        f,
        _input: PhantomData,
    }
}

impl<I, F> Mapper<I> for FnMapper<I, F>
where
    I: ?Sized,
    F: Fn(&I, &Emitter<'_>) + Send + Sync,
{
    fn map(&self, input: &I, emitter: &Emitter<'_>) {
        (self.f)(input, emitter)
    }
}

/// Adapter turning a closure into a [`Reducer`]
pub struct FnReducer<F> {
    f: F,
}

/// Wrap `f` as a [`Reducer`]
pub fn reducer_fn<F>(f: F) -> FnReducer<F>
where
    F: Fn(&str, &mut Values<'_>) + Send + Sync,
{
    FnReducer { f }
}

impl<F> Reducer for FnReducer<F>
where
    F: Fn(&str, &mut Values<'_>) + Send + Sync,
{
    fn reduce(&self, key: &str, values: &mut Values<'_>) {
        (self.f)(key, values)
    }
}

/// Phase of a MapReduce run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhaseType {
    /// One job per input, producing records
    Map,
    /// One job per non-empty partition, consuming records
    Reduce,
}

impl fmt::Display for PhaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseType::Map => write!(f, "Map"),
            PhaseType::Reduce => write!(f, "Reduce"),
        }
    }
}

/// Metrics collected during phase execution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseMetrics {
    pub phase: PhaseType,
    /// Jobs submitted to the pool
    pub jobs_submitted: usize,
    /// Records emitted (map) or values consumed (reduce)
    pub items_processed: usize,
    /// Distinct keys handed to the reducer
    pub keys_reduced: usize,
    /// Values the reducer left unconsumed
    pub items_discarded: usize,
    /// Duration in seconds
    pub duration_secs: f64,
}

/// Outcome of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub workers: usize,
    pub partitions: usize,
    pub map: PhaseMetrics,
    pub reduce: PhaseMetrics,
    pub pool: PoolStats,
    pub duration_secs: f64,
}

#[derive(Debug, Default)]
pub(crate) struct PhaseCounters {
    jobs: AtomicUsize,
    items: AtomicUsize,
    keys: AtomicUsize,
    discarded: AtomicUsize,
}

impl PhaseCounters {
    pub(crate) fn job_submitted(&self) {
        self.jobs.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_items(&self, count: usize) {
        self.items.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn add_reduce_outcome(&self, outcome: &ReduceOutcome) {
        self.items.fetch_add(outcome.values_consumed, Ordering::Relaxed);
        self.keys.fetch_add(outcome.keys_reduced, Ordering::Relaxed);
        self.discarded
            .fetch_add(outcome.values_discarded, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, phase: PhaseType, elapsed: Duration) -> PhaseMetrics {
        PhaseMetrics {
            phase,
            jobs_submitted: self.jobs.load(Ordering::Relaxed),
            items_processed: self.items.load(Ordering::Relaxed),
            keys_reduced: self.keys.load(Ordering::Relaxed),
            items_discarded: self.discarded.load(Ordering::Relaxed),
            duration_secs: elapsed.as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod reduce_test;
