//! Reduce phase executor and the per-partition reduce driver
//!
//! Each reduce job owns its partition's lock for the whole job and walks the
//! partition one key group at a time:
//!
//! ```text
//! Start ──> peek head key ──None──> Done
//!               │  ^
//!          Some(key)└──────────────────────────────┐
//!               v                                  │
//!        reducer.reduce(key, values) ──> discard leftovers of key
//! ```

use super::{PhaseContext, PhaseCounters, PhaseMetrics, PhaseType, Reducer};
use crate::error::Result;
use crate::pool::Job;
use crate::store::{Partition, Values};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What one reduce job did to its partition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReduceOutcome {
    pub keys_reduced: usize,
    pub values_consumed: usize,
    pub values_discarded: usize,
}

/// Reduce every key group of `partition`, leaving it empty
///
/// Values the reducer does not consume are discarded once it returns, so
/// every key is handed to the reducer exactly once.
pub fn drive_partition<R>(partition: &mut Partition, index: usize, reducer: &R) -> ReduceOutcome
where
    R: Reducer + ?Sized,
{
    let mut outcome = ReduceOutcome::default();

    while let Some(key) = partition.peek_head_key().map(str::to_owned) {
        let mut values = Values::new(partition, &key, index);
        reducer.reduce(&key, &mut values);
        outcome.values_consumed += values.consumed();
        outcome.keys_reduced += 1;

        let leftover = partition.discard_group(&key);
        if leftover > 0 {
            warn!(
                "Reducer left {} values of key {:?} in partition {} unconsumed; discarding",
                leftover, key, index
            );
            outcome.values_discarded += leftover;
        }
    }

    outcome
}

/// Executor for the reduce phase
pub struct ReducePhaseExecutor<R> {
    reducer: Arc<R>,
}

impl<R> ReducePhaseExecutor<R>
where
    R: Reducer + 'static,
{
    pub fn new(reducer: R) -> Self {
        Self {
            reducer: Arc::new(reducer),
        }
    }

    /// Submit one job per non-empty partition and block until all finished
    ///
    /// Must only run after the map phase drained: partitions are sized from a
    /// snapshot taken here.
    pub fn execute(&self, context: &PhaseContext) -> Result<PhaseMetrics> {
        let started = Instant::now();
        let counters = Arc::new(PhaseCounters::default());
        let store = context.store();

        let partitions = store.non_empty_partitions();
        info!(
            "Reducing {} of {} partitions",
            partitions.len(),
            store.num_partitions()
        );

        for (index, size) in partitions {
            debug!("Submitting reduce job for partition {} ({} records)", index, size);

            let store = Arc::clone(store);
            let reducer = Arc::clone(&self.reducer);
            let job_counters = Arc::clone(&counters);
            context.pool().submit(Job::reduce(index, size, move || {
                let mut partition = store.partition(index);
                let outcome = drive_partition(&mut partition, index, reducer.as_ref());
                job_counters.add_reduce_outcome(&outcome);
            }))?;
            counters.job_submitted();
        }

        context.pool().drain()?;
        Ok(counters.snapshot(PhaseType::Reduce, started.elapsed()))
    }
}
