//! Map phase executor
//!
//! Submits one job per input and waits on the pool barrier. Emissions from
//! different inputs interleave freely; a single mapper invocation emits only
//! from its own worker thread.

use super::{Mapper, MapInput, PhaseContext, PhaseCounters, PhaseMetrics, PhaseType};
use crate::error::Result;
use crate::pool::Job;
use crate::store::Emitter;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Executor for the map phase
pub struct MapPhaseExecutor<I, M> {
    inputs: Vec<I>,
    mapper: Arc<M>,
}

impl<I, M> MapPhaseExecutor<I, M>
where
    I: MapInput,
    M: Mapper<I> + 'static,
{
    pub fn new(inputs: Vec<I>, mapper: M) -> Self {
        Self {
            inputs,
            mapper: Arc::new(mapper),
        }
    }

    /// Run every input through the mapper and block until all map jobs finished
    pub fn execute(self, context: &PhaseContext) -> Result<PhaseMetrics> {
        let started = Instant::now();
        let counters = Arc::new(PhaseCounters::default());

        info!("Distributing {} inputs to map jobs", self.inputs.len());
        for input in self.inputs {
            let cost = input.cost_hint();
            let label = input.label();
            debug!("Submitting map job for {} (cost {})", label, cost);

            let store = Arc::clone(context.store());
            let mapper = Arc::clone(&self.mapper);
            let job_counters = Arc::clone(&counters);
            context.pool().submit(Job::map(label, cost, move || {
                let emitter = Emitter::new(&store);
                mapper.map(&input, &emitter);
                job_counters.add_items(emitter.emitted());
            }))?;
            counters.job_submitted();
        }

        context.pool().drain()?;
        Ok(counters.snapshot(PhaseType::Map, started.elapsed()))
    }
}
