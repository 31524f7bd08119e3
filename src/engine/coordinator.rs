//! Run coordinator: owns the pool and store for the lifetime of one run
//!
//! 1. Create the worker pool and the partition store
//! 2. Map phase, then barrier
//! 3. Reduce phase, then barrier
//! 4. Shut the pool down, then drop the store
//!
//! A failing phase aborts the run. There is no partial-run recovery.

use super::{
    MapInput, MapPhaseExecutor, Mapper, PhaseMetrics, PhaseType, ReducePhaseExecutor, Reducer,
    RunSummary,
};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::pool::{PoolStats, WorkerPool};
use crate::store::PartitionStore;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Resources shared by the phases of one run
pub struct PhaseContext {
    pool: WorkerPool,
    store: Arc<PartitionStore>,
}

impl PhaseContext {
    /// Create the pool and store described by `config`
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let pool = WorkerPool::new(config.workers)?;
        let store = Arc::new(PartitionStore::new(config.partitions)?);
        Ok(Self { pool, store })
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    pub fn store(&self) -> &Arc<PartitionStore> {
        &self.store
    }

    /// Shut the pool down, then release the store
    pub fn shutdown(self) -> PoolStats {
        let Self { mut pool, store } = self;
        pool.shutdown();
        let stats = pool.stats();

        let remaining = store.len();
        if remaining > 0 {
            debug!("Dropping {} unconsumed records", remaining);
        }
        drop(store);
        stats
    }
}

/// MapReduce engine configured with a worker and partition count
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run `mapper` over every input, then `reducer` over every key
    ///
    /// Blocks the caller until both phases completed.
    pub fn run<I, M, R>(&self, inputs: Vec<I>, mapper: M, reducer: R) -> Result<RunSummary>
    where
        I: MapInput,
        M: Mapper<I> + 'static,
        R: Reducer + 'static,
    {
        let started = Instant::now();
        info!(
            "Starting MapReduce run: {} inputs, {} workers, {} partitions",
            inputs.len(),
            self.config.workers,
            self.config.partitions
        );

        let context = PhaseContext::new(&self.config)?;

        let map = Self::execute_phase(PhaseType::Map, &context, |ctx| {
            MapPhaseExecutor::new(inputs, mapper).execute(ctx)
        });
        let map = match map {
            Ok(metrics) => metrics,
            Err(e) => {
                context.shutdown();
                return Err(e);
            }
        };

        let reduce = Self::execute_phase(PhaseType::Reduce, &context, |ctx| {
            ReducePhaseExecutor::new(reducer).execute(ctx)
        });
        let reduce = match reduce {
            Ok(metrics) => metrics,
            Err(e) => {
                context.shutdown();
                return Err(e);
            }
        };

        let pool = context.shutdown();
        let summary = RunSummary {
            workers: self.config.workers,
            partitions: self.config.partitions,
            map,
            reduce,
            pool,
            duration_secs: started.elapsed().as_secs_f64(),
        };
        info!(
            "MapReduce run finished in {:.3}s: {} records emitted, {} keys reduced",
            summary.duration_secs, summary.map.items_processed, summary.reduce.keys_reduced
        );
        Ok(summary)
    }

    fn execute_phase<F>(phase: PhaseType, context: &PhaseContext, execute: F) -> Result<PhaseMetrics>
    where
        F: FnOnce(&PhaseContext) -> Result<PhaseMetrics>,
    {
        debug!("Entering {} phase", phase);
        match execute(context) {
            Ok(metrics) => {
                info!(
                    "{} phase completed: {} jobs, {} items in {:.3}s",
                    phase, metrics.jobs_submitted, metrics.items_processed, metrics.duration_secs
                );
                Ok(metrics)
            }
            Err(e) => {
                error!("{} phase failed: {}", phase, e);
                Err(e)
            }
        }
    }
}

/// Run a complete MapReduce job with `num_workers` threads and `num_partitions` partitions
pub fn run<I, M, R>(
    inputs: Vec<I>,
    mapper: M,
    reducer: R,
    num_workers: usize,
    num_partitions: usize,
) -> Result<RunSummary>
where
    I: MapInput,
    M: Mapper<I> + 'static,
    R: Reducer + 'static,
{
    Engine::new(EngineConfig::new(num_workers, num_partitions))?.run(inputs, mapper, reducer)
}
