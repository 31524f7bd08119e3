//! Engine configuration
//!
//! Values are resolved in increasing priority:
//!
//! 1. Built-in defaults (`workers` = available parallelism, `partitions` = 10)
//! 2. A TOML file (see [`loader::load_config`])
//! 3. `MR_WORKERS` / `MR_PARTITIONS` environment variables
//! 4. Explicit overrides from the caller (command-line flags)
//!
//! ```toml
//! workers = 8
//! partitions = 16
//! ```

pub mod loader;

pub use loader::load_config;

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::thread;

pub const DEFAULT_PARTITIONS: usize = 10;
const FALLBACK_WORKERS: usize = 4;

pub const WORKERS_ENV: &str = "MR_WORKERS";
pub const PARTITIONS_ENV: &str = "MR_PARTITIONS";

/// Worker and partition counts for a run
///
/// Both are fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Number of worker threads in the pool
    pub workers: usize,
    /// Number of partitions in the intermediate store
    pub partitions: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(FALLBACK_WORKERS);
        Self {
            workers,
            partitions: DEFAULT_PARTITIONS,
        }
    }
}

impl EngineConfig {
    pub fn new(workers: usize, partitions: usize) -> Self {
        Self {
            workers,
            partitions,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_partitions(mut self, partitions: usize) -> Self {
        self.partitions = partitions;
        self
    }

    /// Parse a TOML document; missing fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `MR_WORKERS` / `MR_PARTITIONS` from the process environment
    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_vars_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn merge_vars_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(WORKERS_ENV) {
            self.workers = parse_count("workers", WORKERS_ENV, &value)?;
        }
        if let Some(value) = lookup(PARTITIONS_ENV) {
            self.partitions = parse_count("partitions", PARTITIONS_ENV, &value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(EngineError::invalid_config("workers", "must be at least 1"));
        }
        if self.partitions == 0 {
            return Err(EngineError::invalid_config("partitions", "must be at least 1"));
        }
        Ok(())
    }
}

fn parse_count(field: &'static str, variable: &str, value: &str) -> Result<usize> {
    value.trim().parse::<usize>().map_err(|e| {
        EngineError::invalid_config(field, format!("{variable}={value:?} is not a count: {e}"))
    })
}
