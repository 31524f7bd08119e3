use crate::pool::JobKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Failed to spawn worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("Worker pool has been shut down")]
    PoolShutDown,

    #[error("{kind} job panicked: {message}")]
    JobPanicked { kind: JobKind, message: String },

    #[error("Partition {index} out of range (store has {partitions} partitions)")]
    PartitionOutOfRange { index: usize, partitions: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl EngineError {
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
