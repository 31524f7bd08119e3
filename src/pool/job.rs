//! Units of work scheduled on the worker pool

use serde::Serialize;
use std::fmt;

/// Boxed callback executed by a worker thread
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// What a job does, decided when it is submitted
///
/// The kind is only used for scheduling diagnostics and error reporting.
/// The pool never inspects a job's payload to figure out what it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobKind {
    /// Runs the mapper over one input
    Map { input: String },
    /// Drives the reducer over one partition
    Reduce { partition: usize, size: usize },
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::Map { input } => write!(f, "map({input})"),
            JobKind::Reduce { partition, size } => {
                write!(f, "reduce(partition {partition}, {size} records)")
            }
        }
    }
}

/// A scheduled callback together with its kind and cost hint
///
/// Jobs are immutable once built. The cost hint is a scheduling estimate only:
/// input byte size for map jobs, buffered record count for reduce jobs.
pub struct Job {
    kind: JobKind,
    cost: u64,
    task: Task,
}

impl Job {
    pub fn new(kind: JobKind, cost: u64, task: impl FnOnce() + Send + 'static) -> Self {
        Self {
            kind,
            cost,
            task: Box::new(task),
        }
    }

    /// Build a map job for `input` weighted by its size
    pub fn map(input: impl Into<String>, cost: u64, task: impl FnOnce() + Send + 'static) -> Self {
        Self::new(
            JobKind::Map {
                input: input.into(),
            },
            cost,
            task,
        )
    }

    /// Build a reduce job for `partition`; the record count doubles as cost
    pub fn reduce(partition: usize, size: usize, task: impl FnOnce() + Send + 'static) -> Self {
        Self::new(JobKind::Reduce { partition, size }, size as u64, task)
    }

    pub fn kind(&self) -> &JobKind {
        &self.kind
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub(crate) fn into_parts(self) -> (JobKind, u64, Task) {
        (self.kind, self.cost, self.task)
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("kind", &self.kind)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}
