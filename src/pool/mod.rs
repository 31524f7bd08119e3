//! Worker pool with shortest-job-first scheduling
//!
//! The pool runs [`Job`]s on a fixed number of OS threads. Jobs resident in
//! the queue at the same time are dequeued by ascending cost hint, ties in
//! submission order. There is no ordering guarantee between a job submitted
//! while another is executing and that job's completion.
//!
//! ```text
//! submit ──> [JobQueue: 1 ─ 3 ─ 3 ─ 5] ──> worker 0 ─┐
//!                                     └──> worker 1 ─┼──> idle ──> drain returns
//!                                     └──> worker N ─┘
//! ```

pub mod job;
pub mod queue;
pub mod worker_pool;

pub use job::{Job, JobKind, Task};
pub use queue::JobQueue;
pub use worker_pool::{PoolStats, WorkerPool};
