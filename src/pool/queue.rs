//! Shortest-job-first queue of pending jobs

use super::job::Job;
use std::collections::VecDeque;

/// Pending jobs ordered by ascending cost hint
///
/// Among jobs with equal cost, insertion order is preserved: a new job lands
/// after every queued job whose cost is equal to or lower than its own.
#[derive(Debug, Default)]
pub struct JobQueue {
    jobs: VecDeque<Job>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `job` at its shortest-job-first position
    pub fn push(&mut self, job: Job) {
        let cost = job.cost();
        let position = self.jobs.partition_point(|queued| queued.cost() <= cost);
        self.jobs.insert(position, job);
    }

    /// Remove the cheapest job (earliest submitted among ties)
    pub fn pop(&mut self) -> Option<Job> {
        self.jobs.pop_front()
    }

    /// Cost of the job that `pop` would return next
    pub fn peek_cost(&self) -> Option<u64> {
        self.jobs.front().map(Job::cost)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Drop every queued job without running it, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let discarded = self.jobs.len();
        self.jobs.clear();
        discarded
    }
}
