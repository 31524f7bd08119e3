//! Partitioned intermediate key/value store
//!
//! Map output is sharded across a fixed number of partitions, each behind its
//! own lock. Emissions to different partitions never contend; emissions to
//! the same partition serialize on that partition only.
//!
//! During the reduce phase one job owns a partition for its whole run through
//! [`PartitionStore::lock_partition`]. The map/reduce barrier guarantees no
//! emission is still in flight at that point, and the engine never schedules
//! two reduce jobs for the same partition.

pub mod hash;
pub mod partition;
pub mod values;

pub use hash::{djb2, partition_for};
pub use partition::{Partition, Record};
pub use values::{Emitter, Values};

use crate::error::{EngineError, Result};
use parking_lot::{Mutex, MutexGuard};

/// Exclusive access to one partition
pub type PartitionGuard<'a> = MutexGuard<'a, Partition>;

/// Fixed array of independently locked partitions
#[derive(Debug)]
pub struct PartitionStore {
    partitions: Box<[Mutex<Partition>]>,
}

impl PartitionStore {
    pub fn new(num_partitions: usize) -> Result<Self> {
        if num_partitions == 0 {
            return Err(EngineError::invalid_config(
                "partitions",
                "store needs at least one partition",
            ));
        }

        let partitions = (0..num_partitions)
            .map(|_| Mutex::new(Partition::new()))
            .collect();
        Ok(Self { partitions })
    }

    pub fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    /// Partition index `key` routes to
    pub fn partition_for(&self, key: &str) -> usize {
        partition_for(key, self.partitions.len())
    }

    /// Insert `(key, value)` into its partition, returning the partition index
    pub fn emit(&self, key: impl Into<String>, value: impl Into<String>) -> usize {
        let record = Record::new(key, value);
        let index = self.partition_for(&record.key);
        self.partitions[index].lock().insert(record);
        index
    }

    /// Head key of partition `index`, or `None` when it is empty
    pub fn peek_head_key(&self, index: usize) -> Result<Option<String>> {
        Ok(self.lock_partition(index)?.peek_head_key().map(str::to_owned))
    }

    /// Pop the next value for `key` from partition `index`
    ///
    /// `Ok(None)` means the group is exhausted, or `key` is not at the head.
    pub fn consume_next(&self, key: &str, index: usize) -> Result<Option<String>> {
        Ok(self.lock_partition(index)?.consume_next(key))
    }

    /// Lock partition `index` until the guard is dropped
    pub fn lock_partition(&self, index: usize) -> Result<PartitionGuard<'_>> {
        self.partitions
            .get(index)
            .map(|partition| partition.lock())
            .ok_or(EngineError::PartitionOutOfRange {
                index,
                partitions: self.partitions.len(),
            })
    }

    /// Lock a partition by an index known to be in range
    pub(crate) fn partition(&self, index: usize) -> PartitionGuard<'_> {
        self.partitions[index].lock()
    }

    pub fn partition_len(&self, index: usize) -> Result<usize> {
        Ok(self.lock_partition(index)?.len())
    }

    /// Total records across all partitions
    pub fn len(&self) -> usize {
        self.partitions.iter().map(|p| p.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.iter().all(|p| p.lock().is_empty())
    }

    /// `(index, record count)` of every partition holding records
    pub fn non_empty_partitions(&self) -> Vec<(usize, usize)> {
        self.partitions
            .iter()
            .enumerate()
            .filter_map(|(index, partition)| {
                let len = partition.lock().len();
                (len > 0).then_some((index, len))
            })
            .collect()
    }
}
