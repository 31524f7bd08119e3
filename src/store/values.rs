//! Capabilities handed to user callbacks: emitting and consuming records

use super::partition::Partition;
use super::PartitionStore;
use std::cell::Cell;
use std::iter::FusedIterator;

/// Emit capability given to a mapper for the duration of one map job
pub struct Emitter<'a> {
    store: &'a PartitionStore,
    emitted: Cell<usize>,
}

impl<'a> Emitter<'a> {
    pub fn new(store: &'a PartitionStore) -> Self {
        Self {
            store,
            emitted: Cell::new(0),
        }
    }

    /// Route `(key, value)` to its partition
    pub fn emit(&self, key: impl Into<String>, value: impl Into<String>) {
        self.store.emit(key, value);
        self.emitted.set(self.emitted.get() + 1);
    }

    /// Records emitted through this handle so far
    pub fn emitted(&self) -> usize {
        self.emitted.get()
    }
}

/// Lazy, one-pass sequence of the values buffered for one key
///
/// Each call to `next` destructively consumes the head record of the
/// partition. Once the group is exhausted the iterator stays exhausted; it
/// cannot be restarted.
pub struct Values<'a> {
    partition: &'a mut Partition,
    key: &'a str,
    index: usize,
    consumed: usize,
    exhausted: bool,
}

impl<'a> Values<'a> {
    pub(crate) fn new(partition: &'a mut Partition, key: &'a str, index: usize) -> Self {
        Self {
            partition,
            key,
            index,
            consumed: 0,
            exhausted: false,
        }
    }

    pub fn key(&self) -> &str {
        self.key
    }

    /// Index of the partition being reduced
    pub fn partition_index(&self) -> usize {
        self.index
    }

    /// Values handed out so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl Iterator for Values<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }
        match self.partition.consume_next(self.key) {
            Some(value) => {
                self.consumed += 1;
                Some(value)
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}

impl FusedIterator for Values<'_> {}
