//! A single shard of intermediate map output

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// One emitted key/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub value: String,
}

impl Record {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Records of one partition, sorted ascending by key
///
/// Values for the same key stay in emission order. The sequence is consumed
/// from the head: [`Partition::consume_next`] pops the earliest record of the
/// head key group and frees it immediately.
#[derive(Debug, Default)]
pub struct Partition {
    groups: BTreeMap<String, VecDeque<String>>,
    len: usize,
}

impl Partition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert after every record whose key is less than or equal to `record.key`
    pub fn insert(&mut self, record: Record) {
        self.groups
            .entry(record.key)
            .or_default()
            .push_back(record.value);
        self.len += 1;
    }

    /// Key of the head record, if any
    pub fn peek_head_key(&self) -> Option<&str> {
        self.groups.keys().next().map(String::as_str)
    }

    /// Pop the next value of `key` if `key` is the head group
    ///
    /// Returns `None` when the partition is empty or the head key differs,
    /// which signals the end of the group rather than an error.
    pub fn consume_next(&mut self, key: &str) -> Option<String> {
        let mut head = self.groups.first_entry()?;
        if head.key() != key {
            return None;
        }

        let value = head.get_mut().pop_front();
        if head.get().is_empty() {
            head.remove();
        }
        if value.is_some() {
            self.len -= 1;
        }
        value
    }

    /// Drop every remaining value of the head group `key`, returning how many
    pub fn discard_group(&mut self, key: &str) -> usize {
        let mut discarded = 0;
        while self.consume_next(key).is_some() {
            discarded += 1;
        }
        discarded
    }

    /// Number of distinct keys still buffered
    pub fn key_count(&self) -> usize {
        self.groups.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remaining records in consumption order
    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        self.groups.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| Record::new(key.as_str(), value.as_str()))
        })
    }
}
