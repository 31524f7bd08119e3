//! Unit tests for the reduce driver and the reduce phase executor

use super::*;
use crate::config::EngineConfig;
use crate::store::{Partition, Record};
use parking_lot::Mutex;
use std::sync::Arc;

fn partition_with(records: &[(&str, &str)]) -> Partition {
    let mut partition = Partition::new();
    for (key, value) in records {
        partition.insert(Record::new(*key, *value));
    }
    partition
}

#[test]
fn test_drive_partition_visits_keys_in_order() {
    let mut partition = partition_with(&[("b", "1"), ("a", "1"), ("c", "1"), ("a", "2")]);
    let calls = Mutex::new(Vec::new());
    let reducer = reducer_fn(|key, values| {
        let collected: Vec<String> = values.by_ref().collect();
        calls.lock().push((key.to_string(), collected));
    });

    let outcome = drive_partition(&mut partition, 0, &reducer);

    let calls = calls.into_inner();
    let keys: Vec<&str> = calls.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
    assert_eq!(calls[0].1, vec!["1".to_string(), "2".to_string()]);
    assert_eq!(
        outcome,
        ReduceOutcome {
            keys_reduced: 3,
            values_consumed: 4,
            values_discarded: 0,
        }
    );
    assert!(partition.is_empty());
}

#[test]
fn test_drive_partition_discards_leftovers() {
    let mut partition = partition_with(&[("k", "1"), ("k", "2"), ("k", "3"), ("z", "9")]);
    let calls = Mutex::new(0usize);
    let reducer = reducer_fn(|_key, values| {
        *calls.lock() += 1;
        let _ = values.next();
    });

    let outcome = drive_partition(&mut partition, 2, &reducer);

    assert_eq!(calls.into_inner(), 2);
    assert_eq!(outcome.keys_reduced, 2);
    assert_eq!(outcome.values_consumed, 2);
    assert_eq!(outcome.values_discarded, 2);
    assert!(partition.is_empty());
}

#[test]
fn test_values_report_their_key_and_partition() {
    let mut partition = partition_with(&[("key", "v")]);
    let seen = Mutex::new(None);
    let reducer = reducer_fn(|key, values| {
        assert_eq!(values.key(), key);
        *seen.lock() = Some(values.partition_index());
        values.by_ref().for_each(drop);
    });

    drive_partition(&mut partition, 7, &reducer);
    assert_eq!(seen.into_inner(), Some(7));
}

#[test]
fn test_drive_empty_partition_is_a_no_op() {
    let mut partition = Partition::new();
    let reducer = reducer_fn(|_key, _values| panic!("no key to reduce"));

    let outcome = drive_partition(&mut partition, 0, &reducer);
    assert_eq!(outcome, ReduceOutcome::default());
}

#[test]
fn test_reduce_phase_empties_the_store() {
    let context = PhaseContext::new(&EngineConfig::new(2, 4)).unwrap();
    for key in ["w", "x", "y", "z", "x"] {
        context.store().emit(key, "1");
    }
    let occupied = context.store().non_empty_partitions().len();

    let keys = Arc::new(Mutex::new(Vec::new()));
    let reducer = {
        let keys = Arc::clone(&keys);
        reducer_fn(move |key, values| {
            values.by_ref().for_each(drop);
            keys.lock().push(key.to_string());
        })
    };

    let metrics = ReducePhaseExecutor::new(reducer).execute(&context).unwrap();

    assert_eq!(metrics.phase, PhaseType::Reduce);
    assert_eq!(metrics.jobs_submitted, occupied);
    assert_eq!(metrics.keys_reduced, 4);
    assert_eq!(metrics.items_processed, 5);
    assert!(context.store().is_empty());

    let mut keys = keys.lock().clone();
    keys.sort();
    assert_eq!(keys, vec!["w", "x", "y", "z"]);
}
