//! Integration tests for word count over files and in-memory text

mod common;

use common::{reference_counts, sample_corpus, sample_counts, CorpusBuilder};
use mapreduce_engine::wordcount::count_words;
use mapreduce_engine::EngineConfig;
use proptest::prelude::*;

#[test]
fn test_word_count_over_files() -> anyhow::Result<()> {
    let corpus = sample_corpus()?;

    let (counts, summary) = count_words(corpus.inputs(), &EngineConfig::new(4, 2))?;

    assert_eq!(counts, sample_counts());
    assert_eq!(summary.map.items_processed, 9);
    assert_eq!(summary.reduce.items_processed, 9);
    assert_eq!(summary.reduce.keys_reduced, 6);
    Ok(())
}

#[test]
fn test_result_does_not_depend_on_worker_or_partition_count() -> anyhow::Result<()> {
    let corpus = CorpusBuilder::new()?
        .with_file("big.txt", &"alpha beta gamma delta ".repeat(200))
        .with_file("small.txt", "alpha omega")
        .with_file("empty.txt", "")
        .with_file("nested/mixed.txt", "Beta beta\tBETA\n\ngamma")
        .build()?;

    let (baseline, _) = count_words(corpus.inputs(), &EngineConfig::new(1, 1))?;
    for (workers, partitions) in [(2, 3), (4, 10), (8, 64)] {
        let (counts, _) = count_words(corpus.inputs(), &EngineConfig::new(workers, partitions))?;
        assert_eq!(counts, baseline, "{workers} workers, {partitions} partitions");
    }

    assert_eq!(baseline.get("alpha"), Some(&201));
    assert_eq!(baseline.get("beta"), Some(&201));
    assert_eq!(baseline.get("Beta"), Some(&1));
    assert_eq!(baseline.get("BETA"), Some(&1));
    Ok(())
}

#[test]
fn test_missing_file_contributes_nothing() -> anyhow::Result<()> {
    let corpus = sample_corpus()?;
    let mut inputs = corpus.inputs();
    inputs.push(corpus.path().join("missing.txt"));

    let (counts, summary) = count_words(inputs, &EngineConfig::new(2, 4))?;

    assert_eq!(counts, sample_counts());
    assert_eq!(summary.map.jobs_submitted, 4);
    Ok(())
}

#[test]
fn test_invalid_utf8_is_counted_lossily() -> anyhow::Result<()> {
    let corpus = CorpusBuilder::new()?.build()?;
    let path = corpus.path().join("binary.txt");
    std::fs::write(&path, b"ok \xff\xfe ok")?;

    let (counts, _) = count_words(vec![path], &EngineConfig::new(2, 2))?;

    assert_eq!(counts.get("ok"), Some(&2));
    assert_eq!(counts.values().sum::<u64>(), 3);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_counts_match_sequential_reference(
        texts in prop::collection::vec("[a-d ]{0,40}", 0..12),
        workers in 1usize..5,
        partitions in 1usize..7,
    ) {
        let expected = reference_counts(texts.iter().map(String::as_str));
        let (counts, summary) = count_words(texts, &EngineConfig::new(workers, partitions)).unwrap();

        prop_assert_eq!(summary.map.items_processed as u64, expected.values().sum::<u64>());
        prop_assert_eq!(summary.reduce.items_discarded, 0);
        prop_assert_eq!(counts, expected);
    }
}
