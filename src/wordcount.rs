//! Word count over text inputs
//!
//! The mapper splits each input on whitespace and emits `(word, "1")` per
//! word; the reducer sums the values of each word.

use crate::config::EngineConfig;
use crate::engine::{Engine, MapInput, Mapper, Reducer, RunSummary};
use crate::error::Result;
use crate::store::{Emitter, Values};
use parking_lot::Mutex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// Final count per word, ordered by word
pub type WordCounts = BTreeMap<String, u64>;

fn emit_words(text: &str, emitter: &Emitter<'_>) {
    for word in text.split_whitespace() {
        emitter.emit(word, "1");
    }
}

/// Emits `(word, "1")` for every whitespace-separated word of its input
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCountMapper;

impl Mapper<String> for WordCountMapper {
    fn map(&self, text: &String, emitter: &Emitter<'_>) {
        emit_words(text, emitter);
    }
}

impl Mapper<&'static str> for WordCountMapper {
    fn map(&self, text: &&'static str, emitter: &Emitter<'_>) {
        emit_words(text, emitter);
    }
}

/// Files are read whole; invalid UTF-8 is replaced rather than rejected
impl Mapper<PathBuf> for WordCountMapper {
    fn map(&self, path: &PathBuf, emitter: &Emitter<'_>) {
        match fs::read(path) {
            Ok(bytes) => {
                let text: Cow<'_, str> = String::from_utf8_lossy(&bytes);
                emit_words(&text, emitter);
            }
            Err(e) => warn!("Skipping unreadable input {}: {}", path.display(), e),
        }
    }
}

/// Sums the counts of each word into a shared table
#[derive(Debug, Clone, Default)]
pub struct WordCountReducer {
    counts: Arc<Mutex<WordCounts>>,
}

impl WordCountReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the counts reduced so far
    pub fn counts(&self) -> WordCounts {
        self.counts.lock().clone()
    }
}

impl Reducer for WordCountReducer {
    fn reduce(&self, key: &str, values: &mut Values<'_>) {
        let mut total = 0u64;
        for value in values.by_ref() {
            match value.parse::<u64>() {
                Ok(count) => total += count,
                Err(e) => warn!("Ignoring non-numeric count {:?} for {:?}: {}", value, key, e),
            }
        }
        *self.counts.lock().entry(key.to_string()).or_default() += total;
    }
}

/// Count the words of every input
pub fn count_words<I>(inputs: Vec<I>, config: &EngineConfig) -> Result<(WordCounts, RunSummary)>
where
    I: MapInput,
    WordCountMapper: Mapper<I>,
{
    let reducer = WordCountReducer::new();
    let summary = Engine::new(config.clone())?.run(inputs, WordCountMapper, reducer.clone())?;
    Ok((reducer.counts(), summary))
}
