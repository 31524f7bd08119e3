//! Common test utilities and helpers

#![allow(dead_code)]

use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test corpus builder for setting up input files
pub struct CorpusBuilder {
    temp_dir: TempDir,
    files: Vec<(PathBuf, String)>,
}

impl CorpusBuilder {
    /// Create a new corpus builder
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            files: Vec::new(),
        })
    }

    /// Add an input file
    pub fn with_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        self.files
            .push((path.as_ref().to_path_buf(), content.to_string()));
        self
    }

    /// Write every file to disk
    pub fn build(self) -> Result<Corpus> {
        let mut paths = Vec::new();
        for (file_path, content) in self.files {
            let full_path = self.temp_dir.path().join(file_path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&full_path, content)?;
            paths.push(full_path);
        }

        Ok(Corpus {
            temp_dir: self.temp_dir,
            paths,
        })
    }
}

/// Input files living in a temporary directory
pub struct Corpus {
    temp_dir: TempDir,
    paths: Vec<PathBuf>,
}

impl Corpus {
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Paths of the input files, in the order they were added
    pub fn inputs(&self) -> Vec<PathBuf> {
        self.paths.clone()
    }

    /// Write an extra file next to the inputs without registering it as one
    pub fn create_file(&self, path: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let full_path = self.temp_dir.path().join(path);
        fs::write(&full_path, content)?;
        Ok(full_path)
    }
}

/// The three-sentence corpus used throughout the word count tests
pub fn sample_corpus() -> Result<Corpus> {
    CorpusBuilder::new()?
        .with_file("a.txt", "the cat sat")
        .with_file("b.txt", "the dog ran")
        .with_file("c.txt", "cat and dog")
        .build()
}

/// Expected counts for [`sample_corpus`]
pub fn sample_counts() -> BTreeMap<String, u64> {
    [
        ("and", 1),
        ("cat", 2),
        ("dog", 2),
        ("ran", 1),
        ("sat", 1),
        ("the", 2),
    ]
    .into_iter()
    .map(|(word, count)| (word.to_string(), count))
    .collect()
}

/// Count words sequentially, as a reference for engine output
pub fn reference_counts<'a>(texts: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for text in texts {
        for word in text.split_whitespace() {
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }
    }
    counts
}
