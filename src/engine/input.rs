//! Map inputs and their scheduling weight

use std::fs;
use std::path::PathBuf;

const LABEL_CHARS: usize = 32;

/// An input handed to one map job
///
/// The cost hint orders map jobs shortest-first. It is an estimate only and
/// never affects correctness.
pub trait MapInput: Send + Sync + 'static {
    /// Estimated weight of mapping this input, usually its size in bytes
    fn cost_hint(&self) -> u64;

    /// Short human-readable identifier used in logs and errors
    fn label(&self) -> String;
}

fn truncated(text: &str) -> String {
    if text.chars().count() <= LABEL_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(LABEL_CHARS).collect();
        format!("{head}...")
    }
}

impl MapInput for String {
    fn cost_hint(&self) -> u64 {
        self.len() as u64
    }

    fn label(&self) -> String {
        truncated(self)
    }
}

impl MapInput for &'static str {
    fn cost_hint(&self) -> u64 {
        self.len() as u64
    }

    fn label(&self) -> String {
        truncated(self)
    }
}

impl MapInput for Vec<u8> {
    fn cost_hint(&self) -> u64 {
        self.len() as u64
    }

    fn label(&self) -> String {
        format!("<{} bytes>", self.len())
    }
}

/// Files are weighted by their size on disk; unreadable metadata weighs zero
impl MapInput for PathBuf {
    fn cost_hint(&self) -> u64 {
        fs::metadata(self).map(|meta| meta.len()).unwrap_or(0)
    }

    fn label(&self) -> String {
        self.display().to_string()
    }
}
