use crate::utils::tokenizer::Extraction;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One persisted entry: a token and the files that contain it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub token: String,
    pub files: Vec<PathBuf>,
}

/// In-memory reverse index: token -> files containing it.
///
/// Keys keep insertion order so that fuzzy matching sees a deterministic,
/// restartable sequence. File lists are duplicate-free; re-ingesting a
/// file for a token it already maps to is a no-op. Entries are never
/// removed, so a file whose tokens change on disk keeps its old
/// associations until the index is rebuilt from scratch.
#[derive(Debug, Default)]
pub struct TokenIndex {
    entries: FxHashMap<String, Vec<PathBuf>>,
    order: Vec<String>,
}

impl TokenIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `file` with every token extracted from it
    pub fn ingest(&mut self, file: &Path, extraction: &Extraction) {
        for token in &extraction.type_names {
            self.insert(token, file);
        }
        for token in &extraction.tokens {
            self.insert(token, file);
        }
    }

    fn insert(&mut self, token: &str, file: &Path) {
        match self.entries.get_mut(token) {
            Some(files) => {
                if !files.iter().any(|f| f == file) {
                    files.push(file.to_path_buf());
                }
            }
            None => {
                self.entries.insert(token.to_string(), vec![file.to_path_buf()]);
                self.order.push(token.to_string());
            }
        }
    }

    /// Files containing `token`; empty for unknown tokens, never fails
    pub fn lookup(&self, token: &str) -> &[PathBuf] {
        self.entries.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Indexed tokens in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of distinct files across all entries
    pub fn file_count(&self) -> usize {
        let mut seen: std::collections::HashSet<&Path> = std::collections::HashSet::new();
        for files in self.entries.values() {
            for file in files {
                seen.insert(file);
            }
        }
        seen.len()
    }

    /// Serialize the full mapping in insertion order
    pub fn to_records(&self) -> Vec<SnapshotRecord> {
        self.order
            .iter()
            .map(|token| SnapshotRecord {
                token: token.clone(),
                files: self.entries.get(token).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// Rebuild the index from persisted records. Later duplicates of a
    /// token merge into the first occurrence.
    pub fn from_records(records: Vec<SnapshotRecord>) -> Self {
        let mut index = Self::new();
        for record in records {
            for file in &record.files {
                index.insert(&record.token, file);
            }
        }
        index
    }
}
