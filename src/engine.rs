//! The top-level indexing engine tying store, snapshots, ingestion, and
//! fuzzy matching together.

use crate::index::ingest::{FileSource, IngestReport, Ingestor, WalkSource, is_source_file};
use crate::index::snapshot::SnapshotStore;
use crate::index::store::TokenIndex;
use crate::query::fuzzy;
use anyhow::Result;
use std::path::PathBuf;

/// Reverse token index over a set of codebase roots.
///
/// Construction loads the newest snapshot for the given version, or
/// starts empty if none exists. [`process_codebase`](Self::process_codebase)
/// rescans every root and persists a new snapshot; the query operations
/// never mutate the index. Single-threaded use: queries must not overlap
/// an in-progress ingestion run.
pub struct CodeIndex {
    directories: Vec<PathBuf>,
    version: String,
    timestamp: Option<String>,
    index: TokenIndex,
    store: SnapshotStore,
}

impl CodeIndex {
    /// Open the index for `version`, storing snapshots under the platform
    /// data directory
    pub fn new(directories: Vec<PathBuf>, version: &str) -> Result<Self> {
        Self::with_store(directories, version, SnapshotStore::open_default()?)
    }

    /// Open the index against an explicit snapshot store
    pub fn with_store(
        directories: Vec<PathBuf>,
        version: &str,
        store: SnapshotStore,
    ) -> Result<Self> {
        let (index, timestamp) = store.load(version)?;
        Ok(Self {
            directories,
            version: version.to_string(),
            timestamp,
            index,
            store,
        })
    }

    /// Rescan all configured roots, merge the results into the index, and
    /// persist a new snapshot.
    ///
    /// Per-file faults are collected in the report; only snapshot storage
    /// failures abort with an error, since a silently lost index update is
    /// worse than a visible failure.
    pub fn process_codebase(&mut self) -> Result<IngestReport> {
        let source = WalkSource;
        let report = Ingestor::new(&mut self.index, &source).run(&self.directories);
        self.timestamp = Some(self.store.save(&self.version, &self.index)?);
        Ok(report)
    }

    /// Files containing `token` exactly; empty for unknown tokens
    pub fn lookup(&self, token: &str) -> &[PathBuf] {
        self.index.lookup(token)
    }

    /// The indexed token most similar to `token`, if any scores above zero
    pub fn best_match(&self, token: &str) -> Option<&str> {
        fuzzy::best_match(token, self.index.keys())
    }

    /// All indexed tokens scoring at least `threshold` against `token`,
    /// best first
    pub fn matches_above(&self, token: &str, threshold: f64) -> Vec<String> {
        fuzzy::matches_above(token, self.index.keys(), threshold)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Count source files under the configured roots without touching the
    /// index
    pub fn count_source_files(&self) -> usize {
        let source = WalkSource;
        self.directories
            .iter()
            .map(|root| {
                source
                    .walk(root)
                    .iter()
                    .filter(|path| is_source_file(path))
                    .count()
            })
            .sum()
    }

    /// Indexed tokens in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys()
    }

    /// Number of distinct tokens
    pub fn token_count(&self) -> usize {
        self.index.len()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Timestamp of the snapshot this state was loaded from or last saved
    /// to, if any
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }
}
