use crate::index::store::TokenIndex;
use crate::utils::encoding::decode_text;
use crate::utils::progress::{ProgressBar, ProgressStyle};
use crate::utils::tokenizer::{Extraction, tokenize};
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of files treated as compilation units
pub const SOURCE_EXT: &str = "java";

/// Capability for listing and reading files. Injected into the ingestion
/// driver so tests can substitute an in-memory source.
pub trait FileSource: Sync {
    /// All files under `root`, recursively
    fn walk(&self, root: &Path) -> Vec<PathBuf>;

    /// Decoded text of `path`. Encoding detection is this collaborator's
    /// concern; undecodable bytes become U+FFFD rather than an error.
    fn read_text(&self, path: &Path) -> Result<String>;
}

/// Real filesystem source: gitignore-aware recursive walk plus
/// BOM-sniffing lossy decoding
pub struct WalkSource;

impl FileSource for WalkSource {
    fn walk(&self, root: &Path) -> Vec<PathBuf> {
        WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                // Skip common non-source directories
                !matches!(name.as_ref(), ".git" | "target" | "build" | "out" | "node_modules")
            })
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.into_path())
            .collect()
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(decode_text(&bytes))
    }
}

/// Check whether a path is a compilation unit this tool indexes
pub fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXT)
}

/// A file that was discovered but not indexed
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one ingestion run. Per-file faults are collected here
/// instead of aborting the run.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Every file the walk yielded, source or not
    pub files_seen: usize,
    /// Source files tokenized and merged into the index
    pub files_indexed: usize,
    /// Source files that could not be read
    pub skipped: Vec<SkippedFile>,
}

/// Drives tokenization of a set of roots into a [`TokenIndex`].
///
/// Tokenization runs in parallel per file; the merge into the index is
/// sequential, which keeps file lists duplicate-free without locking.
pub struct Ingestor<'a, S: FileSource> {
    index: &'a mut TokenIndex,
    source: &'a S,
}

impl<'a, S: FileSource> Ingestor<'a, S> {
    pub fn new(index: &'a mut TokenIndex, source: &'a S) -> Self {
        Self { index, source }
    }

    /// Scan every root and ingest all source files found. A file that
    /// vanishes or cannot be read is recorded in the report and skipped;
    /// the run always continues.
    pub fn run(&mut self, roots: &[PathBuf]) -> IngestReport {
        let mut report = IngestReport::default();

        for root in roots {
            let files = self.source.walk(root);
            report.files_seen += files.len();

            let sources: Vec<&PathBuf> = files.iter().filter(|p| is_source_file(p)).collect();

            let progress = ProgressBar::new(sources.len() as u64);
            progress.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("█▓▒░  "),
            );
            progress.set_message(format!("Indexing {}", root.display()));

            let source = self.source;
            let processed: Vec<(PathBuf, Result<Extraction>)> = sources
                .par_iter()
                .map(|path| {
                    let result = source.read_text(path).map(|text| tokenize(&text));
                    progress.inc(1);
                    ((*path).clone(), result)
                })
                .collect();

            progress.finish_with_message(format!("{} source files", processed.len()));

            // Single-writer merge preserves duplicate-free file lists
            for (path, result) in processed {
                match result {
                    Ok(extraction) => {
                        self.index.ingest(&path, &extraction);
                        report.files_indexed += 1;
                    }
                    Err(err) => report.skipped.push(SkippedFile {
                        path,
                        reason: format!("{err:#}"),
                    }),
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// In-memory file source for deterministic tests
    struct MemorySource {
        files: BTreeMap<PathBuf, Option<String>>,
    }

    impl MemorySource {
        fn new(files: &[(&str, Option<&str>)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(path, text)| (PathBuf::from(path), text.map(str::to_string)))
                    .collect(),
            }
        }
    }

    impl FileSource for MemorySource {
        fn walk(&self, _root: &Path) -> Vec<PathBuf> {
            self.files.keys().cloned().collect()
        }

        fn read_text(&self, path: &Path) -> Result<String> {
            match self.files.get(path) {
                Some(Some(text)) => Ok(text.clone()),
                _ => anyhow::bail!("file vanished: {}", path.display()),
            }
        }
    }

    #[test]
    fn test_only_source_files_processed() {
        let source = MemorySource::new(&[
            ("src/Widget.java", Some("class Widget { render(frame); }")),
            ("notes.txt", Some("class Imposter { nothing }")),
            ("README.md", Some("documentation words here")),
        ]);

        let mut index = TokenIndex::new();
        let report = Ingestor::new(&mut index, &source).run(&[PathBuf::from(".")]);

        assert_eq!(report.files_seen, 3);
        assert_eq!(report.files_indexed, 1);
        assert!(report.skipped.is_empty());
        assert_eq!(index.lookup("Widget").len(), 1);
        assert!(index.lookup("Imposter").is_empty());
        assert!(index.lookup("documentation").is_empty());
    }

    #[test]
    fn test_unreadable_file_skipped_run_continues() {
        let source = MemorySource::new(&[
            ("src/Gone.java", None),
            ("src/Widget.java", Some("class Widget { render(frame); }")),
        ]);

        let mut index = TokenIndex::new();
        let report = Ingestor::new(&mut index, &source).run(&[PathBuf::from(".")]);

        assert_eq!(report.files_indexed, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, PathBuf::from("src/Gone.java"));
        assert!(report.skipped[0].reason.contains("vanished"));
        assert_eq!(index.lookup("Widget").len(), 1);
    }

    #[test]
    fn test_no_partial_tokens_from_failed_file() {
        let source = MemorySource::new(&[("src/Gone.java", None)]);

        let mut index = TokenIndex::new();
        Ingestor::new(&mut index, &source).run(&[PathBuf::from(".")]);

        assert!(index.is_empty());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let source = MemorySource::new(&[("src/Widget.java", Some("class Widget { render(frame); }"))]);

        let mut index = TokenIndex::new();
        Ingestor::new(&mut index, &source).run(&[PathBuf::from(".")]);
        Ingestor::new(&mut index, &source).run(&[PathBuf::from(".")]);

        assert_eq!(index.lookup("Widget").len(), 1);
        assert_eq!(index.lookup("render").len(), 1);
    }

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file(Path::new("a/b/Foo.java")));
        assert!(!is_source_file(Path::new("a/b/Foo.Java")));
        assert!(!is_source_file(Path::new("a/b/foo.rs")));
        assert!(!is_source_file(Path::new("java")));
    }
}
