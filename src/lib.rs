//! # jdig - Reverse Token Index for Java Codebases
//!
//! jdig builds a reverse index over a tree of Java compilation units:
//! for each extracted token it records which files contain it, so
//! "which files mention token X" is answered without re-scanning the
//! tree. Queries tolerate small spelling or casing drift through a
//! fuzzy fallback.
//!
//! ## Architecture
//!
//! - [`engine`] - The [`CodeIndex`] facade: build, lookup, fuzzy match
//! - [`index`] - In-memory store, ingestion driver, snapshot persistence
//! - [`query`] - Normalized edit-distance fuzzy matching
//! - [`output`] - Terminal result formatting
//! - [`utils`] - Tokenization, text decoding, app data paths
//!
//! ## Quick Start
//!
//! ```ignore
//! use jdig::CodeIndex;
//! use std::path::PathBuf;
//!
//! let mut index = CodeIndex::new(vec![PathBuf::from("/path/to/src")], "v1")?;
//! index.process_codebase()?;
//!
//! for file in index.lookup("WidgetFactory") {
//!     println!("{}", file.display());
//! }
//! ```
//!
//! ## Persistence
//!
//! Each `process_codebase` run writes one immutable snapshot named by a
//! 14-digit UTC timestamp under a version-scoped directory. On
//! construction the newest snapshot for the version is loaded, or the
//! index starts empty. This is a build-then-query batch tool: there is
//! no incremental update and no server mode.

pub mod engine;
pub mod index;
pub mod output;
pub mod query;
pub mod utils;

pub use engine::CodeIndex;
