//! Utility functions shared across the indexer.
//!
//! ## Modules
//!
//! - [`app_data`] - Application data directory management (XDG-compliant)
//! - [`encoding`] - Best-effort text decoding for unknown file encodings
//! - [`progress`] - Feature-gated progress bar shim
//! - [`tokenizer`] - Type name and generic token extraction

pub mod app_data;
pub mod encoding;
pub mod progress;
pub mod tokenizer;

pub use app_data::*;
pub use encoding::*;
pub use tokenizer::*;
