//! Query layer: fuzzy matching over indexed tokens.

pub mod fuzzy;

pub use fuzzy::{DEFAULT_THRESHOLD, best_match, matches_above, similarity};
