//! Index building, storage, and persistence.

pub mod ingest;
pub mod snapshot;
pub mod stats;
pub mod store;
