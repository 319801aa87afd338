//! Per-chunk timestamps for incremental re-import

pub mod store;
pub mod persist;

pub use store::TimestampStore;
pub use persist::{JsonTimestampDir, TimestampPersistence};
