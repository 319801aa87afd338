//! Core type aliases and re-exports

pub use glam::{IVec3, Vec2, Vec3};

/// Standard Result type for the importer
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// Opaque, ordered chunk modification time as stored in the world save.
pub type Timestamp = i64;
