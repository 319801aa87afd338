//! Mineport - incremental import of voxel world saves into scene geometry

pub mod core;
pub mod world;
pub mod grouping;
pub mod timestamps;
pub mod material;
pub mod scene;
pub mod export;
pub mod import;
