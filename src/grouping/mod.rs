//! Spatial grouping of chunks into fixed-size cells

pub mod group;
pub mod data;

pub use group::{chunk_to_group, group_bounds, GroupBounds, GroupCoord, DEFAULT_GROUP_SIZE};
pub use data::{GroupData, GroupTable};
