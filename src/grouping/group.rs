//! Group cells: fixed-size square aggregations of chunks

use std::cmp::Ordering;
use std::fmt;

use crate::world::ChunkCoord;

/// Default edge length of a group cell in blocks
pub const DEFAULT_GROUP_SIZE: i32 = 64;

/// Integer coordinate of a group cell in the group grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupCoord {
    pub x: i32,
    pub z: i32,
}

impl GroupCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World-block position of the group's minimum corner
    pub fn world_origin(&self, group_size: i32) -> (i32, i32) {
        (self.x * group_size, self.z * group_size)
    }

    /// Squared length of the coordinate vector, in group units
    pub fn magnitude_squared(&self) -> i64 {
        let x = self.x as i64;
        let z = self.z as i64;
        x * x + z * z
    }

    /// Length of the coordinate vector, in group units
    pub fn magnitude(&self) -> f32 {
        (self.magnitude_squared() as f32).sqrt()
    }

    /// Nearest-to-origin first; ties fall back to (x, z) so the order is total.
    pub fn distance_order(&self, other: &Self) -> Ordering {
        self.magnitude_squared()
            .cmp(&other.magnitude_squared())
            .then(self.x.cmp(&other.x))
            .then(self.z.cmp(&other.z))
    }
}

impl fmt::Display for GroupCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Group containing a chunk origin.
///
/// Uses floor division on both axes, so `-1` lands in group `-1`, not `0`.
pub fn chunk_to_group(coord: ChunkCoord, group_size: i32) -> GroupCoord {
    debug_assert!(group_size > 0);
    GroupCoord::new(coord.x.div_euclid(group_size), coord.z.div_euclid(group_size))
}

/// World-block box covered by a group; `min` inclusive, `max` exclusive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_y: i32,
    pub max_z: i32,
}

/// Box of a group spanning the world's full height
pub fn group_bounds(group: GroupCoord, group_size: i32, world_height: i32) -> GroupBounds {
    let (min_x, min_z) = group.world_origin(group_size);
    GroupBounds {
        min_x,
        min_y: 0,
        min_z,
        max_x: min_x + group_size,
        max_y: world_height,
        max_z: min_z + group_size,
    }
}
