//! Placement of groups and lights in scene space

use serde::{Deserialize, Serialize};

use crate::core::types::{IVec3, Vec3};
use crate::grouping::GroupCoord;
use crate::scene::target::{CullingVolume, GroupPlacement, LightPlaceholder};

/// Light placeholder settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub range: f32,
    pub intensity: f32,
    pub color: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            range: 6.0,
            intensity: 1.0,
            color: [1.0, 0.9, 0.5],
        }
    }
}

/// Scene origin of a group. The exporter's Z axis points the other way.
pub fn group_origin(group: GroupCoord, group_size: i32) -> Vec3 {
    Vec3::new(
        (group.x * group_size) as f32,
        0.0,
        -(group.z * group_size) as f32,
    )
}

/// Placement of a group with its proximity volume
pub fn group_placement(
    group: GroupCoord,
    group_size: i32,
    render_distance: f32,
    culling_height_offset: f32,
) -> GroupPlacement {
    GroupPlacement {
        group,
        origin: group_origin(group, group_size),
        culling: CullingVolume {
            size: Vec3::splat(render_distance),
            offset: Vec3::new(0.0, culling_height_offset, 0.0),
        },
    }
}

/// Light placeholder for a light source recorded at `local` in the group box.
///
/// The exported model is centred on the group and mirrored on X, and block
/// centres sit half a block in.
pub fn light_placeholder(local: IVec3, group_size: i32, config: &LightConfig) -> LightPlaceholder {
    let mirrored = IVec3::new(group_size - local.x - 1, local.y, local.z).as_vec3();
    let half = group_size as f32 * 0.5;

    LightPlaceholder {
        position: mirrored - Vec3::new(half, 0.0, half) + Vec3::splat(0.5),
        range: config.range,
        intensity: config.intensity,
        color: config.color,
        visible: false,
    }
}
