//! Scene target seam, layout rules and the manifest adapter

pub mod target;
pub mod layout;
pub mod obj;
pub mod manifest;
#[cfg(test)]
pub(crate) mod testing;

pub use target::{
    BakeHandle, BakeRequest, CullingVolume, GeometryPiece, GroupPlacement, LightPlaceholder,
    MaterialHandle, PieceBinding, PieceId, SceneTarget,
};
pub use layout::{group_origin, group_placement, light_placeholder, LightConfig};
pub use manifest::{ManifestScene, SceneManifest};
