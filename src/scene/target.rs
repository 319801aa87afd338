//! The scene target seam.
//!
//! The importer only produces plain data: where a group sits, which pieces
//! are baked together, which materials to configure and where lights go. A
//! `SceneTarget` turns that data into whatever the host scene representation
//! is.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::core::Result;
use crate::grouping::GroupCoord;
use crate::material::{MaterialConfig, MaterialGroupKey};

/// Identifies a loaded geometry piece until its group is baked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u64);

/// Persistent shared material created by the target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialHandle(pub u64);

/// Result of baking one bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BakeHandle(pub u64);

/// A named piece of exported geometry and the materials it uses
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryPiece {
    pub id: PieceId,
    pub name: String,
    pub materials: Vec<String>,
}

/// Proximity volume used to toggle a group's visibility
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CullingVolume {
    pub size: Vec3,
    pub offset: Vec3,
}

/// Where a group sits in the scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupPlacement {
    pub group: GroupCoord,
    pub origin: Vec3,
    pub culling: CullingVolume,
}

/// A piece together with the shared materials replacing its own
#[derive(Clone, Debug, PartialEq)]
pub struct PieceBinding {
    pub piece: PieceId,
    pub materials: Vec<MaterialHandle>,
}

/// Merge every piece of a bucket into one renderable unit
#[derive(Clone, Debug, PartialEq)]
pub struct BakeRequest {
    pub group: GroupCoord,
    pub key: MaterialGroupKey,
    pub pieces: Vec<PieceBinding>,
    /// Attach a character collider to the baked mesh
    pub collider: bool,
}

/// Light placeholder in group-local space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightPlaceholder {
    pub position: Vec3,
    pub range: f32,
    pub intensity: f32,
    pub color: [f32; 3],
    pub visible: bool,
}

/// Host scene the importer writes into
pub trait SceneTarget {
    /// Create the group's slot, or empty it if it already holds content.
    fn reset_group(&mut self, placement: &GroupPlacement) -> Result<()>;

    /// Load an exported geometry file into the group as named pieces.
    fn load_geometry(&mut self, group: GroupCoord, file: &Path) -> Result<Vec<GeometryPiece>>;

    /// Create a shared material; called once per material name per session.
    fn create_material(&mut self, config: &MaterialConfig) -> Result<MaterialHandle>;

    /// Bake a bucket of pieces.
    fn bake(&mut self, request: &BakeRequest) -> Result<BakeHandle>;

    /// Add a light placeholder to the group.
    fn place_light(&mut self, group: GroupCoord, light: &LightPlaceholder) -> Result<()>;

    /// Drop the pre-bake geometry of a group.
    fn release_sources(&mut self, group: GroupCoord) -> Result<()>;

    /// Make every group imported so far durable.
    ///
    /// Called once per session, before the chunk timestamps are committed.
    fn flush(&mut self) -> Result<()>;
}
