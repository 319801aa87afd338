//! Scene target writing a JSON scene manifest.
//!
//! The manifest is the plain-data form of the imported scene: one record per
//! group with its baked buckets and light placeholders, plus the shared
//! materials. Re-opening an existing manifest keeps every group that is not
//! re-imported.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::core::{Error, Result};
use crate::grouping::GroupCoord;
use crate::material::MaterialConfig;
use crate::scene::obj::{self, ObjPiece};
use crate::scene::target::{
    BakeHandle, BakeRequest, CullingVolume, GeometryPiece, GroupPlacement, LightPlaceholder,
    MaterialHandle, PieceId, SceneTarget,
};

const MANIFEST_VERSION: u32 = 1;

/// The whole scene is shifted by half a block so block centres land on
/// integer positions.
pub const MAP_OFFSET: Vec3 = Vec3::splat(-0.5);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneManifest {
    pub version: u32,
    pub map_offset: Vec3,
    pub materials: BTreeMap<String, MaterialRecord>,
    /// Keyed by `"<x>_<z>"`
    pub groups: BTreeMap<String, GroupRecord>,
}

impl Default for SceneManifest {
    fn default() -> Self {
        Self {
            version: MANIFEST_VERSION,
            map_offset: MAP_OFFSET,
            materials: BTreeMap::new(),
            groups: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub handle: MaterialHandle,
    pub config: MaterialConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRecord {
    pub x: i32,
    pub z: i32,
    pub origin: Vec3,
    pub culling: CullingVolume,
    /// Geometry file the group was loaded from
    pub source: Option<PathBuf>,
    pub buckets: Vec<BucketRecord>,
    pub lights: Vec<LightPlaceholder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketRecord {
    pub handle: BakeHandle,
    pub name: String,
    pub collider: bool,
    pub pieces: Vec<PieceRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceRecord {
    pub name: String,
    pub materials: Vec<String>,
    pub face_count: usize,
}

fn group_key(group: GroupCoord) -> String {
    format!("{}_{}", group.x, group.z)
}

/// Scene target backed by a [`SceneManifest`] on disk
pub struct ManifestScene {
    path: PathBuf,
    manifest: SceneManifest,
    /// Pre-bake pieces of the groups being imported
    sources: HashMap<PieceId, (GroupCoord, ObjPiece)>,
    material_names: HashMap<MaterialHandle, String>,
    next_id: u64,
}

impl ManifestScene {
    /// Open the manifest at `path`, starting empty if it does not exist
    pub fn open_sync(path: PathBuf) -> Result<Self> {
        let manifest = if path.exists() {
            let json = std::fs::read_to_string(&path)?;
            serde_json::from_str::<SceneManifest>(&json)?
        } else {
            SceneManifest::default()
        };

        let material_names = manifest
            .materials
            .iter()
            .map(|(name, record)| (record.handle, name.clone()))
            .collect();

        // keep handles unique across sessions
        let next_id = manifest
            .materials
            .values()
            .map(|m| m.handle.0)
            .chain(manifest.groups.values().flat_map(|g| g.buckets.iter().map(|b| b.handle.0)))
            .max()
            .unwrap_or(0);

        Ok(Self {
            path,
            manifest,
            sources: HashMap::new(),
            material_names,
            next_id,
        })
    }

    pub fn manifest(&self) -> &SceneManifest {
        &self.manifest
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the manifest back to disk
    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.manifest)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn group_mut(&mut self, group: GroupCoord) -> Result<&mut GroupRecord> {
        self.manifest
            .groups
            .get_mut(&group_key(group))
            .ok_or_else(|| Error::Scene(format!("group {} was not reset before use", group)))
    }
}

impl SceneTarget for ManifestScene {
    fn reset_group(&mut self, placement: &GroupPlacement) -> Result<()> {
        self.sources.retain(|_, (group, _)| *group != placement.group);
        self.manifest.groups.insert(
            group_key(placement.group),
            GroupRecord {
                x: placement.group.x,
                z: placement.group.z,
                origin: placement.origin,
                culling: placement.culling,
                source: None,
                buckets: Vec::new(),
                lights: Vec::new(),
            },
        );
        Ok(())
    }

    fn load_geometry(&mut self, group: GroupCoord, file: &Path) -> Result<Vec<GeometryPiece>> {
        let pieces = obj::read_pieces(file)?;
        self.group_mut(group)?.source = Some(file.to_path_buf());

        let mut loaded = Vec::with_capacity(pieces.len());
        for piece in pieces {
            let id = PieceId(self.next_id());
            loaded.push(GeometryPiece {
                id,
                name: piece.name.clone(),
                materials: piece.materials.clone(),
            });
            self.sources.insert(id, (group, piece));
        }
        Ok(loaded)
    }

    fn create_material(&mut self, config: &MaterialConfig) -> Result<MaterialHandle> {
        let handle = MaterialHandle(self.next_id());
        self.material_names.insert(handle, config.name.clone());
        self.manifest.materials.insert(
            config.name.clone(),
            MaterialRecord { handle, config: config.clone() },
        );
        Ok(handle)
    }

    fn bake(&mut self, request: &BakeRequest) -> Result<BakeHandle> {
        let mut pieces = Vec::with_capacity(request.pieces.len());
        for binding in &request.pieces {
            let (_, piece) = self
                .sources
                .get(&binding.piece)
                .ok_or_else(|| Error::Scene(format!("unknown piece {:?}", binding.piece)))?;

            let materials = binding
                .materials
                .iter()
                .map(|handle| {
                    self.material_names
                        .get(handle)
                        .cloned()
                        .ok_or_else(|| Error::Scene(format!("unknown material {:?}", handle)))
                })
                .collect::<Result<Vec<_>>>()?;

            pieces.push(PieceRecord {
                name: piece.name.clone(),
                materials,
                face_count: piece.face_count,
            });
        }

        let handle = BakeHandle(self.next_id());
        let bucket = BucketRecord {
            handle,
            name: request.key.to_string(),
            collider: request.collider,
            pieces,
        };
        self.group_mut(request.group)?.buckets.push(bucket);

        Ok(handle)
    }

    fn place_light(&mut self, group: GroupCoord, light: &LightPlaceholder) -> Result<()> {
        self.group_mut(group)?.lights.push(*light);
        Ok(())
    }

    fn release_sources(&mut self, group: GroupCoord) -> Result<()> {
        self.sources.retain(|_, (owner, _)| *owner != group);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.save_sync()
    }
}
