//! In-memory scene target that records every call, for tests

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::{Error, Result};
use crate::grouping::GroupCoord;
use crate::material::MaterialConfig;
use crate::scene::target::{
    BakeHandle, BakeRequest, GeometryPiece, GroupPlacement, LightPlaceholder, MaterialHandle,
    PieceId, SceneTarget,
};

/// Ordered record of scene calls
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    Reset(GroupCoord),
    Load(GroupCoord, PathBuf),
    Bake(GroupCoord),
    Light(GroupCoord),
    Release(GroupCoord),
    Flush,
}

#[derive(Default)]
pub struct RecordingScene {
    /// Pieces returned per geometry file name: (name, material names)
    pub geometry: HashMap<String, Vec<(String, Vec<String>)>>,
    /// Loading this group fails
    pub fail_group: Option<GroupCoord>,
    /// Flushing fails
    pub fail_flush: bool,
    pub events: Vec<SceneEvent>,
    pub placements: Vec<GroupPlacement>,
    pub materials: Vec<MaterialConfig>,
    pub bakes: Vec<BakeRequest>,
    pub lights: Vec<(GroupCoord, LightPlaceholder)>,
    next_id: u64,
}

impl RecordingScene {
    /// Scene whose geometry load fails for `group`
    pub fn failing_group(group: GroupCoord) -> Self {
        Self {
            fail_group: Some(group),
            ..Default::default()
        }
    }

    /// Scene that cannot be flushed
    pub fn failing_flush() -> Self {
        Self {
            fail_flush: true,
            ..Default::default()
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Groups in the order they were reset
    pub fn group_order(&self) -> Vec<GroupCoord> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SceneEvent::Reset(g) => Some(*g),
                _ => None,
            })
            .collect()
    }
}

impl SceneTarget for RecordingScene {
    fn reset_group(&mut self, placement: &GroupPlacement) -> Result<()> {
        self.events.push(SceneEvent::Reset(placement.group));
        self.placements.push(*placement);
        Ok(())
    }

    fn load_geometry(&mut self, group: GroupCoord, file: &Path) -> Result<Vec<GeometryPiece>> {
        self.events.push(SceneEvent::Load(group, file.to_path_buf()));
        if self.fail_group == Some(group) {
            return Err(Error::Scene(format!("cannot load {}", file.display())));
        }

        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let pieces = self.geometry.get(&file_name).cloned().unwrap_or_default();
        Ok(pieces
            .into_iter()
            .map(|(name, materials)| GeometryPiece {
                id: PieceId(self.next_id()),
                name,
                materials,
            })
            .collect())
    }

    fn create_material(&mut self, config: &MaterialConfig) -> Result<MaterialHandle> {
        self.materials.push(config.clone());
        Ok(MaterialHandle(self.next_id()))
    }

    fn bake(&mut self, request: &BakeRequest) -> Result<BakeHandle> {
        self.events.push(SceneEvent::Bake(request.group));
        self.bakes.push(request.clone());
        Ok(BakeHandle(self.next_id()))
    }

    fn place_light(&mut self, group: GroupCoord, light: &LightPlaceholder) -> Result<()> {
        self.events.push(SceneEvent::Light(group));
        self.lights.push((group, *light));
        Ok(())
    }

    fn release_sources(&mut self, group: GroupCoord) -> Result<()> {
        self.events.push(SceneEvent::Release(group));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.fail_flush {
            return Err(Error::Scene("scene storage unavailable".to_string()));
        }
        self.events.push(SceneEvent::Flush);
        Ok(())
    }
}
