//! Import session configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::grouping::DEFAULT_GROUP_SIZE;
use crate::scene::LightConfig;
use crate::world::{CHUNK_SIZE, WORLD_HEIGHT};

/// Settings shared by every world imported in a run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Group edge length in blocks (a multiple of the chunk size).
    pub group_size: i32,
    /// Chunk edge length in blocks.
    pub chunk_size: i32,
    /// Vertical extent exported for every group.
    pub world_height: i32,
    /// Exporter executables, first existing one wins.
    pub exporter_candidates: Vec<PathBuf>,
    /// Root of the per-session working directories.
    pub staging_dir: PathBuf,
    /// Keep the working directory after a successful import.
    pub keep_staging: bool,
    /// Light placeholder settings.
    pub light: LightConfig,
    /// Edge length of each group's visibility volume.
    pub render_distance: f32,
    /// Upward offset of each group's visibility volume.
    pub culling_height_offset: f32,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            group_size: DEFAULT_GROUP_SIZE,
            chunk_size: CHUNK_SIZE,
            world_height: WORLD_HEIGHT,
            exporter_candidates: vec![
                PathBuf::from("Mineways/mineways.exe"),
                PathBuf::from("/usr/local/bin/mineways"),
                PathBuf::from("/usr/bin/mineways"),
            ],
            staging_dir: std::env::temp_dir().join("mineport-staging"),
            keep_staging: false,
            light: LightConfig::default(),
            render_distance: 512.0,
            culling_height_offset: 128.0,
        }
    }
}

impl ImportConfig {
    /// Save to a JSON file
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Reject sizes the grouping cannot work with.
    ///
    /// Groups must hold whole chunks, otherwise a chunk straddling two
    /// groups would be exported and lit as part of only one.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size <= 0 {
            return Err(Error::InvalidConfig(format!(
                "chunk_size must be positive, got {}",
                self.chunk_size
            )));
        }
        if self.group_size <= 0 || self.group_size % self.chunk_size != 0 {
            return Err(Error::InvalidConfig(format!(
                "group_size must be a positive multiple of chunk_size {}, got {}",
                self.chunk_size, self.group_size
            )));
        }
        if self.world_height <= 0 {
            return Err(Error::InvalidConfig(format!(
                "world_height must be positive, got {}",
                self.world_height
            )));
        }
        Ok(())
    }
}
