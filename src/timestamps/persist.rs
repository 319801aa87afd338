//! Persisted chunk timestamps, organised per group

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::types::Timestamp;
use crate::core::Result;
use crate::grouping::GroupCoord;
use crate::world::ChunkCoord;

/// Backing storage for committed chunk timestamps
pub trait TimestampPersistence {
    /// Every persisted entry across all groups
    fn load_all(&self) -> Result<Vec<(ChunkCoord, Timestamp)>>;

    /// Entries of one group only
    fn load_group(&self, group: GroupCoord) -> Result<Vec<(ChunkCoord, Timestamp)>>;

    /// Replace the entries of one group
    fn store_group(&mut self, group: GroupCoord, entries: &[(ChunkCoord, Timestamp)]) -> Result<()>;
}

const GROUP_FILE_VERSION: u32 = 1;
const GROUP_FILE_PREFIX: &str = "group_";
const GROUP_FILE_EXTENSION: &str = "json";

#[derive(Debug, Serialize, Deserialize)]
struct GroupFile {
    version: u32,
    chunks: Vec<ChunkEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChunkEntry {
    x: i32,
    z: i32,
    timestamp: Timestamp,
}

/// One JSON file per group inside a directory
#[derive(Debug, Clone)]
pub struct JsonTimestampDir {
    base_dir: PathBuf,
}

impl JsonTimestampDir {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file holding a group's timestamps
    pub fn group_path(&self, group: GroupCoord) -> PathBuf {
        self.base_dir.join(format!(
            "{}{}_{}.{}",
            GROUP_FILE_PREFIX, group.x, group.z, GROUP_FILE_EXTENSION
        ))
    }

    fn read_file(path: &Path) -> Result<Vec<(ChunkCoord, Timestamp)>> {
        let json = std::fs::read_to_string(path)?;
        let file: GroupFile = serde_json::from_str(&json)?;
        Ok(file
            .chunks
            .into_iter()
            .map(|e| (ChunkCoord::new(e.x, e.z), e.timestamp))
            .collect())
    }
}

impl TimestampPersistence for JsonTimestampDir {
    fn load_all(&self) -> Result<Vec<(ChunkCoord, Timestamp)>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            let is_group_file = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(GROUP_FILE_PREFIX))
                && path.extension().is_some_and(|e| e == GROUP_FILE_EXTENSION);

            if is_group_file {
                entries.extend(Self::read_file(&path)?);
            }
        }
        Ok(entries)
    }

    fn load_group(&self, group: GroupCoord) -> Result<Vec<(ChunkCoord, Timestamp)>> {
        let path = self.group_path(group);
        if !path.exists() {
            return Ok(Vec::new());
        }
        Self::read_file(&path)
    }

    fn store_group(&mut self, group: GroupCoord, entries: &[(ChunkCoord, Timestamp)]) -> Result<()> {
        let file = GroupFile {
            version: GROUP_FILE_VERSION,
            chunks: entries
                .iter()
                .map(|&(coord, timestamp)| ChunkEntry { x: coord.x, z: coord.z, timestamp })
                .collect(),
        };

        std::fs::create_dir_all(&self.base_dir)?;
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(self.group_path(group), json)?;
        Ok(())
    }
}
