//! Scan a world's chunks into an export plan.
//!
//! Only chunks whose timestamp changed since the last commit take part, so
//! only groups containing at least one changed chunk are exported again.

use std::path::{Path, PathBuf};

use crate::core::{Error, Result};
use crate::export::script::ExportScript;
use crate::grouping::{group_bounds, GroupCoord, GroupTable, DEFAULT_GROUP_SIZE};
use crate::timestamps::TimestampStore;
use crate::world::{block_ids, Chunk, ChunkCoord, CHUNK_SIZE, WORLD_HEIGHT};

/// Everything the exporter and the importer need for one session
#[derive(Debug)]
pub struct ExportPlan {
    pub script: ExportScript,
    pub groups: GroupTable,
}

impl ExportPlan {
    /// Nothing changed; there is nothing to export or import
    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

/// Geometry file name the exporter writes for a group
pub fn group_file_name(group: GroupCoord) -> String {
    format!("Group_{}x{}.obj", group.x, group.z)
}

/// Builds an [`ExportPlan`] from a single pass over a world's chunks
#[derive(Clone, Debug)]
pub struct PlanBuilder {
    world: PathBuf,
    groups_dir: PathBuf,
    group_size: i32,
    chunk_size: i32,
    world_height: i32,
}

impl PlanBuilder {
    /// `groups_dir` is where the exporter writes one geometry file per group
    pub fn new(world: &Path, groups_dir: &Path) -> Self {
        Self {
            world: world.to_path_buf(),
            groups_dir: groups_dir.to_path_buf(),
            group_size: DEFAULT_GROUP_SIZE,
            chunk_size: CHUNK_SIZE,
            world_height: WORLD_HEIGHT,
        }
    }

    pub fn with_group_size(mut self, group_size: i32) -> Self {
        self.group_size = group_size;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: i32) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_world_height(mut self, world_height: i32) -> Self {
        self.world_height = world_height;
        self
    }

    /// World-block origin of a chunk whose whole group box is addressable
    fn chunk_origin(&self, chunk: &Chunk) -> Result<ChunkCoord> {
        chunk
            .origin(self.chunk_size)
            .filter(|o| {
                o.x.checked_add(self.group_size).is_some()
                    && o.z.checked_add(self.group_size).is_some()
            })
            .ok_or_else(|| Error::WorldUnreadable {
                path: self.world.clone(),
                reason: format!("chunk {}x{} lies outside the addressable world", chunk.x, chunk.z),
            })
    }

    /// Consume `chunks` once, queueing timestamp updates on `store`.
    ///
    /// A chunk that cannot be read aborts the scan. Chunks with malformed
    /// block data still export, only their lights are skipped.
    pub fn build<I>(&self, chunks: I, store: &mut TimestampStore) -> Result<ExportPlan>
    where
        I: IntoIterator<Item = Result<Chunk>>,
    {
        if self.chunk_size <= 0 || self.group_size <= 0 || self.group_size % self.chunk_size != 0 {
            return Err(Error::InvalidConfig(format!(
                "group size {} is not a positive multiple of chunk size {}",
                self.group_size, self.chunk_size
            )));
        }

        let mut script = ExportScript::new(&self.world);
        let mut groups = GroupTable::new(self.group_size);

        for chunk in chunks {
            let chunk = chunk?;
            if !chunk.is_exportable() {
                continue;
            }

            let origin = self.chunk_origin(&chunk)?;
            if !store.should_update(origin, chunk.last_update) {
                continue;
            }

            let group = groups.group_of(origin);
            let (data, created) = groups.get_or_create(group, || {
                self.groups_dir.join(group_file_name(group))
            });
            if created {
                let output = data.file.clone();
                script.push_region(group_bounds(group, self.group_size, self.world_height), output);
            }

            match chunk.scannable_blocks() {
                Ok(Some(blocks)) => {
                    for local in blocks.positions_of(block_ids::LIGHT_EMITTERS) {
                        groups.record_light(origin, local);
                    }
                }
                Ok(None) => {}
                Err(e) => log::warn!("Skipping light scan: {}", e),
            }
        }

        log::debug!(
            "Planned {} groups from {} changed chunks",
            groups.len(),
            store.pending_len()
        );

        Ok(ExportPlan { script, groups })
    }
}
