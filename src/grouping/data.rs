//! Per-group accumulation during a world scan

use std::collections::HashMap;
use std::path::PathBuf;

use crate::core::types::IVec3;
use crate::grouping::group::{chunk_to_group, GroupCoord};
use crate::world::ChunkCoord;

/// Data gathered for one group while scanning
#[derive(Clone, Debug, PartialEq)]
pub struct GroupData {
    /// Geometry file the exporter writes for this group
    pub file: PathBuf,
    /// Light-emitting block positions, local to the group box. Not deduplicated.
    pub light_sources: Vec<IVec3>,
}

impl GroupData {
    pub fn new(file: PathBuf) -> Self {
        Self {
            file,
            light_sources: Vec::new(),
        }
    }
}

/// Groups touched by a scan, keyed by coordinate, remembering discovery order
#[derive(Debug)]
pub struct GroupTable {
    group_size: i32,
    groups: HashMap<GroupCoord, GroupData>,
    discovered: Vec<GroupCoord>,
}

impl GroupTable {
    pub fn new(group_size: i32) -> Self {
        Self {
            group_size,
            groups: HashMap::new(),
            discovered: Vec::new(),
        }
    }

    pub fn group_size(&self) -> i32 {
        self.group_size
    }

    /// Group containing a chunk origin
    pub fn group_of(&self, chunk: ChunkCoord) -> GroupCoord {
        chunk_to_group(chunk, self.group_size)
    }

    /// Get the group's data, creating it with `file` on first use.
    ///
    /// Returns `true` alongside the data when the group was just created.
    pub fn get_or_create(
        &mut self,
        group: GroupCoord,
        file: impl FnOnce() -> PathBuf,
    ) -> (&mut GroupData, bool) {
        let created = !self.groups.contains_key(&group);
        if created {
            self.discovered.push(group);
        }
        let data = self.groups.entry(group).or_insert_with(|| GroupData::new(file()));
        (data, created)
    }

    /// Record a light found at `local` inside the chunk whose origin is `chunk`.
    ///
    /// The group must already exist.
    pub fn record_light(&mut self, chunk: ChunkCoord, local: IVec3) {
        let group = self.group_of(chunk);
        let (origin_x, origin_z) = group.world_origin(self.group_size);
        let offset = IVec3::new(chunk.x - origin_x, 0, chunk.z - origin_z);

        if let Some(data) = self.groups.get_mut(&group) {
            data.light_sources.push(offset + local);
        }
    }

    pub fn get(&self, group: GroupCoord) -> Option<&GroupData> {
        self.groups.get(&group)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group coordinates in the order they were first touched
    pub fn discovery_order(&self) -> &[GroupCoord] {
        &self.discovered
    }

    /// Consume the table, yielding groups nearest the origin first
    pub fn into_distance_order(self) -> Vec<(GroupCoord, GroupData)> {
        let mut groups: Vec<(GroupCoord, GroupData)> = self.groups.into_iter().collect();
        groups.sort_by(|a, b| a.0.distance_order(&b.0));
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_once() {
        let mut table = GroupTable::new(64);
        let group = GroupCoord::new(0, 0);

        let (_, created) = table.get_or_create(group, || PathBuf::from("a.obj"));
        assert!(created);
        let (data, created) = table.get_or_create(group, || PathBuf::from("b.obj"));
        assert!(!created);
        assert_eq!(data.file, PathBuf::from("a.obj"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_light_offsets_are_group_local() {
        let mut table = GroupTable::new(64);
        let chunk = ChunkCoord::new(-48, 16);
        let group = table.group_of(chunk);
        assert_eq!(group, GroupCoord::new(-1, 0));
        table.get_or_create(group, || PathBuf::from("g.obj"));

        table.record_light(chunk, IVec3::new(2, 70, 3));
        table.record_light(chunk, IVec3::new(2, 70, 3));

        let data = table.get(group).unwrap();
        assert_eq!(data.light_sources, vec![IVec3::new(18, 70, 19); 2]);
    }

    #[test]
    fn test_orders() {
        let mut table = GroupTable::new(64);
        for group in [GroupCoord::new(-2, -2), GroupCoord::new(1, 0), GroupCoord::new(0, 0)] {
            table.get_or_create(group, || PathBuf::from(format!("{}.obj", group)));
        }

        assert_eq!(table.discovery_order()[0], GroupCoord::new(-2, -2));

        let ordered: Vec<GroupCoord> = table.into_distance_order().into_iter().map(|(g, _)| g).collect();
        assert_eq!(ordered, vec![GroupCoord::new(0, 0), GroupCoord::new(1, 0), GroupCoord::new(-2, -2)]);
    }
}
