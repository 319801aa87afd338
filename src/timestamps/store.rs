//! Change detection against the last imported chunk timestamps

use std::collections::{BTreeSet, HashMap};

use crate::core::types::Timestamp;
use crate::core::Result;
use crate::grouping::{chunk_to_group, GroupCoord};
use crate::timestamps::persist::TimestampPersistence;
use crate::world::ChunkCoord;

/// Committed timestamps plus the updates discovered during this session.
///
/// Committed entries are never touched until [`TimestampStore::commit`].
#[derive(Debug)]
pub struct TimestampStore {
    group_size: i32,
    /// Timestamps as of the last commit
    stored: HashMap<ChunkCoord, Timestamp>,
    /// Timestamps seen this session that differ from `stored`
    pending: HashMap<ChunkCoord, Timestamp>,
    chunks_scanned: usize,
    chunks_updated: usize,
}

impl TimestampStore {
    /// Create an empty store
    pub fn new(group_size: i32) -> Self {
        Self {
            group_size,
            stored: HashMap::new(),
            pending: HashMap::new(),
            chunks_scanned: 0,
            chunks_updated: 0,
        }
    }

    /// Load every committed entry from `persistence`
    pub fn load(persistence: &impl TimestampPersistence, group_size: i32) -> Result<Self> {
        let mut store = Self::new(group_size);
        store.stored.extend(persistence.load_all()?);
        log::debug!("Loaded {} chunk timestamps", store.stored.len());
        Ok(store)
    }

    /// Committed timestamp of a chunk
    pub fn get(&self, coord: ChunkCoord) -> Option<Timestamp> {
        self.stored.get(&coord).copied()
    }

    /// Whether a chunk must be re-imported.
    ///
    /// Compares exactly against the latest known timestamp (pending first,
    /// then committed). On a difference the new value is queued for commit.
    /// Every call counts as one scanned chunk.
    pub fn should_update(&mut self, coord: ChunkCoord, timestamp: Timestamp) -> bool {
        self.chunks_scanned += 1;

        let known = self.pending.get(&coord).or_else(|| self.stored.get(&coord));
        if known == Some(&timestamp) {
            return false;
        }

        self.pending.insert(coord, timestamp);
        self.chunks_updated += 1;
        true
    }

    /// Number of `should_update` calls this session
    pub fn chunks_scanned(&self) -> usize {
        self.chunks_scanned
    }

    /// Number of `should_update` calls that returned true
    pub fn chunks_updated(&self) -> usize {
        self.chunks_updated
    }

    /// Number of queued updates
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Write queued updates to `persistence`, one write per touched group.
    ///
    /// Memory is only updated once every group has been written. Returns the
    /// number of groups written.
    pub fn commit(&mut self, persistence: &mut impl TimestampPersistence) -> Result<usize> {
        let touched: BTreeSet<GroupCoord> = self
            .pending
            .keys()
            .map(|&coord| chunk_to_group(coord, self.group_size))
            .collect();

        let mut per_group: HashMap<GroupCoord, Vec<(ChunkCoord, Timestamp)>> = HashMap::new();
        let merged = self
            .stored
            .iter()
            .filter(|(coord, _)| !self.pending.contains_key(*coord))
            .chain(self.pending.iter());
        for (&coord, &timestamp) in merged {
            let group = chunk_to_group(coord, self.group_size);
            if touched.contains(&group) {
                per_group.entry(group).or_default().push((coord, timestamp));
            }
        }

        for group in &touched {
            let mut entries = per_group.remove(group).unwrap_or_default();
            entries.sort();
            persistence.store_group(*group, &entries)?;
        }

        self.stored.extend(self.pending.drain());
        log::debug!("Committed chunk timestamps for {} groups", touched.len());

        Ok(touched.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamps::persist::JsonTimestampDir;
    use tempfile::TempDir;

    #[test]
    fn test_first_sight_updates() {
        let mut store = TimestampStore::new(64);
        assert!(store.should_update(ChunkCoord::new(0, 0), 100));
        assert_eq!(store.pending_len(), 1);
        assert_eq!(store.get(ChunkCoord::new(0, 0)), None);
    }

    #[test]
    fn test_second_identical_call_is_false() {
        let mut store = TimestampStore::new(64);
        let coord = ChunkCoord::new(16, -16);
        assert!(store.should_update(coord, 7));
        assert!(!store.should_update(coord, 7));
        assert_eq!(store.chunks_scanned(), 2);
        assert_eq!(store.chunks_updated(), 1);
    }

    #[test]
    fn test_any_change_triggers_update() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut dir = JsonTimestampDir::new(temp_dir.path().to_path_buf());
        dir.store_group(GroupCoord::new(0, 0), &[(ChunkCoord::new(0, 0), 50)]).unwrap();

        let mut store = TimestampStore::load(&dir, 64).unwrap();
        assert!(!store.should_update(ChunkCoord::new(0, 0), 50));
        // clock rollback still counts as a change
        assert!(store.should_update(ChunkCoord::new(0, 0), 49));
        assert_eq!(store.get(ChunkCoord::new(0, 0)), Some(50));
    }

    #[test]
    fn test_commit_merges_per_group() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut dir = JsonTimestampDir::new(temp_dir.path().to_path_buf());
        dir.store_group(GroupCoord::new(0, 0), &[(ChunkCoord::new(0, 0), 1), (ChunkCoord::new(32, 0), 2)])
            .unwrap();
        dir.store_group(GroupCoord::new(5, 5), &[(ChunkCoord::new(320, 320), 9)]).unwrap();

        let mut store = TimestampStore::load(&dir, 64).unwrap();
        store.should_update(ChunkCoord::new(0, 0), 3);
        store.should_update(ChunkCoord::new(-16, 0), 4);

        let written = store.commit(&mut dir).unwrap();
        assert_eq!(written, 2);
        assert_eq!(store.pending_len(), 0);
        assert_eq!(store.get(ChunkCoord::new(0, 0)), Some(3));

        assert_eq!(
            dir.load_group(GroupCoord::new(0, 0)).unwrap(),
            vec![(ChunkCoord::new(0, 0), 3), (ChunkCoord::new(32, 0), 2)]
        );
        assert_eq!(dir.load_group(GroupCoord::new(-1, 0)).unwrap(), vec![(ChunkCoord::new(-16, 0), 4)]);
        assert_eq!(dir.load_group(GroupCoord::new(5, 5)).unwrap(), vec![(ChunkCoord::new(320, 320), 9)]);
    }

    #[test]
    fn test_reload_after_commit_is_current() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut dir = JsonTimestampDir::new(temp_dir.path().to_path_buf());

        let mut store = TimestampStore::load(&dir, 64).unwrap();
        store.should_update(ChunkCoord::new(0, 0), 10);
        store.commit(&mut dir).unwrap();

        let mut store = TimestampStore::load(&dir, 64).unwrap();
        assert!(!store.should_update(ChunkCoord::new(0, 0), 10));
    }
}
