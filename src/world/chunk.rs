//! Chunk records as delivered by a world reader

use serde::{Deserialize, Serialize};

use crate::core::types::{IVec3, Timestamp};
use crate::core::Error;

/// Horizontal size of a chunk in blocks
pub const CHUNK_SIZE: i32 = 16;

/// Vertical extent of a world in blocks
pub const WORLD_HEIGHT: i32 = 256;

/// Status a chunk reports once terrain generation has finished
pub const STATUS_FULL: &str = "full";

/// Legacy block ids that emit light
pub mod block_ids {
    pub const AIR: u16 = 0;
    pub const TORCH: u16 = 50;
    pub const FIRE: u16 = 51;

    /// Blocks that get a light placeholder in the imported scene.
    pub const LIGHT_EMITTERS: &[u16] = &[TORCH, FIRE];
}

/// Chunk origin in world-block units
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Storage layout of the chunk in the save
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkFormat {
    /// Flat block id arrays, block data can be extracted
    #[default]
    Legacy,
    /// Palette-indexed sections; block data is not extracted by the reader
    Paletted,
}

/// Dense block ids of one chunk, stored in Y, Z, X order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkBlocks {
    /// Dimensions (x, y, z)
    pub size: [u32; 3],
    pub ids: Vec<u16>,
}

impl ChunkBlocks {
    /// Create an all-air block array
    pub fn new(size: [u32; 3]) -> Self {
        let len = (size[0] * size[1] * size[2]) as usize;
        Self {
            size,
            ids: vec![block_ids::AIR; len],
        }
    }

    fn index(&self, x: u32, y: u32, z: u32) -> usize {
        ((y * self.size[2] + z) * self.size[0] + x) as usize
    }

    /// Block id at a chunk-local position
    pub fn get(&self, x: u32, y: u32, z: u32) -> u16 {
        self.ids[self.index(x, y, z)]
    }

    /// Set the block id at a chunk-local position
    pub fn set(&mut self, x: u32, y: u32, z: u32, id: u16) {
        let index = self.index(x, y, z);
        self.ids[index] = id;
    }

    /// True when every block is air
    pub fn is_empty(&self) -> bool {
        self.ids.iter().all(|&id| id == block_ids::AIR)
    }

    /// Check that the id array matches the declared dimensions
    pub fn validate(&self) -> Result<(), String> {
        let expected = self.size.iter().map(|&d| d as usize).product::<usize>();
        if self.ids.len() != expected {
            return Err(format!(
                "expected {} block ids for {:?}, found {}",
                expected,
                self.size,
                self.ids.len()
            ));
        }
        Ok(())
    }

    /// Chunk-local positions of every block in `kinds`
    pub fn positions_of<'a>(&'a self, kinds: &'a [u16]) -> impl Iterator<Item = IVec3> + 'a {
        let [sx, sy, sz] = self.size;
        (0..sx).flat_map(move |x| {
            (0..sy).flat_map(move |y| {
                (0..sz)
                    .filter(move |&z| kinds.contains(&self.get(x, y, z)))
                    .map(move |z| IVec3::new(x as i32, y as i32, z as i32))
            })
        })
    }
}

/// One chunk of the world save, valid for a single scan pass
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk index along X (not block units)
    pub x: i32,
    /// Chunk index along Z (not block units)
    pub z: i32,
    #[serde(default)]
    pub status: Option<String>,
    pub last_update: Timestamp,
    #[serde(default)]
    pub format: ChunkFormat,
    #[serde(default)]
    pub blocks: Option<ChunkBlocks>,
}

impl Chunk {
    /// World-block origin of this chunk, `None` if it does not fit in `i32`
    pub fn origin(&self, chunk_size: i32) -> Option<ChunkCoord> {
        Some(ChunkCoord::new(
            self.x.checked_mul(chunk_size)?,
            self.z.checked_mul(chunk_size)?,
        ))
    }

    fn is_fully_generated(&self) -> bool {
        self.status.as_deref() == Some(STATUS_FULL)
    }

    /// Whether this chunk should take part in the export at all.
    ///
    /// Paletted chunks only need a finished status. Legacy chunks need block
    /// data that is not all air, and a finished status when one is reported.
    pub fn is_exportable(&self) -> bool {
        match self.format {
            ChunkFormat::Paletted => self.is_fully_generated(),
            ChunkFormat::Legacy => {
                let Some(blocks) = &self.blocks else {
                    return false;
                };
                if self.status.is_some() && !self.is_fully_generated() {
                    return false;
                }
                !blocks.is_empty()
            }
        }
    }

    /// Block data usable for light extraction.
    ///
    /// Paletted chunks never yield blocks here, even if the reader attached
    /// some. Malformed arrays are reported as `UnsupportedChunkFormat`.
    pub fn scannable_blocks(&self) -> Result<Option<&ChunkBlocks>, Error> {
        if self.format == ChunkFormat::Paletted {
            return Ok(None);
        }
        match &self.blocks {
            Some(blocks) => blocks
                .validate()
                .map(|_| Some(blocks))
                .map_err(|reason| Error::UnsupportedChunkFormat {
                    x: self.x,
                    z: self.z,
                    reason,
                }),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_chunk(status: Option<&str>, blocks: Option<ChunkBlocks>) -> Chunk {
        Chunk {
            x: 0,
            z: 0,
            status: status.map(String::from),
            last_update: 1,
            format: ChunkFormat::Legacy,
            blocks,
        }
    }

    fn stone_blocks() -> ChunkBlocks {
        let mut blocks = ChunkBlocks::new([16, 256, 16]);
        blocks.set(0, 0, 0, 1);
        blocks
    }

    #[test]
    fn test_origin_is_in_block_units() {
        let chunk = Chunk { x: -2, z: 3, ..legacy_chunk(None, None) };
        assert_eq!(chunk.origin(CHUNK_SIZE), Some(ChunkCoord::new(-32, 48)));
    }

    #[test]
    fn test_origin_overflow() {
        let chunk = Chunk { x: i32::MAX / 2, z: 0, ..legacy_chunk(None, None) };
        assert_eq!(chunk.origin(CHUNK_SIZE), None);
        let chunk = Chunk { x: 0, z: i32::MIN, ..legacy_chunk(None, None) };
        assert_eq!(chunk.origin(CHUNK_SIZE), None);
    }

    #[test]
    fn test_legacy_acceptance() {
        assert!(!legacy_chunk(None, None).is_exportable());
        assert!(!legacy_chunk(None, Some(ChunkBlocks::new([16, 256, 16]))).is_exportable());
        assert!(!legacy_chunk(Some("carved"), Some(stone_blocks())).is_exportable());
        assert!(legacy_chunk(Some("full"), Some(stone_blocks())).is_exportable());
        assert!(legacy_chunk(None, Some(stone_blocks())).is_exportable());
    }

    #[test]
    fn test_paletted_acceptance() {
        let mut chunk = legacy_chunk(Some("full"), None);
        chunk.format = ChunkFormat::Paletted;
        assert!(chunk.is_exportable());
        assert!(chunk.scannable_blocks().unwrap().is_none());

        chunk.status = None;
        assert!(!chunk.is_exportable());
    }

    #[test]
    fn test_paletted_blocks_are_never_scanned() {
        let mut chunk = legacy_chunk(Some("full"), Some(stone_blocks()));
        chunk.format = ChunkFormat::Paletted;
        assert!(chunk.scannable_blocks().unwrap().is_none());
    }

    #[test]
    fn test_malformed_blocks_are_unsupported() {
        let blocks = ChunkBlocks { size: [16, 256, 16], ids: vec![1; 10] };
        let chunk = legacy_chunk(Some("full"), Some(blocks));
        assert!(matches!(
            chunk.scannable_blocks(),
            Err(Error::UnsupportedChunkFormat { x: 0, z: 0, .. })
        ));
    }

    #[test]
    fn test_positions_of_light_emitters() {
        let mut blocks = ChunkBlocks::new([16, 256, 16]);
        blocks.set(3, 64, 5, block_ids::TORCH);
        blocks.set(15, 255, 15, block_ids::FIRE);
        blocks.set(1, 1, 1, 1);

        let found: Vec<IVec3> = blocks.positions_of(block_ids::LIGHT_EMITTERS).collect();
        assert_eq!(found, vec![IVec3::new(3, 64, 5), IVec3::new(15, 255, 15)]);
    }

    #[test]
    fn test_chunk_json_defaults() {
        let chunk: Chunk = serde_json::from_str(r#"{"x":1,"z":-1,"last_update":42}"#).unwrap();
        assert_eq!(chunk.format, ChunkFormat::Legacy);
        assert!(chunk.status.is_none());
        assert!(chunk.blocks.is_none());
    }
}
