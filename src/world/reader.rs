//! World reader seam and the JSON-lines chunk dump reader

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::core::{Error, Result};
use crate::world::chunk::Chunk;

/// One-pass stream of chunks; a fresh scan needs a fresh `open`.
pub type ChunkStream = Box<dyn Iterator<Item = Result<Chunk>> + Send>;

/// Supplies the chunks of a world save
pub trait WorldReader {
    /// Open the world at `world` for a single scan.
    fn open(&self, world: &Path) -> Result<ChunkStream>;
}

/// File name of the chunk dump inside a world directory
pub const CHUNK_DUMP_FILENAME: &str = "chunks.jsonl";

/// Reads a chunk dump produced by an external world decoder.
///
/// The dump holds one JSON encoded [`Chunk`] per line; blank lines are skipped.
#[derive(Debug, Default, Clone)]
pub struct ChunkDumpReader;

impl ChunkDumpReader {
    pub fn new() -> Self {
        Self
    }

    /// Path of the dump for a world directory
    pub fn dump_path(world: &Path) -> PathBuf {
        world.join(CHUNK_DUMP_FILENAME)
    }
}

impl WorldReader for ChunkDumpReader {
    fn open(&self, world: &Path) -> Result<ChunkStream> {
        let path = Self::dump_path(world);
        let file = File::open(&path).map_err(|e| Error::WorldUnreadable {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let lines = BufReader::new(file).lines().enumerate();
        let stream = lines.filter_map(move |(line_no, line)| {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(Error::WorldUnreadable {
                        path: path.clone(),
                        reason: e.to_string(),
                    }))
                }
            };
            if line.trim().is_empty() {
                return None;
            }
            Some(serde_json::from_str::<Chunk>(&line).map_err(|e| Error::WorldUnreadable {
                path: path.clone(),
                reason: format!("line {}: {}", line_no + 1, e),
            }))
        });

        Ok(Box::new(stream))
    }
}
