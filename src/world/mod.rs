//! World save access: chunk records, readers and discovery

pub mod chunk;
pub mod reader;
pub mod discovery;

pub use chunk::{
    Chunk, ChunkBlocks, ChunkCoord, ChunkFormat, block_ids,
    CHUNK_SIZE, WORLD_HEIGHT, STATUS_FULL,
};
pub use reader::{ChunkDumpReader, ChunkStream, WorldReader, CHUNK_DUMP_FILENAME};
pub use discovery::{discover_worlds, world_name, LEVEL_FILENAME};
