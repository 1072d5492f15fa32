use std::collections::HashMap;

use anyhow::Result;
use parking_lot::RwLock;

use crate::chunk::Chunk;

/// World storage the generator reads chunks from and hands them back to.
pub trait ChunkManager: Send + Sync {
    /// The stored chunk at this coordinate, or a fresh empty one.
    fn get_chunk(&self, chunk_x: i32, chunk_z: i32) -> Result<Chunk>;

    fn set_chunk(&self, chunk_x: i32, chunk_z: i32, chunk: Chunk) -> Result<()>;
}

/// Thread-safe in-memory chunk store.
#[derive(Debug, Default)]
pub struct MemoryWorld {
    chunks: RwLock<HashMap<(i32, i32), Chunk>>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the stored chunk, if any.
    pub fn chunk(&self, chunk_x: i32, chunk_z: i32) -> Option<Chunk> {
        self.chunks.read().get(&(chunk_x, chunk_z)).cloned()
    }

    pub fn len(&self) -> usize {
        self.chunks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.read().is_empty()
    }
}

impl ChunkManager for MemoryWorld {
    fn get_chunk(&self, chunk_x: i32, chunk_z: i32) -> Result<Chunk> {
        Ok(self
            .chunk(chunk_x, chunk_z)
            .unwrap_or_else(|| Chunk::new(chunk_x, chunk_z)))
    }

    fn set_chunk(&self, chunk_x: i32, chunk_z: i32, chunk: Chunk) -> Result<()> {
        self.chunks.write().insert((chunk_x, chunk_z), chunk);
        Ok(())
    }
}
