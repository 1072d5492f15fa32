//! Host-side chunk plumbing: material tokens, in-memory chunk columns,
//! world storage and the NBT export path.

pub mod block;
pub mod chunk;
pub mod compression;
pub mod nbt;
pub mod world;

pub use block::Block;
pub use chunk::{CHUNK_WIDTH, Chunk, WORLD_HEIGHT};
pub use world::{ChunkManager, MemoryWorld};
