use crate::block::Block;

/// Horizontal edge length of a chunk, in blocks.
pub const CHUNK_WIDTH: usize = 16;
/// Number of vertical levels in a chunk column.
pub const WORLD_HEIGHT: usize = 256;

const LAYER_SIZE: usize = CHUNK_WIDTH * CHUNK_WIDTH;

/// A 16x16 column of the world, `WORLD_HEIGHT` levels tall.
///
/// Blocks are stored Y -> Z -> X, i.e. `index = (y * 16 + z) * 16 + x`,
/// which is also the order sections are packed in on export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    x: i32,
    z: i32,
    generated: bool,
    blocks: Vec<Block>,
    biomes: [u8; LAYER_SIZE],
}

impl Chunk {
    /// An all-air, ungenerated chunk.
    pub fn new(x: i32, z: i32) -> Self {
        Self {
            x,
            z,
            generated: false,
            blocks: vec![Block::AIR; LAYER_SIZE * WORLD_HEIGHT],
            biomes: [0; LAYER_SIZE],
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    pub fn set_z(&mut self, z: i32) {
        self.z = z;
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub fn set_generated(&mut self) {
        self.generated = true;
    }

    /// Block at chunk-local coordinates. Anything outside the chunk reads as air.
    pub fn block(&self, x: usize, y: usize, z: usize) -> Block {
        match block_index(x, y, z) {
            Some(i) => self.blocks[i],
            None => Block::AIR,
        }
    }

    /// Set a block at chunk-local coordinates (x, z: 0..15, y: 0..WORLD_HEIGHT).
    /// Writes outside the chunk are dropped.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, block: Block) {
        if let Some(i) = block_index(x, y, z) {
            self.blocks[i] = block;
        }
    }

    pub fn biome(&self, x: usize, z: usize) -> u8 {
        if x < CHUNK_WIDTH && z < CHUNK_WIDTH {
            self.biomes[(z << 4) | x]
        } else {
            0
        }
    }

    pub fn set_biome(&mut self, x: usize, z: usize, biome: u8) {
        if x < CHUNK_WIDTH && z < CHUNK_WIDTH {
            self.biomes[(z << 4) | x] = biome;
        }
    }

    /// Biome ids, z-major.
    pub fn biomes(&self) -> &[u8] {
        &self.biomes
    }

    /// The 4096 blocks of one 16-level section, Y -> Z -> X.
    pub(crate) fn section_blocks(&self, section_y: usize) -> &[Block] {
        let start = section_y * LAYER_SIZE * CHUNK_WIDTH;
        &self.blocks[start..start + LAYER_SIZE * CHUNK_WIDTH]
    }
}

#[inline]
fn block_index(x: usize, y: usize, z: usize) -> Option<usize> {
    if x < CHUNK_WIDTH && z < CHUNK_WIDTH && y < WORLD_HEIGHT {
        Some((y * CHUNK_WIDTH + z) * CHUNK_WIDTH + x)
    } else {
        None
    }
}
