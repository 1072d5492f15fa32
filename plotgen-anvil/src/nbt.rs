//! NBT (Named Binary Tag) structures for exported chunks.
//!
//! Serialized with fastnbt. Sections use paletted storage: a list of the
//! distinct blocks plus packed indices into that list.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::chunk::{CHUNK_WIDTH, Chunk, WORLD_HEIGHT};

const SECTION_HEIGHT: usize = 16;
const SECTION_VOLUME: usize = CHUNK_WIDTH * CHUNK_WIDTH * SECTION_HEIGHT;
const SECTION_COUNT: usize = WORLD_HEIGHT / SECTION_HEIGHT;
const MIN_BITS_PER_BLOCK: usize = 4;

/// Root of an exported chunk.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChunkRoot {
    #[serde(rename = "xPos")]
    pub x_pos: i32,
    #[serde(rename = "zPos")]
    pub z_pos: i32,

    // "full" once the generator has painted the chunk
    #[serde(rename = "Status")]
    pub status: String,

    // One biome id per column, z-major
    #[serde(rename = "Biomes")]
    pub biomes: fastnbt::ByteArray,

    pub sections: Vec<Section>,
}

// --- Section (16x16x16 Cube) ---
#[derive(Debug, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "Y")]
    pub y: i8,

    // Omitted for all-air sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_states: Option<BlockStates>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BlockStates {
    pub palette: Vec<PaletteEntry>,
    // Indices into the palette. Only present if the palette has more than one entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<fastnbt::LongArray>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    #[serde(rename = "Id")]
    pub id: i32,
    #[serde(rename = "Data")]
    pub data: i8,
}

impl From<Block> for PaletteEntry {
    fn from(block: Block) -> Self {
        Self {
            id: i32::from(block.id),
            data: block.meta as i8,
        }
    }
}

/// Serialize a chunk to uncompressed NBT bytes.
pub fn encode_chunk(chunk: &Chunk) -> Result<Vec<u8>> {
    let root = build_root(chunk);
    fastnbt::to_bytes(&root).context("Failed to serialize chunk NBT")
}

/// Build the NBT tree for a chunk without serializing it.
pub fn build_root(chunk: &Chunk) -> ChunkRoot {
    let sections = (0..SECTION_COUNT)
        .map(|sec_y| build_section(chunk, sec_y))
        .collect();

    ChunkRoot {
        x_pos: chunk.x(),
        z_pos: chunk.z(),
        status: if chunk.is_generated() { "full" } else { "empty" }.to_string(),
        biomes: fastnbt::ByteArray::new(chunk.biomes().iter().map(|&b| b as i8).collect()),
        sections,
    }
}

fn build_section(chunk: &Chunk, sec_y: usize) -> Section {
    let blocks = chunk.section_blocks(sec_y);
    let y = sec_y as i8;

    if blocks.iter().all(Block::is_air) {
        return Section { y, block_states: None };
    }

    // Palette in first-seen order
    let mut palette: Vec<PaletteEntry> = Vec::new();
    let mut block_to_index: HashMap<Block, usize> = HashMap::new();
    let mut block_indices = Vec::with_capacity(SECTION_VOLUME);
    for &block in blocks {
        let idx = *block_to_index.entry(block).or_insert_with(|| {
            palette.push(block.into());
            palette.len() - 1
        });
        block_indices.push(idx);
    }

    if palette.len() == 1 {
        return Section {
            y,
            block_states: Some(BlockStates { palette, data: None }),
        };
    }

    let data = pack_indices(&block_indices, bits_per_block(palette.len()));
    Section {
        y,
        block_states: Some(BlockStates {
            palette,
            data: Some(fastnbt::LongArray::new(data)),
        }),
    }
}

/// ceil(log2(palette_len)), min 4.
fn bits_per_block(palette_len: usize) -> usize {
    let needed = (usize::BITS - (palette_len.saturating_sub(1)).leading_zeros()) as usize;
    needed.max(MIN_BITS_PER_BLOCK)
}

// Entries never straddle two longs; leftover high bits stay zero.
fn pack_indices(indices: &[usize], bits_per_block: usize) -> Vec<i64> {
    let blocks_per_long = 64 / bits_per_block;
    let mask = (1u64 << bits_per_block) - 1;
    let mut packed = vec![0i64; indices.len().div_ceil(blocks_per_long)];

    for (i, &idx) in indices.iter().enumerate() {
        let long_index = i / blocks_per_long;
        let bit_offset = (i % blocks_per_long) * bits_per_block;

        let current = packed[long_index] as u64;
        packed[long_index] = (current | (((idx as u64) & mask) << bit_offset)) as i64;
    }

    packed
}
