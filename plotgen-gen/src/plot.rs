use std::sync::Arc;

use anyhow::{Context, Result};
use plotgen_anvil::{CHUNK_WIDTH, Chunk, ChunkManager};

use crate::config::{GenerationConfig, GeneratorOptions};
use crate::shape::{TileKind, classify_region};
use crate::{BlockPos, WorldGenerator};

/// Biome id written to every column.
pub const PLAINS_BIOME: u8 = 1;

/// Flat plot world: square plots framed by a one-block wall ring,
/// separated by roads.
pub struct PlotGenerator<W> {
    world: Arc<W>,
    seed: i64,
    config: GenerationConfig,
}

impl<W: ChunkManager> PlotGenerator<W> {
    pub fn new(world: Arc<W>, seed: i64, options: &GeneratorOptions) -> Result<Self> {
        let config = GenerationConfig::from_options(options).context("Invalid generator preset")?;
        Self::with_config(world, seed, config)
    }

    pub fn with_config(world: Arc<W>, seed: i64, config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Plot generator: plot {} road {} ground {} (period {})",
            config.plot_size,
            config.road_width,
            config.ground_height,
            config.total_size()
        );
        Ok(Self { world, seed, config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Unused by the terrain, which has no randomness.
    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn world(&self) -> &Arc<W> {
        &self.world
    }
}

impl<W: ChunkManager> WorldGenerator for PlotGenerator<W> {
    fn name(&self) -> &'static str {
        "myplot"
    }

    fn generate_chunk(&self, chunk_x: i32, chunk_z: i32) -> Result<()> {
        let mut chunk = self
            .world
            .get_chunk(chunk_x, chunk_z)
            .with_context(|| format!("Failed to load chunk {chunk_x},{chunk_z}"))?;

        paint_chunk(&mut chunk, chunk_x, chunk_z, &self.config);

        self.world
            .set_chunk(chunk_x, chunk_z, chunk)
            .with_context(|| format!("Failed to store chunk {chunk_x},{chunk_z}"))?;
        log::trace!("Generated chunk {chunk_x},{chunk_z}");
        Ok(())
    }

    fn populate_chunk(&self, _chunk_x: i32, _chunk_z: i32) -> Result<()> {
        Ok(())
    }

    fn spawn(&self) -> BlockPos {
        BlockPos {
            x: 0,
            y: self.config.ground_height as i32 + 1,
            z: 0,
        }
    }

    fn settings(&self) -> GeneratorOptions {
        GeneratorOptions::with_preset(GenerationConfig::default().to_preset())
    }
}

/// Paint the terrain of chunk `(chunk_x, chunk_z)` into `chunk`.
///
/// Each column gets the bottom block at level 0, fill up to the ground, then
/// the plot floor (plots) or road block (roads and walls) at ground height.
/// Wall columns also get the wall block one level above the ground. Levels
/// above that are left as they were.
pub fn paint_chunk(chunk: &mut Chunk, chunk_x: i32, chunk_z: i32, config: &GenerationConfig) {
    let shape = classify_region(
        i64::from(chunk_x) * CHUNK_WIDTH as i64,
        i64::from(chunk_z) * CHUNK_WIDTH as i64,
        config,
    );
    let ground = config.ground_height as usize;

    for z in 0..CHUNK_WIDTH {
        for x in 0..CHUNK_WIDTH {
            chunk.set_biome(x, z, PLAINS_BIOME);
            chunk.set_block(x, 0, z, config.bottom_block);
            for y in 1..ground {
                chunk.set_block(x, y, z, config.plot_fill_block);
            }

            match shape.get(x, z) {
                TileKind::Plot => chunk.set_block(x, ground, z, config.plot_floor_block),
                TileKind::Road => chunk.set_block(x, ground, z, config.road_block),
                TileKind::Wall => {
                    chunk.set_block(x, ground, z, config.road_block);
                    chunk.set_block(x, ground + 1, z, config.wall_block);
                }
            }
        }
    }

    chunk.set_x(chunk_x);
    chunk.set_z(chunk_z);
    chunk.set_generated();
}
