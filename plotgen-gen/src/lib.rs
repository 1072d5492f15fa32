use anyhow::Result;

pub mod config;
pub mod plot;
pub mod shape;

pub use config::{GenerationConfig, GeneratorOptions};
pub use plot::{PLAINS_BIOME, PlotGenerator, paint_chunk};
pub use shape::{PlotId, Shape, TileKind, classify, classify_region, plot_at, plot_origin};

/// A block position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// What a host needs from a terrain generator.
pub trait WorldGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Paint the chunk and hand it back to world storage.
    fn generate_chunk(&self, chunk_x: i32, chunk_z: i32) -> Result<()>;

    /// Decoration pass, run after neighbouring chunks exist.
    fn populate_chunk(&self, chunk_x: i32, chunk_z: i32) -> Result<()>;

    fn spawn(&self) -> BlockPos;

    /// Options describing this generator's preset, for display.
    fn settings(&self) -> GeneratorOptions;
}
