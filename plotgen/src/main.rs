use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;

use plotgen_anvil::compression::compress_and_wrap_chunk;
use plotgen_anvil::nbt::encode_chunk;
use plotgen_anvil::{CHUNK_WIDTH, ChunkManager, MemoryWorld};
use plotgen_benchmark::BenchmarkMetrics;
use plotgen_gen::{
    GenerationConfig, GeneratorOptions, PlotGenerator, TileKind, WorldGenerator, classify,
    classify_region, plot_at, plot_origin,
};

#[derive(Parser)]
#[command(name = "plotgen", about = "Flat plot-world terrain generator")]
pub struct Args {
    /// Preset JSON, e.g. '{"PlotSize":"50","RoadWidth":"7"}'
    #[arg(short, long, env = "PLOTGEN_PRESET", global = true)]
    pub preset: Option<String>,

    /// Read the preset JSON from a file (overrides --preset)
    #[arg(long, global = true)]
    pub preset_file: Option<PathBuf>,

    /// World seed (the terrain does not depend on it)
    #[arg(short, long, default_value = "0", global = true)]
    pub seed: i64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the resolved configuration, spawn point and emitted settings
    Info,

    /// Draw a rectangle of chunks: '.' plot, '=' road, '#' wall
    Map {
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        chunk_x: i32,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        chunk_z: i32,
        /// Width in chunks
        #[arg(long, default_value = "6")]
        width: u32,
        /// Depth in chunks
        #[arg(long, default_value = "6")]
        depth: u32,
    },

    /// Show which tile and plot a block column belongs to
    Locate {
        #[arg(allow_hyphen_values = true)]
        x: i64,
        #[arg(allow_hyphen_values = true)]
        z: i64,
    },

    /// Generate chunks around the origin and write them as compressed NBT
    Export {
        #[arg(short, long)]
        out: PathBuf,
        /// Chunks in each direction from chunk 0,0
        #[arg(short, long, default_value = "2")]
        radius: u32,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let options = GeneratorOptions {
        preset: match &args.preset_file {
            Some(path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read preset file {}", path.display()))?,
            ),
            None => args.preset.clone(),
        },
    };

    let world = Arc::new(MemoryWorld::new());
    let generator = PlotGenerator::new(world, args.seed, &options)?;

    match args.command {
        Command::Info => print_info(&generator),
        Command::Map {
            chunk_x,
            chunk_z,
            width,
            depth,
        } => print_map(generator.config(), chunk_x, chunk_z, width, depth),
        Command::Locate { x, z } => print_location(generator.config(), x, z),
        Command::Export { out, radius } => export(&generator, &out, radius)?,
    }

    Ok(())
}

fn print_info<W: ChunkManager>(generator: &PlotGenerator<W>) {
    let config = generator.config();
    let spawn = generator.spawn();

    println!("Generator: {}", generator.name());
    println!("  Road block:       {}", config.road_block);
    println!("  Wall block:       {}", config.wall_block);
    println!("  Plot floor block: {}", config.plot_floor_block);
    println!("  Plot fill block:  {}", config.plot_fill_block);
    println!("  Bottom block:     {}", config.bottom_block);
    println!("  Road width:       {}", config.road_width);
    println!("  Plot size:        {}", config.plot_size);
    println!("  Ground height:    {}", config.ground_height);
    println!("  Tile period:      {}", config.total_size());
    println!("Spawn: {}, {}, {}", spawn.x, spawn.y, spawn.z);
    if let Some(preset) = generator.settings().preset {
        println!("Default preset: {preset}");
    }
}

fn print_map(config: &GenerationConfig, chunk_x: i32, chunk_z: i32, width: u32, depth: u32) {
    for cz in 0..depth as i32 {
        let shapes: Vec<_> = (0..width as i32)
            .map(|cx| {
                classify_region(
                    i64::from(chunk_x + cx) * CHUNK_WIDTH as i64,
                    i64::from(chunk_z + cz) * CHUNK_WIDTH as i64,
                    config,
                )
            })
            .collect();

        for z in 0..CHUNK_WIDTH {
            let line: String = shapes
                .iter()
                .flat_map(|shape| (0..CHUNK_WIDTH).map(move |x| tile_char(shape.get(x, z))))
                .collect();
            println!("{line}");
        }
    }
}

fn tile_char(kind: TileKind) -> char {
    match kind {
        TileKind::Plot => '.',
        TileKind::Road => '=',
        TileKind::Wall => '#',
    }
}

fn print_location(config: &GenerationConfig, x: i64, z: i64) {
    println!("{x}, {z}: {:?}", classify(x, z, config));
    match plot_at(x, z, config) {
        Some(id) => {
            let (ox, oz) = plot_origin(id, config);
            println!("Plot {};{} (corner {ox}, {oz}, size {})", id.x, id.z, config.plot_size);
        }
        None => println!("Not inside a plot"),
    }
}

fn export(generator: &PlotGenerator<MemoryWorld>, out: &Path, radius: u32) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;

    let config = generator.config();
    let metrics = BenchmarkMetrics::new(format!(
        "plot {} road {} ground {} radius {}",
        config.plot_size, config.road_width, config.ground_height, radius
    ));

    let r = radius as i32;
    let coords: Vec<(i32, i32)> = (-r..=r).flat_map(|x| (-r..=r).map(move |z| (x, z))).collect();
    println!("Generating {} chunks into {}", coords.len(), out.display());

    coords.par_iter().try_for_each(|&(x, z)| -> Result<()> {
        let start = Instant::now();
        generator.generate_chunk(x, z)?;
        generator.populate_chunk(x, z)?;
        metrics.record_generation(start.elapsed());

        let chunk = generator
            .world()
            .chunk(x, z)
            .with_context(|| format!("Chunk {x},{z} missing after generation"))?;

        let start = Instant::now();
        let nbt = encode_chunk(&chunk)?;
        metrics.record_serialization(start.elapsed());

        let start = Instant::now();
        let blob = compress_and_wrap_chunk(&nbt)?;
        metrics.record_compression(start.elapsed());
        metrics.record_chunk_sizes(nbt.len(), blob.len());

        let path = out.join(format!("c.{x}.{z}.nbt.zlib"));
        fs::write(&path, &blob).with_context(|| format!("Failed to write {}", path.display()))?;
        log::debug!("Wrote {} ({} bytes)", path.display(), blob.len());
        Ok(())
    })?;

    println!("{}", metrics.generate_report());
    Ok(())
}
