//! Generator configuration and preset parsing.
//!
//! Presets arrive from the host as a JSON object of string values, e.g.
//! `{"RoadBlock":"5:0","PlotSize":"82"}`. Every field falls back to its
//! default on its own, so partial or partly malformed presets still load.

use anyhow::{Context, Result, ensure};
use plotgen_anvil::{Block, WORLD_HEIGHT};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_ROAD_WIDTH: u32 = 7;
pub const DEFAULT_PLOT_SIZE: u32 = 82;
pub const DEFAULT_GROUND_HEIGHT: u32 = 64;

/// Highest ground level that still leaves room for the wall cap above it.
pub const MAX_GROUND_HEIGHT: u32 = (WORLD_HEIGHT - 2) as u32;

const ROAD_BLOCK: &str = "RoadBlock";
const WALL_BLOCK: &str = "WallBlock";
const PLOT_FLOOR_BLOCK: &str = "PlotFloorBlock";
const PLOT_FILL_BLOCK: &str = "PlotFillBlock";
const BOTTOM_BLOCK: &str = "BottomBlock";
const ROAD_WIDTH: &str = "RoadWidth";
const PLOT_SIZE: &str = "PlotSize";
const GROUND_HEIGHT: &str = "GroundHeight";

/// Options handed to a generator by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
}

impl GeneratorOptions {
    pub fn with_preset(preset: impl Into<String>) -> Self {
        Self {
            preset: Some(preset.into()),
        }
    }
}

/// Resolved, validated generation parameters. Immutable once a generator owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    pub road_block: Block,
    pub wall_block: Block,
    pub plot_floor_block: Block,
    pub plot_fill_block: Block,
    pub bottom_block: Block,
    pub road_width: u32,
    pub plot_size: u32,
    pub ground_height: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            road_block: Block::PLANKS,
            wall_block: Block::STONE_SLAB,
            plot_floor_block: Block::GRASS,
            plot_fill_block: Block::DIRT,
            bottom_block: Block::BEDROCK,
            road_width: DEFAULT_ROAD_WIDTH,
            plot_size: DEFAULT_PLOT_SIZE,
            ground_height: DEFAULT_GROUND_HEIGHT,
        }
    }
}

impl GenerationConfig {
    /// Resolve the config from host options. A missing or malformed preset
    /// yields the defaults; out-of-range numbers are rejected.
    pub fn from_options(options: &GeneratorOptions) -> Result<Self> {
        match options.preset.as_deref() {
            Some(preset) => Self::from_preset(preset),
            None => Ok(Self::default()),
        }
    }

    pub fn from_preset(preset: &str) -> Result<Self> {
        let settings = match serde_json::from_str::<Value>(preset) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                log::warn!("Preset is not a JSON object ({other}), using defaults");
                Map::new()
            }
            Err(e) => {
                log::warn!("Malformed preset JSON: {e}, using defaults");
                Map::new()
            }
        };

        let defaults = Self::default();
        let config = Self {
            road_block: parse_block(&settings, ROAD_BLOCK, defaults.road_block),
            wall_block: parse_block(&settings, WALL_BLOCK, defaults.wall_block),
            plot_floor_block: parse_block(&settings, PLOT_FLOOR_BLOCK, defaults.plot_floor_block),
            plot_fill_block: parse_block(&settings, PLOT_FILL_BLOCK, defaults.plot_fill_block),
            bottom_block: parse_block(&settings, BOTTOM_BLOCK, defaults.bottom_block),
            road_width: to_u32(parse_number(&settings, ROAD_WIDTH, defaults.road_width), ROAD_WIDTH)?,
            plot_size: to_u32(parse_number(&settings, PLOT_SIZE, defaults.plot_size), PLOT_SIZE)?,
            ground_height: to_u32(
                parse_number(&settings, GROUND_HEIGHT, defaults.ground_height),
                GROUND_HEIGHT,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the tiling and height invariants.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.road_width >= 1, "{ROAD_WIDTH} must be at least 1, got {}", self.road_width);
        ensure!(self.plot_size >= 1, "{PLOT_SIZE} must be at least 1, got {}", self.plot_size);
        ensure!(
            self.plot_size.checked_add(self.road_width).is_some(),
            "{PLOT_SIZE} + {ROAD_WIDTH} overflows ({} + {})",
            self.plot_size,
            self.road_width
        );
        ensure!(
            (1..=MAX_GROUND_HEIGHT).contains(&self.ground_height),
            "{GROUND_HEIGHT} must be within 1..={MAX_GROUND_HEIGHT}, got {}",
            self.ground_height
        );
        Ok(())
    }

    /// Length of one plot plus its road, the period of the tiling along each axis.
    ///
    /// Panics if the sum overflows or is zero; `validate` rules both out.
    #[inline]
    pub fn total_size(&self) -> u32 {
        let total = self.plot_size.checked_add(self.road_width);
        assert!(
            matches!(total, Some(t) if t >= 1),
            "tile period must be within 1..=u32::MAX (plot {} + road {})",
            self.plot_size,
            self.road_width
        );
        total.unwrap_or(1)
    }

    /// Render as a preset JSON object with string values.
    pub fn to_preset(&self) -> String {
        let fields = [
            (ROAD_BLOCK, self.road_block.to_string()),
            (WALL_BLOCK, self.wall_block.to_string()),
            (PLOT_FLOOR_BLOCK, self.plot_floor_block.to_string()),
            (PLOT_FILL_BLOCK, self.plot_fill_block.to_string()),
            (BOTTOM_BLOCK, self.bottom_block.to_string()),
            (ROAD_WIDTH, self.road_width.to_string()),
            (PLOT_SIZE, self.plot_size.to_string()),
            (GROUND_HEIGHT, self.ground_height.to_string()),
        ];
        let map: Map<String, Value> = fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), Value::String(value)))
            .collect();
        Value::Object(map).to_string()
    }
}

fn parse_block(settings: &Map<String, Value>, key: &str, default: Block) -> Block {
    let Some(value) = settings.get(key) else {
        return default;
    };
    match field_text(value).map(|s| s.parse::<Block>()) {
        Some(Ok(block)) => block,
        Some(Err(e)) => {
            log::warn!("Invalid {key} {value}: {e:#}, using {default}");
            default
        }
        None => {
            log::warn!("Invalid {key} {value}, using {default}");
            default
        }
    }
}

fn parse_number(settings: &Map<String, Value>, key: &str, default: u32) -> i64 {
    let Some(value) = settings.get(key) else {
        return i64::from(default);
    };
    match field_text(value).and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(n) => n,
        None => {
            log::warn!("Invalid {key} {value}, using {default}");
            i64::from(default)
        }
    }
}

// Presets normally carry strings, but bare JSON numbers are accepted too.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn to_u32(value: i64, key: &str) -> Result<u32> {
    u32::try_from(value).with_context(|| format!("{key} must be a positive integer, got {value}"))
}
