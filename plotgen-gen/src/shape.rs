//! Plot/road/wall classification of the block grid.
//!
//! Along each axis the world repeats with period `total_size = plot_size +
//! road_width`. Within one period, phases `0..plot_size` are plot, the phase
//! right after the plot and the last phase of the period are wall, and the
//! phases in between are road. A cell combines the two axis kinds.

use plotgen_anvil::CHUNK_WIDTH;

use crate::config::GenerationConfig;

const CELLS: usize = CHUNK_WIDTH * CHUNK_WIDTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Plot,
    Road,
    Wall,
}

impl TileKind {
    /// Kind of one axis at a phase within `0..total_size`.
    #[inline]
    fn for_phase(phase: u32, plot_size: u32, total_size: u32) -> Self {
        if phase < plot_size {
            TileKind::Plot
        } else if phase == plot_size || phase == total_size - 1 {
            TileKind::Wall
        } else {
            TileKind::Road
        }
    }

    /// Merge the x-axis and z-axis kinds of a cell.
    ///
    /// Where only one axis is plot, the other axis decides. Where neither is,
    /// road wins unless both are wall, so road crossings cut through the wall ring.
    #[inline]
    pub fn combine(x: TileKind, z: TileKind) -> TileKind {
        match (x, z) {
            (a, b) if a == b => a,
            (TileKind::Plot, other) | (other, TileKind::Plot) => other,
            _ => TileKind::Road,
        }
    }
}

/// Classification of the 16x16 columns of one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    // (z << 4) | x
    cells: [TileKind; CELLS],
}

impl Shape {
    #[inline]
    pub fn get(&self, x: usize, z: usize) -> TileKind {
        self.cells[(z << 4) | x]
    }

    /// Rows of constant local z, in z order.
    pub fn rows(&self) -> impl Iterator<Item = &[TileKind]> {
        self.cells.chunks_exact(CHUNK_WIDTH)
    }
}

/// Classify the 16x16 block footprint whose minimum corner is `(origin_x, origin_z)`.
pub fn classify_region(origin_x: i64, origin_z: i64, config: &GenerationConfig) -> Shape {
    let axis_x = sweep_axis(origin_x, config);
    let axis_z = sweep_axis(origin_z, config);

    let mut cells = [TileKind::Plot; CELLS];
    for (z, &kind_z) in axis_z.iter().enumerate() {
        for (x, &kind_x) in axis_x.iter().enumerate() {
            cells[(z << 4) | x] = TileKind::combine(kind_x, kind_z);
        }
    }

    Shape { cells }
}

/// Classify a single block column.
pub fn classify(x: i64, z: i64, config: &GenerationConfig) -> TileKind {
    let total = config.total_size();
    TileKind::combine(
        TileKind::for_phase(phase_of(x, total), config.plot_size, total),
        TileKind::for_phase(phase_of(z, total), config.plot_size, total),
    )
}

/// Identifies one plot by its tile index along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlotId {
    pub x: i64,
    pub z: i64,
}

/// The plot containing this block, or `None` if it is road or wall.
pub fn plot_at(x: i64, z: i64, config: &GenerationConfig) -> Option<PlotId> {
    if classify(x, z, config) != TileKind::Plot {
        return None;
    }
    let total = i64::from(config.total_size());
    Some(PlotId {
        x: x.div_euclid(total),
        z: z.div_euclid(total),
    })
}

/// Minimum block corner of a plot.
pub fn plot_origin(id: PlotId, config: &GenerationConfig) -> (i64, i64) {
    let total = i64::from(config.total_size());
    (id.x * total, id.z * total)
}

// Position of a coordinate within its period, in 0..total.
#[inline]
fn phase_of(coord: i64, total: u32) -> u32 {
    coord.rem_euclid(i64::from(total)) as u32
}

// Walk 16 consecutive blocks from `origin`, wrapping the phase by comparison.
fn sweep_axis(origin: i64, config: &GenerationConfig) -> [TileKind; CHUNK_WIDTH] {
    let total = config.total_size();
    let mut phase = phase_of(origin, total);
    let mut kinds = [TileKind::Plot; CHUNK_WIDTH];
    for kind in &mut kinds {
        if phase == total {
            phase = 0;
        }
        *kind = TileKind::for_phase(phase, config.plot_size, total);
        phase += 1;
    }
    kinds
}

#[cfg(test)]
mod tests {
    use super::*;
    use TileKind::{Plot, Road, Wall};

    fn config(plot_size: u32, road_width: u32) -> GenerationConfig {
        GenerationConfig {
            plot_size,
            road_width,
            ..GenerationConfig::default()
        }
    }

    fn configs() -> Vec<GenerationConfig> {
        vec![
            GenerationConfig::default(),
            config(50, 7),
            config(5, 3),
            config(1, 1),
            config(3, 2),
            config(16, 4),
            config(1, 30),
        ]
    }

    #[test]
    fn test_worked_examples() {
        let config = GenerationConfig::default();
        assert_eq!(config.total_size(), 89);
        assert_eq!(classify(0, 0, &config), Plot);
        assert_eq!(classify(82, 0, &config), Wall);
        assert_eq!(classify(83, 0, &config), Road);
        assert_eq!(classify(88, 0, &config), Wall);
        assert_eq!(classify(-1, 0, &config), Wall);
        assert_eq!(classify(89, 0, &config), Plot);

        let shape = classify_region(80, 0, &config);
        assert_eq!(shape.get(0, 0), Plot);
        assert_eq!(shape.get(2, 0), Wall);
        assert_eq!(shape.get(3, 0), Road);
    }

    #[test]
    fn test_negative_origin() {
        let config = GenerationConfig::default();
        // Chunk -1 covers x = -16..-1; x = -1 is phase 88, the far wall
        let shape = classify_region(-16, 0, &config);
        assert_eq!(shape.get(15, 0), Wall);
        assert_eq!(shape.get(14, 0), Road);
        // -89 is a whole period back, phase 0
        assert_eq!(classify_region(-89, 0, &config).get(0, 0), Plot);
        assert_eq!(classify_region(-89 * 3, -89, &config), classify_region(0, 0, &config));
    }

    #[test]
    fn test_precedence() {
        assert_eq!(TileKind::combine(Plot, Plot), Plot);
        assert_eq!(TileKind::combine(Road, Road), Road);
        assert_eq!(TileKind::combine(Wall, Wall), Wall);
        assert_eq!(TileKind::combine(Plot, Road), Road);
        assert_eq!(TileKind::combine(Road, Plot), Road);
        assert_eq!(TileKind::combine(Plot, Wall), Wall);
        assert_eq!(TileKind::combine(Wall, Plot), Wall);
        assert_eq!(TileKind::combine(Road, Wall), Road);
        assert_eq!(TileKind::combine(Wall, Road), Road);
    }

    #[test]
    fn test_region_is_deterministic() {
        for config in configs() {
            for (x, z) in [(0, 0), (-16, 32), (1 << 20, -(1 << 20)), (-7, 3)] {
                assert_eq!(classify_region(x, z, &config), classify_region(x, z, &config));
            }
        }
    }

    #[test]
    fn test_region_matches_point_queries() {
        for config in configs() {
            for (ox, oz) in [(0, 0), (-16, -16), (80, -96), (-1024, 352), (7, -5)] {
                let shape = classify_region(ox, oz, &config);
                for z in 0..16 {
                    for x in 0..16 {
                        assert_eq!(
                            shape.get(x, z),
                            classify(ox + x as i64, oz + z as i64, &config),
                            "origin ({ox}, {oz}) cell ({x}, {z}) total {}",
                            config.total_size()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_adjacent_chunks_continue_the_pattern() {
        for config in configs() {
            let total = i64::from(config.total_size());
            for chunk_x in -12..12i64 {
                let left = classify_region(chunk_x * 16, 0, &config);
                let right = classify_region((chunk_x + 1) * 16, 0, &config);
                // Column x = 16 of the left chunk, had it existed, is column 0 of the right one
                for z in 0..16 {
                    let edge = (chunk_x + 1) * 16;
                    assert_eq!(right.get(0, z), classify(edge, z as i64, &config));
                    assert_eq!(left.get(15, z), classify(edge - 1, z as i64, &config));
                    assert_eq!(right.get(0, z), classify(edge - total, z as i64, &config));
                }
            }
        }
    }

    #[test]
    fn test_periodic_in_both_axes() {
        for config in configs() {
            let total = i64::from(config.total_size());
            for x in -40..40i64 {
                for k in [-3i64, -1, 1, 2, 1000] {
                    assert_eq!(classify(x, 5, &config), classify(x + k * total, 5, &config));
                    assert_eq!(classify(5, x, &config), classify(5, x + k * total, &config));
                }
            }
        }
    }

    #[test]
    fn test_small_period_wraps_twice_per_chunk() {
        // total 2: phase 0 plot, phase 1 is both "after plot" and "last", so wall
        let config = config(1, 1);
        let shape = classify_region(0, 0, &config);
        let row: Vec<TileKind> = shape.rows().next().unwrap().to_vec();
        let expected: Vec<TileKind> = (0..16).map(|x| if x % 2 == 0 { Plot } else { Wall }).collect();
        assert_eq!(row, expected);
    }

    #[test]
    fn test_wall_ring_and_road_crossing() {
        // plot 5, road 3: phases 0..5 plot, 5 wall, 6 road, 7 wall
        let config = config(5, 3);
        let shape = classify_region(0, 0, &config);
        let rows: Vec<String> = shape
            .rows()
            .take(8)
            .map(|row| {
                row[..8]
                    .iter()
                    .map(|kind| match kind {
                        Plot => '.',
                        Road => '=',
                        Wall => '#',
                    })
                    .collect()
            })
            .collect();
        assert_eq!(
            rows,
            vec![
                ".....#=#", ".....#=#", ".....#=#", ".....#=#", ".....#=#",
                "######=#", "========", "######=#",
            ]
        );
    }

    #[test]
    #[should_panic(expected = "tile period")]
    fn test_unvalidated_zero_period_fails_fast() {
        let config = config(0, 0);
        let _ = classify_region(0, 0, &config);
    }

    #[test]
    fn test_plot_lookup() {
        let config = GenerationConfig::default();
        assert_eq!(plot_at(0, 0, &config), Some(PlotId { x: 0, z: 0 }));
        assert_eq!(plot_at(81, 81, &config), Some(PlotId { x: 0, z: 0 }));
        assert_eq!(plot_at(82, 0, &config), None);
        assert_eq!(plot_at(85, 10, &config), None);
        assert_eq!(plot_at(-1, 0, &config), None);
        assert_eq!(plot_at(-89, -10, &config), Some(PlotId { x: -1, z: -1 }));
        assert_eq!(plot_at(200, -200, &config), Some(PlotId { x: 2, z: -3 }));

        let id = PlotId { x: -2, z: 3 };
        let (ox, oz) = plot_origin(id, &config);
        assert_eq!((ox, oz), (-178, 267));
        assert_eq!(plot_at(ox, oz, &config), Some(id));
        assert_eq!(plot_at(ox + 81, oz + 81, &config), Some(id));
    }
}
