//! Seed patterns for the initial grid.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::grid::{Cell, Grid};

/// Side length of the centered alive block.
pub const CENTER_BLOCK_SIDE: usize = 10;
/// Fallback when a requested random density falls outside `(0, 1)`.
pub const DEFAULT_DENSITY: f64 = 0.3;
/// Random cells sprinkled on top of the glider pattern.
pub const GLIDER_NOISE_CELLS: usize = 100;

/// Relative cell offsets of a glider heading down-right.
const GLIDER: [(usize, usize); 5] = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

/// Initial grid configuration.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Pattern {
    /// A `CENTER_BLOCK_SIDE` square of live cells centered in the grid.
    CenterBlock,
    /// Each cell alive with probability `density`.
    /// A density outside `(0, 1)` silently resets to [`DEFAULT_DENSITY`].
    Random { density: f64 },
    /// A glider near the top-left corner plus sparse random noise.
    GliderPlusNoise,
}

impl Pattern {
    pub fn label(&self) -> &'static str {
        match self {
            Pattern::CenterBlock => "center-block",
            Pattern::Random { .. } => "random",
            Pattern::GliderPlusNoise => "glider-plus-noise",
        }
    }
}

/// Clamp a requested density to the valid open interval.
#[inline]
pub fn effective_density(density: f64) -> f64 {
    if density > 0.0 && density < 1.0 {
        density
    } else {
        DEFAULT_DENSITY
    }
}

/// Build a freshly seeded grid. Deterministic for a given `(pattern, seed)`.
pub fn initialize(size: usize, pattern: Pattern, seed: u64) -> Grid {
    let mut grid = Grid::new(size);
    let mut rng = StdRng::seed_from_u64(seed);

    match pattern {
        Pattern::CenterBlock => {
            let side = CENTER_BLOCK_SIDE.min(size);
            let start = (size - side) / 2;
            for row in start..start + side {
                for col in start..start + side {
                    grid.set(row, col, Cell::Alive);
                }
            }
        }
        Pattern::Random { density } => {
            let density = effective_density(density);
            for row in 0..size {
                for col in 0..size {
                    if rng.random::<f64>() < density {
                        grid.set(row, col, Cell::Alive);
                    }
                }
            }
        }
        Pattern::GliderPlusNoise => {
            let origin = 10.min(size.saturating_sub(3));
            for &(dr, dc) in &GLIDER {
                grid.set((origin + dr) % size, (origin + dc) % size, Cell::Alive);
            }
            for _ in 0..GLIDER_NOISE_CELLS {
                let row = rng.random_range(0..size);
                let col = rng.random_range(0..size);
                grid.set(row, col, Cell::Alive);
            }
        }
    }

    grid
}

/// Place a bare glider at `(origin_row, origin_col)` on an existing grid.
/// Used by tests that track its translation.
pub fn place_glider(grid: &mut Grid, origin_row: usize, origin_col: usize) {
    let size = grid.size();
    for &(dr, dc) in &GLIDER {
        grid.set((origin_row + dr) % size, (origin_col + dc) % size, Cell::Alive);
    }
}
