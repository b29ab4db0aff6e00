use toroid_life::grid::{Cell, Grid};
use toroid_life::patterns::{self, Pattern, effective_density};

fn set_cells(grid: &mut Grid, cells: &[(usize, usize)]) {
    for &(row, col) in cells {
        grid.set(row, col, Cell::Alive);
    }
}

/// Count the 8 toroidal neighbors by explicit enumeration, independently of
/// the implementation under test.
fn enumerate_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let size = grid.size();
    let mut count = 0;
    for dr in [size - 1, 0, 1] {
        for dc in [size - 1, 0, 1] {
            if dr == 0 && dc == 0 {
                continue;
            }
            if grid.get((row + dr) % size, (col + dc) % size).is_alive() {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn neighbor_count_on_hand_built_five_by_five() {
    let mut grid = Grid::new(5);
    set_cells(&mut grid, &[(1, 1), (1, 2), (2, 2), (3, 0), (3, 3)]);

    assert_eq!(grid.neighbor_count(2, 2), 3);
    assert_eq!(grid.neighbor_count(1, 1), 2);
    assert_eq!(grid.neighbor_count(2, 1), 4);
    assert_eq!(grid.neighbor_count(0, 0), 1);

    for row in 0..5 {
        for col in 0..5 {
            assert_eq!(
                grid.neighbor_count(row, col),
                enumerate_neighbors(&grid, row, col),
                "mismatch at ({row},{col})"
            );
        }
    }
}

#[test]
fn lone_corner_cell_wraps_to_all_eight_neighbors() {
    let mut grid = Grid::new(8);
    grid.set(0, 0, Cell::Alive);

    // All 8 positions adjacent to (0,0) on the torus see exactly one neighbor.
    for (row, col) in [
        (7, 7),
        (7, 0),
        (7, 1),
        (0, 7),
        (0, 1),
        (1, 7),
        (1, 0),
        (1, 1),
    ] {
        assert_eq!(grid.neighbor_count(row, col), 1, "at ({row},{col})");
    }
    assert_eq!(grid.neighbor_count(3, 3), 0);
    // The live cell itself has no live neighbors.
    assert_eq!(grid.neighbor_count(0, 0), 0);
}

#[test]
fn live_cells_matches_direct_enumeration() {
    let grid = patterns::initialize(32, Pattern::Random { density: 0.4 }, 0xFACE);
    let direct = grid
        .cells()
        .iter()
        .filter(|c| c.is_alive())
        .count();
    assert_eq!(grid.live_cells(), direct);
    assert!(direct > 0);
}

#[test]
fn center_block_pattern_fills_centered_square() {
    let grid = patterns::initialize(100, Pattern::CenterBlock, 0);
    assert_eq!(grid.live_cells(), 100);
    for row in 45..55 {
        for col in 45..55 {
            assert!(grid.get(row, col).is_alive(), "({row},{col}) should be alive");
        }
    }
    assert!(!grid.get(44, 50).is_alive());
    assert!(!grid.get(55, 50).is_alive());
}

#[test]
fn invalid_density_falls_back_to_default() {
    assert_eq!(effective_density(0.0), patterns::DEFAULT_DENSITY);
    assert_eq!(effective_density(1.0), patterns::DEFAULT_DENSITY);
    assert_eq!(effective_density(-2.5), patterns::DEFAULT_DENSITY);
    assert_eq!(effective_density(0.42), 0.42);

    // Same seed, invalid density: identical to seeding with the default.
    let invalid = patterns::initialize(40, Pattern::Random { density: 1.5 }, 7);
    let default = patterns::initialize(
        40,
        Pattern::Random {
            density: patterns::DEFAULT_DENSITY,
        },
        7,
    );
    assert!(invalid == default);
}

#[test]
fn glider_plus_noise_is_deterministic_per_seed() {
    let a = patterns::initialize(100, Pattern::GliderPlusNoise, 99);
    let b = patterns::initialize(100, Pattern::GliderPlusNoise, 99);
    let c = patterns::initialize(100, Pattern::GliderPlusNoise, 100);
    assert!(a == b);
    assert!(a != c);
    assert!(a.live_cells() >= 5);
}

#[test]
fn render_text_uses_one_glyph_per_cell() {
    let mut grid = Grid::new(3);
    grid.set(1, 1, Cell::Alive);
    assert_eq!(grid.render_text(), "...\n.*.\n...\n");
}
