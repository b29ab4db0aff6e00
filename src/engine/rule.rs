//! Transition rule for B3/S23.

use crate::grid::Cell;

/// Next state of a cell given its current state and live-neighbor count.
///
/// - Alive with fewer than 2 or more than 3 neighbors dies.
/// - Alive with 2 or 3 neighbors survives.
/// - Dead with exactly 3 neighbors is born.
#[inline(always)]
pub fn next_state(state: Cell, neighbors: u8) -> Cell {
    debug_assert!(neighbors <= 8);
    let alive = match state {
        Cell::Alive => neighbors == 2 || neighbors == 3,
        Cell::Dead => neighbors == 3,
    };
    if alive { Cell::Alive } else { Cell::Dead }
}
