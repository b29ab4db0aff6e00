//! Toroidal cell grid.
//!
//! A square, fixed-size board stored as one contiguous row-major buffer.
//! Row/col arithmetic wraps modulo the side length in both directions, so
//! edge cells are adjacent to the opposite edge (torus topology).

/// State of a single cell.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Dead = 0,
    Alive = 1,
}

impl Cell {
    #[inline(always)]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Glyph used by the textual dump: `*` alive, `.` dead.
    #[inline]
    pub fn glyph(self) -> char {
        match self {
            Cell::Alive => '*',
            Cell::Dead => '.',
        }
    }
}

/// Count live cells among the 8 toroidal Moore neighbors of `(row, col)`.
///
/// Free function over the raw buffer so the parallel kernels can share it
/// with [`Grid::neighbor_count`] without borrowing the whole grid.
#[inline]
pub fn neighbor_count_at(cells: &[Cell], size: usize, row: usize, col: usize) -> u8 {
    debug_assert!(row < size && col < size);
    debug_assert_eq!(cells.len(), size * size);

    let mut count = 0u8;
    for dr in 0..3 {
        let r = (row + size + dr - 1) % size;
        for dc in 0..3 {
            if dr == 1 && dc == 1 {
                continue;
            }
            let c = (col + size + dc - 1) % size;
            count += cells[r * size + c] as u8;
        }
    }
    count
}

/// Square toroidal grid of cells.
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-dead grid with side length `size`.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "grid size must be positive");
        Self {
            size,
            cells: vec![Cell::Dead; size * size],
        }
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.size && col < self.size);
        row * self.size + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    /// Number of live neighbors of `(row, col)`, in `[0, 8]`.
    #[inline]
    pub fn neighbor_count(&self, row: usize, col: usize) -> u8 {
        neighbor_count_at(&self.cells, self.size, row, col)
    }

    /// Live-cell count by direct enumeration.
    pub fn live_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// Full cell buffer, row-major.
    #[inline(always)]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Textual dump: one line per row, one glyph per cell.
    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for row in self.cells.chunks(self.size) {
            out.extend(row.iter().map(|c| c.glyph()));
            out.push('\n');
        }
        out
    }
}

impl Clone for Grid {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            cells: self.cells.clone(),
        }
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.cells == other.cells
    }
}

impl Eq for Grid {}
