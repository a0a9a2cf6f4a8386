//! Playing grid: occupancy, collision, locking and line clearing

use std::fmt;

/// Standard grid dimensions
pub const GRID_WIDTH: usize = 10;
pub const GRID_HEIGHT: usize = 20;

/// The playing field. Row 0 is the top visible row and rows grow downward;
/// negative rows are the margin above the field where pieces spawn.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    /// Stored as [row][col]
    cells: [[bool; GRID_WIDTH]; GRID_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [[false; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        GRID_WIDTH
    }

    pub fn height(&self) -> usize {
        GRID_HEIGHT
    }

    /// Occupancy at (x, y), `None` if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<bool> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    /// Set a cell. Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, filled: bool) -> bool {
        if !Self::in_bounds(x, y) {
            return false;
        }
        self.cells[y as usize][x as usize] = filled;
        true
    }

    fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < GRID_WIDTH && (y as usize) < GRID_HEIGHT
    }

    /// True if any of the absolute `cells` hits a side wall, the floor, or
    /// an occupied cell. Cells above the top only check the walls.
    pub fn collides(&self, cells: &[(i32, i32)]) -> bool {
        cells.iter().any(|&(x, y)| {
            if x < 0 || x >= GRID_WIDTH as i32 || y >= GRID_HEIGHT as i32 {
                return true;
            }
            y >= 0 && self.cells[y as usize][x as usize]
        })
    }

    /// Commit `cells` into the grid.
    ///
    /// Returns false, leaving the grid untouched, if any cell is still above
    /// the top row: the piece never fully entered the field.
    pub fn lock(&mut self, cells: &[(i32, i32)]) -> bool {
        if cells.iter().any(|&(_, y)| y < 0) {
            return false;
        }
        for &(x, y) in cells {
            self.set(x, y, true);
        }
        true
    }

    /// Remove every full row, shifting the rows above down in order and
    /// refilling the top with empty rows. Returns how many rows were removed.
    pub fn clear_lines(&mut self) -> usize {
        let mut write_row = GRID_HEIGHT;

        for read_row in (0..GRID_HEIGHT).rev() {
            if !self.is_row_full(read_row) {
                write_row -= 1;
                if write_row != read_row {
                    self.cells[write_row] = self.cells[read_row];
                }
            }
        }

        // Everything above the last kept row is fresh space
        for row in 0..write_row {
            self.cells[row] = [false; GRID_WIDTH];
        }

        write_row
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|&filled| filled)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|row| row.iter().all(|&filled| !filled))
    }

    /// Rows top to bottom
    pub fn rows(&self) -> &[[bool; GRID_WIDTH]; GRID_HEIGHT] {
        &self.cells
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|&c| if c { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
