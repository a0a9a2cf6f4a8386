//! T-spin detection by corner counting

use crate::grid::{Grid, GRID_HEIGHT, GRID_WIDTH};
use crate::piece::Piece;

/// Corners needed for spin credit
const MIN_BLOCKED_CORNERS: usize = 3;

/// Spin credit for a piece about to lock at its current position.
///
/// Only a T whose last successful move was a rotation qualifies, and then
/// only if at least three of the four diagonal neighbours of its box centre
/// are blocked. No mini/full distinction is made.
pub fn is_spin(grid: &Grid, piece: &Piece) -> bool {
    if !piece.is_t_piece() || !piece.rotated_last() {
        return false;
    }
    blocked_corners(grid, piece) >= MIN_BLOCKED_CORNERS
}

/// Number of blocked diagonal cells around the centre of the 3x3 box
pub fn blocked_corners(grid: &Grid, piece: &Piece) -> usize {
    let (cx, cy) = (piece.x + 1, piece.y + 1);
    [(cx - 1, cy - 1), (cx + 1, cy - 1), (cx - 1, cy + 1), (cx + 1, cy + 1)]
        .iter()
        .filter(|&&(x, y)| is_blocked(grid, x, y))
        .count()
}

/// Walls and the floor block; the margin above the top does not
fn is_blocked(grid: &Grid, x: i32, y: i32) -> bool {
    if x < 0 || x >= GRID_WIDTH as i32 || y >= GRID_HEIGHT as i32 {
        return true;
    }
    if y < 0 {
        return false;
    }
    grid.get(x, y).unwrap_or(true)
}
