//! Active falling piece logic

use crate::grid::Grid;
use crate::srs::get_wall_kicks;
use crate::tetromino::{PieceKind, Rotation, RotationDirection};
use tracing::trace;

/// Anchor column every piece spawns at
pub const SPAWN_X: i32 = 3;
/// Anchor row every piece spawns at, one row into the margin above the field
pub const SPAWN_Y: i32 = -1;

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub kind: PieceKind,
    /// Current rotation state
    pub rotation: Rotation,
    /// Top-left corner of the catalog matrix on the grid
    pub x: i32,
    pub y: i32,
    /// Set by a successful rotation, cleared by any successful translation.
    /// Read at lock time for spin credit.
    rotated_last: bool,
}

impl Piece {
    /// Create a new piece at spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self::at(kind, Rotation::North, SPAWN_X, SPAWN_Y)
    }

    /// Create a piece at an explicit state and anchor
    pub fn at(kind: PieceKind, rotation: Rotation, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
            rotated_last: false,
        }
    }

    /// Absolute (x, y) of all 4 blocks
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.cells_at(self.rotation, self.x, self.y)
    }

    /// Absolute cells this piece would cover in another state/anchor
    pub fn cells_at(&self, rotation: Rotation, x: i32, y: i32) -> [(i32, i32); 4] {
        self.kind.cells(rotation).map(|(dx, dy)| (x + dx, y + dy))
    }

    /// Whether the last successful move was a rotation
    pub fn rotated_last(&self) -> bool {
        self.rotated_last
    }

    /// Forget the rotation credit (on lock)
    pub fn clear_rotated_last(&mut self) {
        self.rotated_last = false;
    }

    /// Try to shift by (dx, dy), returns true if successful
    pub fn translate(&mut self, dx: i32, dy: i32, grid: &Grid) -> bool {
        let (x, y) = (self.x + dx, self.y + dy);
        if grid.collides(&self.cells_at(self.rotation, x, y)) {
            return false;
        }
        self.x = x;
        self.y = y;
        self.rotated_last = false;
        true
    }

    pub fn move_left(&mut self, grid: &Grid) -> bool {
        self.translate(-1, 0, grid)
    }

    pub fn move_right(&mut self, grid: &Grid) -> bool {
        self.translate(1, 0, grid)
    }

    pub fn move_down(&mut self, grid: &Grid) -> bool {
        self.translate(0, 1, grid)
    }

    /// Try to rotate, using SRS wall kicks. The first candidate offset that
    /// fits wins; if none fits nothing changes.
    pub fn rotate(&mut self, direction: RotationDirection, grid: &Grid) -> bool {
        let target = self.rotation.rotate(direction);

        for (kick_idx, &(dx, dy)) in get_wall_kicks(self.kind, self.rotation, target)
            .iter()
            .enumerate()
        {
            let (x, y) = (self.x + dx, self.y + dy);
            if !grid.collides(&self.cells_at(target, x, y)) {
                trace!(
                    kind = %self.kind.letter(),
                    from = self.rotation.index(),
                    to = target.index(),
                    kick = kick_idx,
                    "rotation accepted"
                );
                self.rotation = target;
                self.x = x;
                self.y = y;
                self.rotated_last = true;
                return true;
            }
        }

        false
    }

    /// Move down as far as possible and return distance dropped
    pub fn hard_drop(&mut self, grid: &Grid) -> u32 {
        let mut distance = 0;
        while self.move_down(grid) {
            distance += 1;
        }
        distance
    }

    /// Row the anchor would come to rest on if dropped now
    pub fn ghost_y(&self, grid: &Grid) -> i32 {
        let mut y = self.y;
        while !grid.collides(&self.cells_at(self.rotation, self.x, y + 1)) {
            y += 1;
        }
        y
    }

    /// Check if this is a T piece (for spin detection)
    pub fn is_t_piece(&self) -> bool {
        matches!(self.kind, PieceKind::T)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lowest_row(piece: &Piece) -> i32 {
        piece.cells().iter().map(|&(_, y)| y).max().unwrap()
    }

    #[test]
    fn test_spawn_position() {
        let piece = Piece::spawn(PieceKind::T);
        assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(piece.rotation, Rotation::North);
        assert!(!piece.rotated_last());
    }

    #[test]
    fn test_spawn_fits_empty_grid() {
        let grid = Grid::new();
        for kind in PieceKind::all() {
            assert!(!grid.collides(&Piece::spawn(kind).cells()), "{:?}", kind);
        }
    }

    #[test]
    fn test_move_down() {
        let grid = Grid::new();
        let mut piece = Piece::spawn(PieceKind::T);
        assert!(piece.move_down(&grid));
        assert_eq!(piece.y, SPAWN_Y + 1);
    }

    #[test]
    fn test_walls_stop_translation() {
        let grid = Grid::new();
        let mut piece = Piece::spawn(PieceKind::O);
        while piece.move_left(&grid) {}
        assert_eq!(piece.cells().iter().map(|&(x, _)| x).min(), Some(0));
        let x = piece.x;
        assert!(!piece.move_left(&grid));
        assert_eq!(piece.x, x);
    }

    #[test]
    fn test_hard_drop_lands_on_floor() {
        let grid = Grid::new();
        for kind in PieceKind::all() {
            let mut piece = Piece::spawn(kind);
            let ghost = piece.ghost_y(&grid);
            let distance = piece.hard_drop(&grid);
            assert!(distance > 0);
            assert_eq!(piece.y, ghost);
            assert_eq!(lowest_row(&piece), 19, "{:?}", kind);
            assert_eq!(piece.rotation, Rotation::North);
        }
    }

    #[test]
    fn test_four_rotations_round_trip() {
        let grid = Grid::new();
        for kind in PieceKind::all() {
            for direction in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
                let mut piece = Piece::spawn(kind);
                for _ in 0..5 {
                    piece.move_down(&grid);
                }
                let start = piece.clone();
                for _ in 0..4 {
                    assert!(piece.rotate(direction, &grid));
                }
                assert_eq!(piece.rotation, start.rotation);
                assert_eq!((piece.x, piece.y), (start.x, start.y));
                assert_eq!(piece.cells(), start.cells());
            }
        }
    }

    #[test]
    fn test_rotation_flag_set_by_rotate_cleared_by_move() {
        let grid = Grid::new();
        let mut piece = Piece::spawn(PieceKind::T);
        piece.move_down(&grid);
        assert!(piece.rotate(RotationDirection::Clockwise, &grid));
        assert!(piece.rotated_last());
        assert!(piece.move_left(&grid));
        assert!(!piece.rotated_last());
    }

    #[test]
    fn test_rejected_rotation_changes_nothing() {
        let mut grid = Grid::new();
        // Box an I piece into a one-row tunnel so no kick can stand it up
        for x in 0..10 {
            grid.set(x, 9, true);
            grid.set(x, 11, true);
        }
        for x in 7..10 {
            grid.set(x, 10, true);
        }
        let mut piece = Piece::at(PieceKind::I, Rotation::North, 0, 9);
        assert!(!grid.collides(&piece.cells()));
        assert!(!piece.rotate(RotationDirection::Clockwise, &grid));
        assert_eq!(piece, Piece::at(PieceKind::I, Rotation::North, 0, 9));
    }

    #[test]
    fn test_rejected_rotation_keeps_rotation_flag() {
        let mut grid = Grid::new();
        let mut piece = Piece::at(PieceKind::T, Rotation::North, 3, 8);
        assert!(piece.rotate(RotationDirection::Clockwise, &grid));
        assert!(piece.rotated_last());

        // Wall the piece in on every side so no other shape fits
        let cells = piece.cells();
        for x in 0..10 {
            for y in 0..20 {
                if !cells.contains(&(x, y)) {
                    grid.set(x, y, true);
                }
            }
        }
        let before = piece.clone();
        assert!(!piece.rotate(RotationDirection::Clockwise, &grid));
        assert!(!piece.rotate(RotationDirection::CounterClockwise, &grid));
        assert_eq!(piece, before);
        assert!(piece.rotated_last());
    }

    #[test]
    fn test_wall_kick_picks_first_fitting_offset() {
        let grid = Grid::new();
        // East-facing T hugging the left wall: South would poke out at x = -1
        let start = Piece::at(PieceKind::T, Rotation::East, -1, 8);
        assert!(!grid.collides(&start.cells()));

        for _ in 0..3 {
            let mut piece = start.clone();
            assert!(piece.rotate(RotationDirection::Clockwise, &grid));
            assert_eq!(piece.rotation, Rotation::South);
            // R→2 second candidate is (+1, 0)
            assert_eq!((piece.x, piece.y), (0, 8));
            assert!(piece.rotated_last());
        }
    }
}
