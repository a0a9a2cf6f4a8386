//! Super Rotation System (SRS) wall kick data
//!
//! SRS defines the wall kicks attempted when rotating a piece.
//! If a rotation would cause collision, these offsets are tried in order.
//! Offsets are (dx, dy) with y growing downward, so the guideline's
//! upward kicks appear here with a negative dy.

use crate::tetromino::{PieceKind, Rotation};

/// A candidate (dx, dy) nudge
pub type Offset = (i32, i32);

/// Five candidates per transition, identity first
type KickRow = [Offset; 5];

/// Eight rows per table, one per adjacent transition, laid out as
/// `[0→R, 0→L, R→2, R→0, 2→L, 2→R, L→0, L→2]`
type KickTable = [KickRow; 8];

/// Which kick table a kind rotates with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickClass {
    I,
    T,
    /// O, S, Z, J and L. O never leaves its first candidate because all of
    /// its states share one shape.
    Standard,
}

impl KickClass {
    pub fn of(kind: PieceKind) -> KickClass {
        match kind {
            PieceKind::I => KickClass::I,
            PieceKind::T => KickClass::T,
            _ => KickClass::Standard,
        }
    }

    fn table(&self) -> &'static KickTable {
        match self {
            KickClass::I => &I_KICKS,
            KickClass::T => &T_KICKS,
            KickClass::Standard => &STANDARD_KICKS,
        }
    }
}

/// Ordered kick candidates for rotating `kind` from `from` to `to`.
///
/// Only quarter turns have kick data; any other pair yields the identity
/// offset alone.
pub fn get_wall_kicks(kind: PieceKind, from: Rotation, to: Rotation) -> &'static [Offset] {
    let Some(slot) = transition_slot(from, to) else {
        return &[(0, 0)];
    };
    &KickClass::of(kind).table()[slot]
}

fn transition_slot(from: Rotation, to: Rotation) -> Option<usize> {
    let base = from.index() * 2;
    if to == from.cw() {
        Some(base)
    } else if to == from.ccw() {
        Some(base + 1)
    } else {
        None
    }
}

const STANDARD_KICKS: KickTable = [
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)], // 0→R
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],    // 0→L
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],   // R→2
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],   // R→0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],    // 2→L
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)], // 2→R
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)], // L→0
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)], // L→2
];

// Guideline T kicks coincide with the standard set.
const T_KICKS: KickTable = STANDARD_KICKS;

const I_KICKS: KickTable = [
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)], // 0→R
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)], // 0→L
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)], // R→2
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)], // R→0
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)], // 2→L
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)], // 2→R
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)], // L→0
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)], // L→2
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::piece::Piece;
    use crate::tetromino::RotationDirection;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[test]
    fn test_kick_count() {
        // Every quarter turn, including the 3→0 and 0→3 wraps, has five kicks
        for piece in PieceKind::all() {
            for from in ROTATIONS {
                assert_eq!(get_wall_kicks(piece, from, from.cw()).len(), 5);
                assert_eq!(get_wall_kicks(piece, from, from.ccw()).len(), 5);
            }
        }
    }

    #[test]
    fn test_first_kick_is_identity() {
        // First kick attempt should always be (0, 0) - no offset
        for piece in PieceKind::all() {
            for from in ROTATIONS {
                for to in ROTATIONS {
                    assert_eq!(get_wall_kicks(piece, from, to)[0], (0, 0));
                }
            }
        }
    }

    #[test]
    fn test_reverse_transition_negates_offsets() {
        for piece in PieceKind::all() {
            for from in ROTATIONS {
                let forward = get_wall_kicks(piece, from, from.cw());
                let back = get_wall_kicks(piece, from.cw(), from);
                for (f, b) in forward.iter().zip(back) {
                    assert_eq!((f.0, f.1), (-b.0, -b.1), "{:?} {:?}", piece, from);
                }
            }
        }
    }

    #[test]
    fn test_class_mapping() {
        assert_eq!(KickClass::of(PieceKind::I), KickClass::I);
        assert_eq!(KickClass::of(PieceKind::T), KickClass::T);
        for kind in [PieceKind::O, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
            assert_eq!(KickClass::of(kind), KickClass::Standard);
        }
    }

    #[test]
    fn test_half_turn_has_only_identity() {
        assert_eq!(
            get_wall_kicks(PieceKind::T, Rotation::North, Rotation::South),
            &[(0, 0)]
        );
    }

    #[test]
    fn test_i_kicks_off_right_wall() {
        let grid = Grid::new();
        // Vertical I in the last column: South would reach x = 10
        let mut piece = Piece::at(PieceKind::I, Rotation::East, 7, 8);
        assert!(piece.rotate(RotationDirection::Clockwise, &grid));
        assert_eq!((piece.rotation, piece.x, piece.y), (Rotation::South, 6, 8));
        assert_eq!(piece.cells().iter().map(|&(x, _)| x).max(), Some(9));
    }

    #[test]
    fn test_i_kicks_off_left_wall() {
        let grid = Grid::new();
        // Vertical I in column 0: South would start at x = -1
        let mut piece = Piece::at(PieceKind::I, Rotation::West, -1, 8);
        assert!(piece.rotate(RotationDirection::CounterClockwise, &grid));
        assert_eq!((piece.rotation, piece.x, piece.y), (Rotation::South, 0, 8));
    }
}
