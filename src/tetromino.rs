//! Tetromino catalog: the seven kinds and their four rotation states
//!
//! Every (kind, rotation) pair maps to a hand-authored occupancy matrix.
//! Rotating never transforms a matrix, it only moves to another index, so
//! shapes stay bit-exact no matter how often a piece spins.

use serde::Serialize;

/// The 7 tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    I, // long bar
    O, // square
    T,
    S,
    Z,
    J,
    L,
}

/// A square occupancy matrix, padded to 4x4. Only the top-left
/// `box_size() x box_size()` region is meaningful.
pub type Matrix = [[u8; 4]; 4];

impl PieceKind {
    /// All kinds, in bag order before shuffling
    pub fn all() -> [PieceKind; 7] {
        [
            PieceKind::I,
            PieceKind::O,
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::J,
            PieceKind::L,
        ]
    }

    /// Side length of the bounding box the matrices are authored in
    pub fn box_size(&self) -> i32 {
        match self {
            PieceKind::I | PieceKind::O => 4,
            _ => 3,
        }
    }

    /// Occupancy matrix for this kind at `rotation`, indexed `[row][col]`
    pub fn matrix(&self, rotation: Rotation) -> &'static Matrix {
        let table = match self {
            PieceKind::I => &I_STATES,
            PieceKind::O => &O_STATES,
            PieceKind::T => &T_STATES,
            PieceKind::S => &S_STATES,
            PieceKind::Z => &Z_STATES,
            PieceKind::J => &J_STATES,
            PieceKind::L => &L_STATES,
        };
        &table[rotation.index()]
    }

    /// The four occupied (x, y) offsets relative to the matrix's top-left
    /// corner, in row-major order
    pub fn cells(&self, rotation: Rotation) -> [(i32, i32); 4] {
        let matrix = self.matrix(rotation);
        let mut cells = [(0, 0); 4];
        let mut n = 0;
        for (y, row) in matrix.iter().enumerate() {
            for (x, &filled) in row.iter().enumerate() {
                if filled != 0 && n < 4 {
                    cells[n] = (x as i32, y as i32);
                    n += 1;
                }
            }
        }
        debug_assert_eq!(n, 4, "{:?} {:?} must have exactly four cells", self, rotation);
        cells
    }

    /// One-letter name, used for logs and parsing
    pub fn letter(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

/// Rotation states (SRS naming convention), index 0..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Rotation {
    #[default]
    North, // Spawn state
    East,  // Clockwise from North
    South, // 180 from North
    West,  // Counter-clockwise from North
}

impl Rotation {
    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(&self) -> Rotation {
        Rotation::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise: North → West → South → East → North
    pub fn ccw(&self) -> Rotation {
        Rotation::from_index(self.index() + 3)
    }

    pub fn rotate(&self, direction: RotationDirection) -> Rotation {
        match direction {
            RotationDirection::Clockwise => self.cw(),
            RotationDirection::CounterClockwise => self.ccw(),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Wraps modulo 4
    pub fn from_index(index: usize) -> Rotation {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

// Guideline shapes, row 0 at the top.

const I_STATES: [Matrix; 4] = [
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]],
    [[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
];

const O_SHAPE: Matrix = [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
const O_STATES: [Matrix; 4] = [O_SHAPE; 4];

const T_STATES: [Matrix; 4] = [
    [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

const S_STATES: [Matrix; 4] = [
    [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    [[1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

const Z_STATES: [Matrix; 4] = [
    [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
];

const J_STATES: [Matrix; 4] = [
    [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
];

const L_STATES: [Matrix; 4] = [
    [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
    [[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];
