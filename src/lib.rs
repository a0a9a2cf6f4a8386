//! E60TRIS - a falling-block puzzle engine
//!
//! The library is the deterministic game-state machine: grid, piece catalog,
//! SRS kicks, spin detection, 7-bag randomizer, hold, scoring and gravity.
//! It does no rendering, reads no input devices and never looks at the
//! clock. Drive an [`Engine`] with [`Intent`]s and gravity ticks and draw its
//! [`Snapshot`].

pub mod bag;
pub mod game;
pub mod grid;
pub mod hold;
pub mod piece;
pub mod score;
pub mod settings;
pub mod spin;
pub mod srs;
pub mod tetromino;

pub use game::{Engine, Intent, Phase, Snapshot, Status};
pub use tetromino::{PieceKind, Rotation, RotationDirection};
