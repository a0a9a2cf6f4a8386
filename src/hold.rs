//! Hold slot: set the active piece aside once per lock cycle

use crate::tetromino::PieceKind;

/// Held kind plus the once-per-lock allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hold {
    held: Option<PieceKind>,
    can_hold: bool,
}

impl Default for Hold {
    fn default() -> Self {
        Self::new()
    }
}

impl Hold {
    pub fn new() -> Self {
        Self {
            held: None,
            can_hold: true,
        }
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Put `active` in the slot and hand back what was there before.
    ///
    /// Returns `None` when holding is not allowed right now, otherwise
    /// `Some(previous)` where `previous` is `None` on the first hold. The
    /// caller is responsible for drawing a fresh kind in that case.
    pub fn swap(&mut self, active: PieceKind) -> Option<Option<PieceKind>> {
        if !self.can_hold {
            return None;
        }
        self.can_hold = false;
        Some(self.held.replace(active))
    }

    /// Re-arm after a successful lock
    pub fn on_lock(&mut self) {
        self.can_hold = true;
    }
}
