//! Core game state and logic
//!
//! [`Engine`] owns every piece of mutable state and is driven by two calls:
//! [`Engine::apply_intent`] for each discrete input and
//! [`Engine::apply_gravity_tick`] at the cadence suggested by
//! [`Engine::fall_time`]. It never reads the clock itself.

use crate::bag::Bag;
use crate::grid::{Grid, GRID_HEIGHT, GRID_WIDTH};
use crate::hold::Hold;
use crate::piece::Piece;
use crate::score::{Award, GravityCurve, Score};
use crate::spin;
use crate::tetromino::{PieceKind, Rotation, RotationDirection};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Engine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Falling,
    Paused,
    /// Terminal until reset
    GameOver,
}

/// Input intents the engine can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
    Reset,
    PauseToggle,
    Quit,
}

impl Intent {
    /// Parse an intent name such as `"move-left"` or `"rotate_cw"`.
    /// Unknown names give `None`.
    pub fn parse(name: &str) -> Option<Intent> {
        let intent = match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "move-left" | "left" => Intent::MoveLeft,
            "move-right" | "right" => Intent::MoveRight,
            "soft-drop" | "soft-drop-step" | "down" => Intent::SoftDrop,
            "hard-drop" | "drop" => Intent::HardDrop,
            "rotate-cw" | "rotate-clockwise" => Intent::RotateCw,
            "rotate-ccw" | "rotate-counterclockwise" => Intent::RotateCcw,
            "hold" => Intent::Hold,
            "reset" => Intent::Reset,
            "pause" | "pause-toggle" => Intent::PauseToggle,
            "quit" => Intent::Quit,
            _ => return None,
        };
        Some(intent)
    }
}

/// Short label describing what just happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ready,
    /// Locked without clearing anything
    Lock,
    LineClear(usize),
    /// Spin credit; carries the bonus on top of the line points
    Spin { lines: usize, bonus: u64 },
    Hold,
    Paused,
    GameOver,
    Quit,
}

impl Status {
    fn from_award(award: &Award) -> Status {
        if award.spin {
            Status::Spin {
                lines: award.lines,
                bonus: award.bonus,
            }
        } else if award.lines > 0 {
            Status::LineClear(award.lines)
        } else {
            Status::Lock
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => f.write_str("READY"),
            Status::Lock => f.write_str("LOCK"),
            Status::LineClear(lines) => write!(f, "{} LINE CLEAR", lines),
            Status::Spin { bonus, .. } => write!(f, "T-SPIN! (+{})", bonus),
            Status::Hold => f.write_str("HOLD"),
            Status::Paused => f.write_str("PAUSED"),
            Status::GameOver => f.write_str("GAME OVER"),
            Status::Quit => f.write_str("QUIT"),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The falling piece as seen by a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
    pub cells: [(i32, i32); 4],
    /// Cells at the landing position
    pub ghost_cells: [(i32, i32); 4],
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub grid: [[bool; GRID_WIDTH]; GRID_HEIGHT],
    pub active: ActiveSnapshot,
    pub held: Option<PieceKind>,
    pub next: PieceKind,
    pub score: u64,
    pub lines: u32,
    pub level: u32,
    pub phase: Phase,
    pub status: Status,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    active: Piece,
    bag: Bag,
    hold: Hold,
    score: Score,
    gravity: GravityCurve,
    phase: Phase,
    status: Status,
    quit: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create a new game with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a deterministic game
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(seed, GravityCurve::default())
    }

    pub fn with_config(seed: u64, gravity: GravityCurve) -> Self {
        let mut bag = Bag::with_seed(seed);
        let first = bag.next();
        debug!(seed, first = %first.letter(), "new game");

        Self {
            grid: Grid::new(),
            active: Piece::spawn(first),
            bag,
            hold: Hold::new(),
            score: Score::new(),
            gravity,
            phase: Phase::Falling,
            status: Status::Ready,
            quit: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.hold.held()
    }

    pub fn next_kind(&self) -> PieceKind {
        self.bag.peek()
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Set once a quit intent has been seen
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Recommended seconds between gravity ticks at the current level
    pub fn fall_time(&self) -> f64 {
        self.gravity.fall_time(self.score.level)
    }

    pub fn fall_duration(&self) -> Duration {
        self.gravity.fall_duration(self.score.level)
    }

    /// Process one intent
    pub fn apply_intent(&mut self, intent: Intent) -> Status {
        match (self.phase, intent) {
            (_, Intent::Reset) => self.reset(),
            (_, Intent::Quit) => {
                self.quit = true;
                self.status = Status::Quit;
            }
            (Phase::Falling, Intent::PauseToggle) => {
                self.phase = Phase::Paused;
                self.status = Status::Paused;
            }
            (Phase::Paused, Intent::PauseToggle) => {
                self.phase = Phase::Falling;
                self.status = Status::Ready;
            }
            (Phase::Falling, intent) => self.play(intent),
            // Paused and game over swallow gameplay
            (Phase::Paused | Phase::GameOver, _) => {}
        }
        self.status
    }

    /// Advance gravity by one row, locking if the piece is resting
    pub fn apply_gravity_tick(&mut self) -> Status {
        if self.phase == Phase::Falling {
            self.step_down();
        }
        self.status
    }

    fn play(&mut self, intent: Intent) {
        match intent {
            Intent::MoveLeft => {
                self.active.move_left(&self.grid);
            }
            Intent::MoveRight => {
                self.active.move_right(&self.grid);
            }
            Intent::SoftDrop => self.step_down(),
            Intent::HardDrop => {
                self.active.hard_drop(&self.grid);
                self.lock_active();
            }
            Intent::RotateCw => {
                self.active.rotate(RotationDirection::Clockwise, &self.grid);
            }
            Intent::RotateCcw => {
                self.active
                    .rotate(RotationDirection::CounterClockwise, &self.grid);
            }
            Intent::Hold => self.hold(),
            Intent::Reset | Intent::PauseToggle | Intent::Quit => {}
        }
    }

    fn step_down(&mut self) {
        if !self.active.move_down(&self.grid) {
            self.lock_active();
        }
    }

    /// Lock, clear, score, spawn
    fn lock_active(&mut self) {
        let spin = spin::is_spin(&self.grid, &self.active);
        self.active.clear_rotated_last();

        if !self.grid.lock(&self.active.cells()) {
            debug!(kind = %self.active.kind.letter(), y = self.active.y, "lock out above the top");
            self.game_over();
            return;
        }

        let cleared = self.grid.clear_lines();
        let award = self.score.record_lock(cleared, spin);
        self.status = Status::from_award(&award);
        debug!(
            kind = %self.active.kind.letter(),
            lines = cleared,
            spin,
            points = award.total(),
            score = self.score.points,
            level = self.score.level,
            "piece locked"
        );

        self.hold.on_lock();
        let next = self.bag.next();
        self.spawn(next);
    }

    /// Put `kind` at the spawn point; a collision there ends the game
    fn spawn(&mut self, kind: PieceKind) {
        self.active = Piece::spawn(kind);
        if self.grid.collides(&self.active.cells()) {
            debug!(kind = %kind.letter(), "spawn blocked");
            self.game_over();
        }
    }

    fn hold(&mut self) {
        let Some(previous) = self.hold.swap(self.active.kind) else {
            return;
        };
        let kind = match previous {
            Some(kind) => kind,
            None => self.bag.next(),
        };
        debug!(held = %self.active.kind.letter(), active = %kind.letter(), "hold");
        self.status = Status::Hold;
        self.spawn(kind);
    }

    fn game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.status = Status::GameOver;
        debug!(score = self.score.points, lines = self.score.lines, "game over");
    }

    /// Start over with an empty grid, fresh bag, zero score and empty hold
    fn reset(&mut self) {
        self.bag.reset();
        let first = self.bag.next();
        self.grid = Grid::new();
        self.active = Piece::spawn(first);
        self.hold = Hold::new();
        self.score = Score::new();
        self.phase = Phase::Falling;
        self.status = Status::Ready;
        self.quit = false;
        debug!(first = %first.letter(), "reset");
    }

    /// Everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        let ghost_y = self.active.ghost_y(&self.grid);
        Snapshot {
            grid: *self.grid.rows(),
            active: ActiveSnapshot {
                kind: self.active.kind,
                rotation: self.active.rotation,
                x: self.active.x,
                y: self.active.y,
                cells: self.active.cells(),
                ghost_cells: self
                    .active
                    .cells_at(self.active.rotation, self.active.x, ghost_y),
            },
            held: self.hold.held(),
            next: self.bag.peek(),
            score: self.score.points,
            lines: self.score.lines,
            level: self.score.level,
            phase: self.phase,
            status: self.status,
        }
    }
}
