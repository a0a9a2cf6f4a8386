//! Scoring, level progression and the gravity curve

use std::time::Duration;

/// Seconds per gravity step at level 1
pub const BASE_FALL: f64 = 0.85;
/// Gravity never gets faster than this
pub const MIN_FALL: f64 = 0.15;
/// Each level multiplies the interval by this factor
pub const FALL_DECAY: f64 = 0.92;

/// Lines per level
const LINES_PER_LEVEL: u32 = 10;

/// Base points for clearing `lines` rows at once
pub fn line_clear_points(lines: usize) -> u64 {
    match lines {
        1 => 100,
        2 => 300,
        3 => 500,
        4 => 800,
        _ => 0,
    }
}

/// Extra points when the lock earned spin credit, on top of the base
pub fn spin_bonus(lines: usize) -> u64 {
    match lines {
        0 => 400,
        1 => 800,
        2 => 1200,
        _ => 1600,
    }
}

/// Points granted by one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Award {
    pub lines: usize,
    pub base: u64,
    /// Zero unless the lock was a spin
    pub bonus: u64,
    pub spin: bool,
}

impl Award {
    pub fn total(&self) -> u64 {
        self.base + self.bonus
    }
}

/// Score tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
    /// Current level, always `1 + lines / 10`
    pub level: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            lines: 0,
            level: 1,
        }
    }

    /// Credit one lock that cleared `lines` rows
    pub fn record_lock(&mut self, lines: usize, spin: bool) -> Award {
        let award = Award {
            lines,
            base: line_clear_points(lines),
            bonus: if spin { spin_bonus(lines) } else { 0 },
            spin,
        };

        self.points += award.total();
        self.lines += lines as u32;
        self.level = level_for(self.lines);
        award
    }
}

/// Level reached after clearing `lines` in total
pub fn level_for(lines: u32) -> u32 {
    1 + lines / LINES_PER_LEVEL
}

/// Exponential gravity curve, floored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityCurve {
    pub base_fall: f64,
    pub min_fall: f64,
}

impl Default for GravityCurve {
    fn default() -> Self {
        Self {
            base_fall: BASE_FALL,
            min_fall: MIN_FALL,
        }
    }
}

impl GravityCurve {
    /// Seconds between gravity steps at `level`
    pub fn fall_time(&self, level: u32) -> f64 {
        let steps = level.saturating_sub(1).min(i32::MAX as u32) as i32;
        (self.base_fall * FALL_DECAY.powi(steps)).max(self.min_fall)
    }

    pub fn fall_duration(&self, level: u32) -> Duration {
        Duration::from_secs_f64(self.fall_time(level))
    }
}
