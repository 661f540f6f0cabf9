//! Level catalog
//!
//! Three fixed difficulty levels. Each bundles grid size, ball speed and
//! canvas/brick geometry.

use serde::{Deserialize, Serialize};

/// Selectable difficulty (the `data-level` index of the level buttons)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse a raw level index; anything outside 0..=2 is rejected
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Difficulty::Easy),
            1 => Some(Difficulty::Medium),
            2 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Catalog lookup (infallible, the enum is the validation)
    pub fn level(&self) -> &'static Level {
        &LEVELS[self.index() as usize]
    }

    /// Status given to a "special" brick on this level, if the level has them.
    /// Special bricks are rolled with a 50% chance per cell.
    pub fn special_status(&self) -> Option<u8> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(2),
            Difficulty::Hard => Some(3),
        }
    }
}

/// Immutable per-level parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    pub rows: usize,
    pub columns: usize,
    /// Ball speed scalar (velocity per axis is `ball_speed * BALL_SPEED_SCALE`)
    pub ball_speed: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_top: f32,
    pub brick_offset_left: f32,
}

impl Level {
    /// Number of bricks in a freshly built grid
    pub fn brick_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Top-left corner of brick `(column, row)`
    pub fn brick_origin(&self, column: usize, row: usize) -> (f32, f32) {
        let x = column as f32 * (self.brick_width + self.brick_padding) + self.brick_offset_left;
        let y = row as f32 * (self.brick_height + self.brick_padding) + self.brick_offset_top;
        (x, y)
    }
}

pub const LEVELS: [Level; 3] = [
    Level {
        rows: 5,
        columns: 5,
        ball_speed: 1.0,
        canvas_width: 500.0,
        canvas_height: 400.0,
        brick_width: 75.0,
        brick_height: 20.0,
        brick_padding: 10.0,
        brick_offset_top: 30.0,
        brick_offset_left: 30.0,
    },
    Level {
        rows: 7,
        columns: 5,
        ball_speed: 1.5,
        canvas_width: 500.0,
        canvas_height: 500.0,
        brick_width: 80.0,
        brick_height: 25.0,
        brick_padding: 10.0,
        brick_offset_top: 40.0,
        brick_offset_left: 30.0,
    },
    Level {
        rows: 9,
        columns: 5,
        ball_speed: 2.0,
        canvas_width: 550.0,
        canvas_height: 650.0,
        brick_width: 90.0,
        brick_height: 30.0,
        brick_padding: 10.0,
        brick_offset_top: 50.0,
        brick_offset_left: 30.0,
    },
];
