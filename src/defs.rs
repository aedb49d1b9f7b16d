// src/defs.rs
// Shared definitions: card coordinates, numbering constants and defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BingoError;

pub type Number = u8;

pub const MIN_BOARD_SIZE: usize = 3;
pub const DEFAULT_BOARD_SIZE: usize = 5;

// Each card column draws from its own block of numbers: B 1-15, I 16-30, ...
pub const NUMBERS_PER_COLUMN: Number = 15;
pub const FIRSTNUMBER: Number = 1;

pub const DEFAULT_HIGHLIGHT_ON_MS: u64 = 100;
pub const DEFAULT_HIGHLIGHT_OFF_MS: u64 = 10;

/// A square position on a card, expressed in the board's own row/column indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    pub const fn new(row: i32, col: i32) -> Self {
        Coordinate { row, col }
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, col): (i32, i32)) -> Self {
        Coordinate { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// Accepts "row,col" with optional surrounding parentheses and spaces.
impl FromStr for Coordinate {
    type Err = BingoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, col) = trimmed
            .split_once(',')
            .ok_or_else(|| BingoError::InvalidCoordinate(s.to_string()))?;
        let row = row.trim().parse::<i32>().map_err(|_| BingoError::InvalidCoordinate(s.to_string()))?;
        let col = col.trim().parse::<i32>().map_err(|_| BingoError::InvalidCoordinate(s.to_string()))?;
        Ok(Coordinate { row, col })
    }
}
