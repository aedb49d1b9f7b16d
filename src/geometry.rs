// src/geometry.rs
// Board geometry: the fixed, ordered row and column indices shared by every card.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::defs::{Coordinate, DEFAULT_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::{BingoError, Result};

/// Ordered row and column indices of a card grid.
///
/// Geometry is validated on construction (at least `MIN_BOARD_SIZE` entries
/// per axis, no duplicates) and immutable afterwards. Deserialization goes
/// through the same validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub struct BoardGeometry {
    rows: Vec<i32>,
    cols: Vec<i32>,
}

#[derive(Deserialize)]
struct RawGeometry {
    rows: Vec<i32>,
    cols: Vec<i32>,
}

impl TryFrom<RawGeometry> for BoardGeometry {
    type Error = BingoError;

    fn try_from(raw: RawGeometry) -> Result<Self> {
        BoardGeometry::new(raw.rows, raw.cols)
    }
}

impl BoardGeometry {
    pub fn new(rows: Vec<i32>, cols: Vec<i32>) -> Result<Self> {
        check_axis("rows", &rows)?;
        check_axis("cols", &cols)?;
        Ok(BoardGeometry { rows, cols })
    }

    /// Square board with indices centred on zero, e.g. `-2..=2` for size 5.
    pub fn centered(size: usize) -> Result<Self> {
        let start = -(((size as i32) - 1) / 2);
        let axis: Vec<i32> = (0..size as i32).map(|i| start + i).collect();
        Self::new(axis.clone(), axis)
    }

    /// Square board with indices `0..size`.
    pub fn zero_based(size: usize) -> Result<Self> {
        let axis: Vec<i32> = (0..size as i32).collect();
        Self::new(axis.clone(), axis)
    }

    pub fn rows(&self) -> &[i32] {
        &self.rows
    }

    pub fn cols(&self) -> &[i32] {
        &self.cols
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.index_of(coordinate).is_some()
    }

    /// Row-major position of a coordinate, if it lies on the board.
    pub fn index_of(&self, coordinate: Coordinate) -> Option<usize> {
        let row = self.rows.iter().position(|&r| r == coordinate.row)?;
        let col = self.cols.iter().position(|&c| c == coordinate.col)?;
        Some(row * self.cols.len() + col)
    }

    /// Every coordinate on the board, row by row.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.rows
            .iter()
            .flat_map(move |&row| self.cols.iter().map(move |&col| Coordinate::new(row, col)))
    }

    /// The middle square, only defined when both axes have an odd length.
    pub fn center(&self) -> Option<Coordinate> {
        if self.rows.len() % 2 == 1 && self.cols.len() % 2 == 1 {
            Some(Coordinate::new(self.rows[self.rows.len() / 2], self.cols[self.cols.len() / 2]))
        } else {
            None
        }
    }
}

impl Default for BoardGeometry {
    fn default() -> Self {
        let start = -((DEFAULT_BOARD_SIZE as i32 - 1) / 2);
        let axis: Vec<i32> = (start..start + DEFAULT_BOARD_SIZE as i32).collect();
        BoardGeometry { rows: axis.clone(), cols: axis }
    }
}

fn check_axis(name: &str, axis: &[i32]) -> Result<()> {
    if axis.len() < MIN_BOARD_SIZE {
        return Err(BingoError::InvalidGeometry {
            message: format!("{name} needs at least {MIN_BOARD_SIZE} entries, got {}", axis.len()),
        });
    }
    let mut seen = HashSet::new();
    for value in axis {
        if !seen.insert(value) {
            return Err(BingoError::InvalidGeometry {
                message: format!("{name} contains {value} more than once"),
            });
        }
    }
    Ok(())
}
