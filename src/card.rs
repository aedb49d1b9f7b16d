// src/card.rs
// Bingo cards: the grid of squares a player marks, plus random card generation.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::defs::{Coordinate, Number, FIRSTNUMBER, NUMBERS_PER_COLUMN};
use crate::error::{BingoError, Result};
use crate::geometry::BoardGeometry;

/// One cell of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    coordinate: Coordinate,
    number: Option<Number>,
    free: bool,
    marked: bool,
    // Display only, never consulted when matching patterns.
    highlighted: bool,
}

impl Square {
    fn new(coordinate: Coordinate, number: Option<Number>) -> Self {
        Square {
            coordinate,
            number,
            // A square without a number is the free square.
            free: number.is_none(),
            marked: number.is_none(),
            highlighted: false,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn number(&self) -> Option<Number> {
        self.number
    }

    pub fn is_free(&self) -> bool {
        self.free
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

/// A player's card: one square per coordinate of its geometry, stored row-major.
///
/// Deserialization checks that the squares line up with the geometry, since
/// lookups index straight into `squares`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCard")]
pub struct Card {
    geometry: BoardGeometry,
    squares: Vec<Square>,
}

#[derive(Deserialize)]
struct RawCard {
    geometry: BoardGeometry,
    squares: Vec<Square>,
}

impl TryFrom<RawCard> for Card {
    type Error = BingoError;

    fn try_from(raw: RawCard) -> Result<Self> {
        if raw.squares.len() != raw.geometry.len() {
            return Err(BingoError::SquareCountMismatch {
                expected: raw.geometry.len(),
                actual: raw.squares.len(),
            });
        }
        for (index, (expected, square)) in raw.geometry.coordinates().zip(&raw.squares).enumerate() {
            if square.coordinate != expected {
                return Err(BingoError::SquareOutOfPlace { index, expected, found: square.coordinate });
            }
        }
        Ok(Card { geometry: raw.geometry, squares: raw.squares })
    }
}

impl Card {
    /// Card with no numbers and nothing marked.
    pub fn new(geometry: BoardGeometry) -> Self {
        let squares = geometry
            .coordinates()
            .map(|coordinate| Square {
                coordinate,
                number: None,
                free: false,
                marked: false,
                highlighted: false,
            })
            .collect();
        Card { geometry, squares }
    }

    /// Card from row-major numbers; `None` entries become pre-marked free squares.
    pub fn from_numbers(geometry: BoardGeometry, numbers: Vec<Option<Number>>) -> Result<Self> {
        if numbers.len() != geometry.len() {
            return Err(BingoError::SquareCountMismatch {
                expected: geometry.len(),
                actual: numbers.len(),
            });
        }
        let squares = geometry
            .coordinates()
            .zip(numbers)
            .map(|(coordinate, number)| Square::new(coordinate, number))
            .collect();
        Ok(Card { geometry, squares })
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn square_at(&self, coordinate: Coordinate) -> Result<&Square> {
        self.geometry
            .index_of(coordinate)
            .and_then(|index| self.squares.get(index))
            .ok_or(BingoError::SquareNotFound(coordinate))
    }

    pub fn square_at_mut(&mut self, coordinate: Coordinate) -> Result<&mut Square> {
        self.geometry
            .index_of(coordinate)
            .and_then(|index| self.squares.get_mut(index))
            .ok_or(BingoError::SquareNotFound(coordinate))
    }

    pub fn mark(&mut self, coordinate: Coordinate) -> Result<()> {
        self.square_at_mut(coordinate)?.marked = true;
        Ok(())
    }

    pub fn unmark(&mut self, coordinate: Coordinate) -> Result<()> {
        self.square_at_mut(coordinate)?.marked = false;
        Ok(())
    }

    /// Mark every square showing `number`; returns the coordinates that were marked.
    pub fn mark_number(&mut self, number: Number) -> Vec<Coordinate> {
        self.squares
            .iter_mut()
            .filter(|square| square.number == Some(number))
            .map(|square| {
                square.marked = true;
                square.coordinate
            })
            .collect()
    }

    pub fn set_highlighted(&mut self, coordinates: &[Coordinate], on: bool) -> Result<()> {
        for &coordinate in coordinates {
            self.square_at_mut(coordinate)?.highlighted = on;
        }
        Ok(())
    }

    pub fn clear_highlights(&mut self) {
        for square in &mut self.squares {
            square.highlighted = false;
        }
    }

    /// Unmark everything except free squares.
    pub fn reset_marks(&mut self) {
        for square in &mut self.squares {
            square.marked = square.free;
        }
    }

    pub fn marked_count(&self) -> usize {
        self.squares.iter().filter(|square| square.marked).count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CardGenerator {
    free_center: bool,
}

impl CardGenerator {
    pub fn new(free_center: bool) -> Self {
        Self { free_center }
    }

    pub fn generate(&self, geometry: &BoardGeometry) -> Result<Card> {
        self.generate_with_rng(geometry, &mut rand::rng())
    }

    /// Column `k` draws distinct numbers from its own block of `NUMBERS_PER_COLUMN`,
    /// sorted top to bottom.
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, geometry: &BoardGeometry, rng: &mut R) -> Result<Card> {
        let rows = geometry.row_count();
        let cols = geometry.col_count();

        if rows > NUMBERS_PER_COLUMN as usize {
            return Err(BingoError::Numbering {
                message: format!("{rows} rows exceed the {NUMBERS_PER_COLUMN} numbers available per column"),
            });
        }
        let highest = (FIRSTNUMBER as usize - 1) + cols * NUMBERS_PER_COLUMN as usize;
        if highest > Number::MAX as usize {
            return Err(BingoError::Numbering {
                message: format!("{cols} columns need numbers up to {highest}"),
            });
        }

        let mut columns: Vec<Vec<Number>> = Vec::with_capacity(cols);
        for col in 0..cols {
            let start = FIRSTNUMBER + col as Number * NUMBERS_PER_COLUMN;
            let mut pool: Vec<Number> = (start..=start + (NUMBERS_PER_COLUMN - 1)).collect();
            pool.shuffle(rng);
            pool.truncate(rows);
            pool.sort();
            columns.push(pool);
        }

        let center = if self.free_center { geometry.center() } else { None };
        let numbers = geometry
            .coordinates()
            .enumerate()
            .map(|(index, coordinate)| {
                if Some(coordinate) == center {
                    None
                } else {
                    Some(columns[index % cols][index / cols])
                }
            })
            .collect();

        Card::from_numbers(geometry.clone(), numbers)
    }
}
