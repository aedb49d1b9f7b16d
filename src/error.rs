// src/error.rs
// Error type shared by the geometry, card and pattern modules.

use thiserror::Error;

use crate::defs::Coordinate;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BingoError {
    #[error("Invalid board geometry: {message}")]
    InvalidGeometry { message: String },

    #[error("No square at {0} on this card")]
    SquareNotFound(Coordinate),

    #[error("Pattern '{pattern}' references {coordinate}, which is not on the board")]
    PatternMismatch { pattern: String, coordinate: Coordinate },

    #[error("Pattern '{pattern}' produces an empty offset group (group {group}) on this board")]
    DegenerateGroup { pattern: String, group: usize },

    #[error("Card expects {expected} squares, got {actual}")]
    SquareCountMismatch { expected: usize, actual: usize },

    #[error("Square {index} of the card is at {found}, expected {expected}")]
    SquareOutOfPlace { index: usize, expected: Coordinate, found: Coordinate },

    #[error("Cannot number card: {message}")]
    Numbering { message: String },

    #[error("Unknown pattern '{0}'")]
    UnknownPattern(String),

    #[error("Invalid coordinate '{0}', expected 'row,col'")]
    InvalidCoordinate(String),
}

pub type Result<T> = std::result::Result<T, BingoError>;
