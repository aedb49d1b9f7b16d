// lib.rs
// Library modules for bingo pattern matching

pub mod defs;
pub mod error;
pub mod geometry;
pub mod card;
pub mod pattern;
pub mod matcher;
pub mod highlight;
pub mod config;
pub mod logging;
pub mod terminal;

pub use card::{Card, CardGenerator, Square};
pub use defs::Coordinate;
pub use error::{BingoError, Result};
pub use geometry::BoardGeometry;
pub use matcher::{PatternMatcher, PatternReport};
pub use pattern::Pattern;
