// src/matcher.rs
// Win detection: resolves pattern offset groups to the squares of a card and
// decides which patterns a card currently satisfies.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::card::{Card, Square};
use crate::defs::Coordinate;
use crate::error::Result;
use crate::geometry::BoardGeometry;
use crate::pattern::{OffsetGroups, Pattern};

/// Evaluates winning patterns against cards sharing one board geometry.
///
/// Every registered pattern is validated against the geometry up front, so a
/// pattern that names a square the board doesn't have, or that produces an
/// empty group, is a construction error rather than a surprise mid-game.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    geometry: BoardGeometry,
    patterns: Vec<Pattern>,
}

/// Per-pattern outcome for one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternReport {
    pub pattern: Pattern,
    pub satisfied: bool,
    pub winning_groups: Vec<Vec<Coordinate>>,
}

impl PatternMatcher {
    pub fn new(geometry: BoardGeometry, patterns: Vec<Pattern>) -> Result<Self> {
        let mut registered: Vec<Pattern> = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            pattern.validate(&geometry)?;
            if !registered.contains(&pattern) {
                registered.push(pattern);
            }
        }
        Ok(PatternMatcher { geometry, patterns: registered })
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Lazily resolve each offset group of `pattern` to the squares of `card`.
    ///
    /// A pattern that doesn't fit the geometry is rejected before anything is
    /// enumerated. A coordinate missing from the card yields an error item for
    /// that group.
    pub fn match_groups<'m, 'c>(&'m self, pattern: Pattern, card: &'c Card) -> Result<MatchGroups<'m, 'c>> {
        self.ensure_valid(pattern)?;
        Ok(MatchGroups {
            groups: pattern.offset_groups(&self.geometry),
            card,
        })
    }

    /// True as soon as one group has every square marked.
    pub fn is_satisfied(&self, pattern: Pattern, card: &Card) -> Result<bool> {
        for group in self.match_groups(pattern, card)? {
            if group?.iter().all(|square| square.is_marked()) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn all_satisfied_patterns(&self, patterns: &[Pattern], card: &Card) -> Result<BTreeSet<Pattern>> {
        let mut satisfied = BTreeSet::new();
        for &pattern in patterns {
            if self.is_satisfied(pattern, card)? {
                satisfied.insert(pattern);
            }
        }
        Ok(satisfied)
    }

    /// Satisfied patterns among those registered with this matcher.
    pub fn winning_patterns(&self, card: &Card) -> Result<BTreeSet<Pattern>> {
        self.all_satisfied_patterns(&self.patterns, card)
    }

    /// Coordinates of every fully marked group of `pattern`.
    pub fn winning_groups(&self, pattern: Pattern, card: &Card) -> Result<Vec<Vec<Coordinate>>> {
        let mut winners = Vec::new();
        for group in self.match_groups(pattern, card)? {
            let squares = group?;
            if squares.iter().all(|square| square.is_marked()) {
                winners.push(squares.iter().map(|square| square.coordinate()).collect());
            }
        }
        Ok(winners)
    }

    pub fn report(&self, card: &Card) -> Result<Vec<PatternReport>> {
        self.patterns
            .iter()
            .map(|&pattern| {
                let winning_groups = self.winning_groups(pattern, card)?;
                Ok(PatternReport {
                    pattern,
                    satisfied: !winning_groups.is_empty(),
                    winning_groups,
                })
            })
            .collect()
    }

    fn ensure_valid(&self, pattern: Pattern) -> Result<()> {
        if self.patterns.contains(&pattern) {
            Ok(())
        } else {
            pattern.validate(&self.geometry)
        }
    }
}

/// Lazy sequence of square groups for one pattern on one card.
pub struct MatchGroups<'m, 'c> {
    groups: OffsetGroups<'m>,
    card: &'c Card,
}

impl<'c> Iterator for MatchGroups<'_, 'c> {
    type Item = Result<Vec<&'c Square>>;

    fn next(&mut self) -> Option<Self::Item> {
        let offsets = self.groups.next()?;
        Some(offsets.into_iter().map(|coordinate| self.card.square_at(coordinate)).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.groups.size_hint()
    }
}
