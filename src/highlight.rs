// src/highlight.rs
// Step-by-step highlighting of a pattern's groups on a card.
//
// Each group is lit, held, cleared, held again, and then the next group
// follows. The sequence only flips highlight flags and reports how long the
// caller should hold the current frame; pacing is up to the caller's loop.

use std::time::Duration;

use crate::card::Card;
use crate::defs::{Coordinate, DEFAULT_HIGHLIGHT_OFF_MS, DEFAULT_HIGHLIGHT_ON_MS};
use crate::error::Result;
use crate::geometry::BoardGeometry;
use crate::pattern::Pattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightTiming {
    pub on: Duration,
    pub off: Duration,
}

impl Default for HighlightTiming {
    fn default() -> Self {
        Self {
            on: Duration::from_millis(DEFAULT_HIGHLIGHT_ON_MS),
            off: Duration::from_millis(DEFAULT_HIGHLIGHT_OFF_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightStep {
    pub group: Vec<Coordinate>,
    pub highlighted: bool,
    pub hold: Duration,
}

#[derive(Debug, Clone)]
pub struct HighlightSequence {
    pattern: Pattern,
    geometry: BoardGeometry,
    timing: HighlightTiming,
    repeat: bool,
    winners_only: bool,
    next: usize,
    lit: Option<Vec<Coordinate>>,
}

impl HighlightSequence {
    pub fn new(pattern: Pattern, geometry: &BoardGeometry, timing: HighlightTiming) -> Result<Self> {
        pattern.validate(geometry)?;
        Ok(Self {
            pattern,
            geometry: geometry.clone(),
            timing,
            repeat: false,
            winners_only: false,
            next: 0,
            lit: None,
        })
    }

    /// Start over from the first group after the last one.
    pub fn repeating(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    /// Skip groups that are not fully marked on the card.
    pub fn winners_only(mut self, winners_only: bool) -> Self {
        self.winners_only = winners_only;
        self
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Advance one frame. `None` means there is nothing left to show.
    pub fn next_step(&mut self, card: &mut Card) -> Result<Option<HighlightStep>> {
        if let Some(group) = self.lit.take() {
            card.set_highlighted(&group, false)?;
            return Ok(Some(HighlightStep {
                group,
                highlighted: false,
                hold: self.timing.off,
            }));
        }

        let count = self.pattern.group_count(&self.geometry);
        // At most one full pass, so a repeating sequence with no eligible
        // group still terminates.
        for _ in 0..count {
            if self.next >= count {
                if !self.repeat {
                    return Ok(None);
                }
                self.next = 0;
            }
            let Some(group) = self.pattern.group(&self.geometry, self.next) else {
                break;
            };
            self.next += 1;

            if self.winners_only && !fully_marked(card, &group)? {
                continue;
            }
            card.set_highlighted(&group, true)?;
            self.lit = Some(group.clone());
            return Ok(Some(HighlightStep {
                group,
                highlighted: true,
                hold: self.timing.on,
            }));
        }
        Ok(None)
    }

    /// Clear whatever group is currently lit.
    pub fn stop(&mut self, card: &mut Card) -> Result<()> {
        if let Some(group) = self.lit.take() {
            card.set_highlighted(&group, false)?;
        }
        Ok(())
    }
}

fn fully_marked(card: &Card, group: &[Coordinate]) -> Result<bool> {
    for &coordinate in group {
        if !card.square_at(coordinate)?.is_marked() {
            return Ok(false);
        }
    }
    Ok(true)
}
