// src/pattern.rs
// Winning patterns and the offset groups that satisfy them.
//
// A pattern is a fixed rule over the board geometry. Each offset group is one
// ordered set of coordinates that wins the pattern when every square in it is
// marked. Groups are produced lazily, one at a time, and every call to
// `offset_groups` starts a fresh enumeration.

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::defs::Coordinate;
use crate::error::{BingoError, Result};
use crate::geometry::BoardGeometry;

// Rows/columns trimmed from the far edge by the stamp blocks.
const STAMP_EDGE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    /// The four corner squares.
    Corners,
    /// Any full row, full column or either diagonal.
    Lines,
    /// Every square on the card.
    Coverall,
    /// The interior block, without the outer ring.
    Center,
    /// A block in any one corner.
    Stamp,
}

impl Pattern {
    pub const ALL: [Pattern; 5] = [
        Pattern::Corners,
        Pattern::Lines,
        Pattern::Coverall,
        Pattern::Center,
        Pattern::Stamp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Corners => "corners",
            Pattern::Lines => "lines",
            Pattern::Coverall => "coverall",
            Pattern::Center => "center",
            Pattern::Stamp => "stamp",
        }
    }

    /// Number of offset groups this pattern produces on `geometry`.
    pub fn group_count(&self, geometry: &BoardGeometry) -> usize {
        match self {
            Pattern::Corners | Pattern::Coverall | Pattern::Center => 1,
            Pattern::Lines => geometry.row_count() + geometry.col_count() + 2,
            Pattern::Stamp => 4,
        }
    }

    /// Raw coordinate groups for `geometry`, unchecked: groups may be empty or
    /// run off the board. Run `validate` first, or go through `PatternMatcher`.
    pub fn offset_groups<'g>(&self, geometry: &'g BoardGeometry) -> OffsetGroups<'g> {
        OffsetGroups {
            pattern: *self,
            geometry,
            next: 0,
            count: self.group_count(geometry),
        }
    }

    /// The `index`-th offset group, or `None` past the last one.
    pub fn group(&self, geometry: &BoardGeometry, index: usize) -> Option<Vec<Coordinate>> {
        if index >= self.group_count(geometry) {
            return None;
        }
        let rows = geometry.rows();
        let cols = geometry.cols();

        let group = match self {
            Pattern::Corners => {
                let (r0, rn) = (rows[0], rows[rows.len() - 1]);
                let (c0, cn) = (cols[0], cols[cols.len() - 1]);
                vec![
                    Coordinate::new(r0, c0),
                    Coordinate::new(r0, cn),
                    Coordinate::new(rn, c0),
                    Coordinate::new(rn, cn),
                ]
            }
            Pattern::Lines => line_group(rows, cols, index),
            Pattern::Coverall => block(rows, cols),
            Pattern::Center => block(inner(rows), inner(cols)),
            Pattern::Stamp => match index {
                0 => block(head(rows), head(cols)),
                1 => block(tail(rows), tail(cols)),
                2 => block(head(rows), tail(cols)),
                _ => block(tail(rows), head(cols)),
            },
        };
        Some(group)
    }

    /// Every group must be non-empty and lie entirely on `geometry`.
    pub fn validate(&self, geometry: &BoardGeometry) -> Result<()> {
        for (index, group) in self.offset_groups(geometry).enumerate() {
            if group.is_empty() {
                return Err(BingoError::DegenerateGroup {
                    pattern: self.name().to_string(),
                    group: index,
                });
            }
            if let Some(&coordinate) = group.iter().find(|&&c| !geometry.contains(c)) {
                return Err(BingoError::PatternMismatch {
                    pattern: self.name().to_string(),
                    coordinate,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = BingoError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Pattern::ALL
            .into_iter()
            .find(|pattern| pattern.name() == wanted)
            .ok_or_else(|| BingoError::UnknownPattern(s.to_string()))
    }
}

/// Lazy, finite sequence of a pattern's offset groups.
#[derive(Debug, Clone)]
pub struct OffsetGroups<'g> {
    pattern: Pattern,
    geometry: &'g BoardGeometry,
    next: usize,
    count: usize,
}

impl Iterator for OffsetGroups<'_> {
    type Item = Vec<Coordinate>;

    fn next(&mut self) -> Option<Self::Item> {
        let group = self.pattern.group(self.geometry, self.next)?;
        self.next += 1;
        Some(group)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for OffsetGroups<'_> {}

impl FusedIterator for OffsetGroups<'_> {}

// Rows first, then columns, then the main diagonal (r, r) and the
// anti-diagonal (-r, r). The anti-diagonal relies on the board being indexed
// symmetrically around zero.
fn line_group(rows: &[i32], cols: &[i32], index: usize) -> Vec<Coordinate> {
    let (row_lines, col_lines) = (rows.len(), cols.len());
    if index < row_lines {
        let row = rows[index];
        cols.iter().map(|&col| Coordinate::new(row, col)).collect()
    } else if index < row_lines + col_lines {
        let col = cols[index - row_lines];
        rows.iter().map(|&row| Coordinate::new(row, col)).collect()
    } else if index == row_lines + col_lines {
        rows.iter().map(|&row| Coordinate::new(row, row)).collect()
    } else {
        rows.iter().map(|&row| Coordinate::new(-row, row)).collect()
    }
}

fn block(rows: &[i32], cols: &[i32]) -> Vec<Coordinate> {
    rows.iter()
        .flat_map(|&row| cols.iter().map(move |&col| Coordinate::new(row, col)))
        .collect()
}

fn inner(axis: &[i32]) -> &[i32] {
    if axis.len() < 2 {
        return &[];
    }
    &axis[1..axis.len() - 1]
}

fn head(axis: &[i32]) -> &[i32] {
    &axis[..axis.len().saturating_sub(STAMP_EDGE)]
}

fn tail(axis: &[i32]) -> &[i32] {
    &axis[STAMP_EDGE.min(axis.len())..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(pairs: &[(i32, i32)]) -> Vec<Coordinate> {
        pairs.iter().map(|&pair| Coordinate::from(pair)).collect()
    }

    #[test]
    fn test_corners() {
        let geometry = BoardGeometry::zero_based(5).unwrap();
        let groups: Vec<_> = Pattern::Corners.offset_groups(&geometry).collect();
        assert_eq!(groups, vec![coords(&[(0, 0), (0, 4), (4, 0), (4, 4)])]);
    }

    #[test]
    fn test_lines_order_and_count() {
        let geometry = BoardGeometry::default();
        let groups: Vec<_> = Pattern::Lines.offset_groups(&geometry).collect();
        assert_eq!(groups.len(), 12);
        assert_eq!(groups[0], coords(&[(-2, -2), (-2, -1), (-2, 0), (-2, 1), (-2, 2)]));
        assert_eq!(groups[5], coords(&[(-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2)]));
        assert_eq!(groups[10], coords(&[(-2, -2), (-1, -1), (0, 0), (1, 1), (2, 2)]));
        assert_eq!(groups[11], coords(&[(2, -2), (1, -1), (0, 0), (-1, 1), (-2, 2)]));
    }

    #[test]
    fn test_coverall_and_center() {
        let geometry = BoardGeometry::zero_based(5).unwrap();
        let coverall: Vec<_> = Pattern::Coverall.offset_groups(&geometry).collect();
        assert_eq!(coverall.len(), 1);
        assert_eq!(coverall[0].len(), 25);

        let center: Vec<_> = Pattern::Center.offset_groups(&geometry).collect();
        assert_eq!(center.len(), 1);
        assert_eq!(
            center[0],
            coords(&[(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3), (3, 1), (3, 2), (3, 3)])
        );
    }

    #[test]
    fn test_stamp_blocks() {
        let geometry = BoardGeometry::zero_based(5).unwrap();
        let groups: Vec<_> = Pattern::Stamp.offset_groups(&geometry).collect();
        assert_eq!(
            groups,
            vec![
                coords(&[(0, 0), (0, 1), (1, 0), (1, 1)]),
                coords(&[(3, 3), (3, 4), (4, 3), (4, 4)]),
                coords(&[(0, 3), (0, 4), (1, 3), (1, 4)]),
                coords(&[(3, 0), (3, 1), (4, 0), (4, 1)]),
            ]
        );
    }

    #[test]
    fn test_enumeration_is_restartable() {
        let geometry = BoardGeometry::default();
        for pattern in Pattern::ALL {
            let first: Vec<_> = pattern.offset_groups(&geometry).collect();
            let second: Vec<_> = pattern.offset_groups(&geometry).collect();
            assert_eq!(first, second);
            assert_eq!(pattern.offset_groups(&geometry).len(), pattern.group_count(&geometry));
        }
    }

    #[test]
    fn test_iterator_is_lazy_and_fused() {
        let geometry = BoardGeometry::default();
        let mut groups = Pattern::Lines.offset_groups(&geometry);
        assert_eq!(groups.len(), 12);
        groups.next();
        assert_eq!(groups.len(), 11);
        let rest: Vec<_> = groups.by_ref().collect();
        assert_eq!(rest.len(), 11);
        assert!(groups.next().is_none());
        assert!(groups.next().is_none());
    }

    #[test]
    fn test_all_patterns_valid_on_default_board() {
        let geometry = BoardGeometry::default();
        for pattern in Pattern::ALL {
            assert_eq!(pattern.validate(&geometry), Ok(()), "{pattern}");
        }
    }

    #[test]
    fn test_lines_rejected_on_zero_based_board() {
        let geometry = BoardGeometry::zero_based(5).unwrap();
        assert_eq!(
            Pattern::Lines.validate(&geometry),
            Err(BingoError::PatternMismatch {
                pattern: "lines".to_string(),
                coordinate: Coordinate::new(-1, 1),
            })
        );
        for pattern in [Pattern::Corners, Pattern::Coverall, Pattern::Center, Pattern::Stamp] {
            assert!(pattern.validate(&geometry).is_ok());
        }
    }

    #[test]
    fn test_stamp_degenerate_on_three_by_three() {
        let geometry = BoardGeometry::centered(3).unwrap();
        assert_eq!(
            Pattern::Stamp.validate(&geometry),
            Err(BingoError::DegenerateGroup { pattern: "stamp".to_string(), group: 0 })
        );
        assert!(Pattern::Center.validate(&geometry).is_ok());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Corners".parse::<Pattern>(), Ok(Pattern::Corners));
        assert_eq!(" stamp ".parse::<Pattern>(), Ok(Pattern::Stamp));
        assert_eq!("blackout".parse::<Pattern>(), Err(BingoError::UnknownPattern("blackout".to_string())));
        for pattern in Pattern::ALL {
            assert_eq!(pattern.to_string().parse::<Pattern>(), Ok(pattern));
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Pattern::Coverall).unwrap(), "\"coverall\"");
        assert_eq!(serde_json::from_str::<Pattern>("\"lines\"").unwrap(), Pattern::Lines);
    }
}
