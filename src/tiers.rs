//! # Tier Set
//!
//! Named view over the eight positional tiers of an annotated sample.
//!
//! ## Expected Layout
//! | Position | Role     | Kind     |
//! |----------|----------|----------|
//! | 1        | Sentence | interval |
//! | 2        | Word     | interval |
//! | 3        | Vowel    | interval |
//! | 4        | Length   | interval |
//! | 5        | Point    | point    |
//! | 6        | F1       | point    |
//! | 7        | F2       | point    |
//! | 8        | F3       | point    |
//!
//! Tiers are matched by position only; their names in the file are not
//! consulted. Any tiers after the eighth are ignored.
//!
//! The layout is checked once when the set is built, so the alignment code can
//! index the tiers without further checks.

use crate::error::TableError;
use crate::textgrid::{Interval, Point, TextGrid, Tier, TierEntries};

pub const TIER_COUNT: usize = 8;

/// Role names in positional order
pub const TIER_ROLES: [&str; TIER_COUNT] =
    ["Sentence", "Word", "Vowel", "Length", "Point", "F1", "F2", "F3"];

#[derive(Debug, Clone, PartialEq)]
pub struct TierSet {
    pub sentence: Vec<Interval>,
    pub word: Vec<Interval>,
    pub vowel: Vec<Interval>,
    pub length: Vec<Interval>,
    pub point: Vec<Point>,
    pub f1: Vec<Point>,
    pub f2: Vec<Point>,
    pub f3: Vec<Point>,
}

impl TierSet {
    /// Build the named tier set from a parsed TextGrid.
    ///
    /// Fails with a structural error if fewer than eight tiers exist, if any
    /// tier has the wrong kind, or if the vowel tier is empty.
    pub fn from_textgrid(grid: &TextGrid) -> Result<Self, TableError> {
        if grid.tiers.len() < TIER_COUNT {
            let position = grid.tiers.len() + 1;
            return Err(TableError::StructureError {
                tier: TIER_ROLES[position - 1],
                position,
                message: format!(
                    "missing tier (file has {} tiers, {} are required)",
                    grid.tiers.len(),
                    TIER_COUNT
                ),
            });
        }

        let tiers = &grid.tiers;
        let set = TierSet {
            sentence: intervals_at(tiers, 0)?,
            word: intervals_at(tiers, 1)?,
            vowel: intervals_at(tiers, 2)?,
            length: intervals_at(tiers, 3)?,
            point: points_at(tiers, 4)?,
            f1: points_at(tiers, 5)?,
            f2: points_at(tiers, 6)?,
            f3: points_at(tiers, 7)?,
        };

        if set.vowel.is_empty() {
            return Err(TableError::StructureError {
                tier: TIER_ROLES[2],
                position: 3,
                message: "tier has no intervals".to_string(),
            });
        }

        Ok(set)
    }
}

fn wrong_kind(tier: &Tier, index: usize, expected: &str) -> TableError {
    TableError::StructureError {
        tier: TIER_ROLES[index],
        position: index + 1,
        message: format!(
            "expected {}, found {} '{}'",
            expected,
            tier.entries.kind(),
            tier.name
        ),
    }
}

fn intervals_at(tiers: &[Tier], index: usize) -> Result<Vec<Interval>, TableError> {
    match &tiers[index].entries {
        TierEntries::Intervals(intervals) => Ok(intervals.clone()),
        TierEntries::Points(_) => Err(wrong_kind(&tiers[index], index, "interval tier")),
    }
}

fn points_at(tiers: &[Tier], index: usize) -> Result<Vec<Point>, TableError> {
    match &tiers[index].entries {
        TierEntries::Points(points) => Ok(points.clone()),
        TierEntries::Intervals(_) => Err(wrong_kind(&tiers[index], index, "point tier")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval_tier(name: &str, intervals: Vec<Interval>) -> Tier {
        Tier {
            name: name.to_string(),
            xmin: 0.0,
            xmax: 1.0,
            entries: TierEntries::Intervals(intervals),
        }
    }

    fn point_tier(name: &str, points: Vec<Point>) -> Tier {
        Tier {
            name: name.to_string(),
            xmin: 0.0,
            xmax: 1.0,
            entries: TierEntries::Points(points),
        }
    }

    fn grid(tiers: Vec<Tier>) -> TextGrid {
        TextGrid {
            xmin: 0.0,
            xmax: 1.0,
            tiers,
        }
    }

    fn full_layout() -> Vec<Tier> {
        vec![
            interval_tier("Sentence", vec![Interval::new(0.0, 1.0, "s")]),
            interval_tier("Word", vec![Interval::new(0.0, 1.0, "w")]),
            interval_tier("Vowel", vec![Interval::new(0.2, 0.4, "a")]),
            interval_tier("Length", vec![]),
            point_tier("Point", vec![]),
            point_tier("F1", vec![Point::new(0.3, "700")]),
            point_tier("F2", vec![Point::new(0.3, "1200")]),
            point_tier("F3", vec![Point::new(0.3, "2500")]),
        ]
    }

    #[test]
    fn test_valid_layout() {
        let set = TierSet::from_textgrid(&grid(full_layout())).unwrap();
        assert_eq!(set.vowel[0].text, "a");
        assert_eq!(set.f3[0].text, "2500");
    }

    #[test]
    fn test_extra_tiers_ignored() {
        let mut tiers = full_layout();
        tiers.push(point_tier("Notes", vec![]));
        assert!(TierSet::from_textgrid(&grid(tiers)).is_ok());
    }

    #[test]
    fn test_missing_tier_names_role() {
        let mut tiers = full_layout();
        tiers.truncate(6);
        let err = TierSet::from_textgrid(&grid(tiers)).unwrap_err();
        match err {
            TableError::StructureError { tier, position, .. } => {
                assert_eq!(tier, "F2");
                assert_eq!(position, 7);
            }
            other => panic!("Expected structure error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_kind() {
        let mut tiers = full_layout();
        tiers[5] = interval_tier("F1", vec![]);
        let err = TierSet::from_textgrid(&grid(tiers)).unwrap_err();
        assert!(matches!(err, TableError::StructureError { tier: "F1", position: 6, .. }));
        assert!(!err.is_consistency());
    }

    #[test]
    fn test_empty_vowel_tier() {
        let mut tiers = full_layout();
        tiers[2] = interval_tier("Vowel", vec![]);
        let err = TierSet::from_textgrid(&grid(tiers)).unwrap_err();
        assert!(matches!(err, TableError::StructureError { tier: "Vowel", .. }));
    }
}
