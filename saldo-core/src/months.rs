//! Month keys and the output month range (inferred or fixed).

use anyhow::anyhow;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Canonical (year, month) key, rendered `"YYYY-MM"`. The derived ordering
/// is chronological, and the rendered form sorts identically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(d: NaiveDate) -> Self {
        Self {
            year: d.year(),
            month: d.month(),
        }
    }

    /// Next calendar month.
    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow!("expected YYYY-MM, got '{s}'"))?;
        let year: i32 = y.parse().map_err(|_| anyhow!("invalid year in '{s}'"))?;
        let month: u32 = m.parse().map_err(|_| anyhow!("invalid month in '{s}'"))?;
        MonthKey::new(year, month).ok_or_else(|| anyhow!("month out of range in '{s}'"))
    }
}

/// How the output month columns are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthSelection {
    /// Columns are exactly the months observed in the transaction stream.
    #[default]
    Inferred,
    /// Inclusive `[start, end]` interval. Observed months outside it are
    /// dropped from aggregation, and every account is pre-seeded with 0.0
    /// for every in-range month.
    Fixed { start: MonthKey, end: MonthKey },
}

impl MonthSelection {
    /// Whether a transaction in `month` participates in aggregation.
    pub fn contains(&self, month: MonthKey) -> bool {
        match self {
            MonthSelection::Inferred => true,
            MonthSelection::Fixed { start, end } => *start <= month && month <= *end,
        }
    }

    /// The final ordered column set. Fixed intervals are enumerated by
    /// one-month increment, bounded by the non-decreasing comparison (never
    /// an iteration count); `start > end` yields the empty range.
    pub fn resolve(&self, observed: &BTreeSet<MonthKey>) -> Vec<MonthKey> {
        match self {
            MonthSelection::Inferred => observed.iter().copied().collect(),
            MonthSelection::Fixed { start, end } => {
                let mut months = Vec::new();
                let mut cur = *start;
                while cur <= *end {
                    months.push(cur);
                    cur = cur.succ();
                }
                months
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk(y: i32, m: u32) -> MonthKey {
        MonthKey::new(y, m).unwrap()
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(mk(2024, 4).to_string(), "2024-04");
        assert_eq!("2024-04".parse::<MonthKey>().unwrap(), mk(2024, 4));
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("abril".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_ordering_matches_rendered_order() {
        let a = mk(2023, 12);
        let b = mk(2024, 1);
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn test_succ_rolls_over_year() {
        assert_eq!(mk(2024, 12).succ(), mk(2025, 1));
        assert_eq!(mk(2024, 4).succ(), mk(2024, 5));
    }

    #[test]
    fn test_fixed_range_enumeration() {
        let sel = MonthSelection::Fixed {
            start: mk(2023, 11),
            end: mk(2024, 2),
        };
        let months = sel.resolve(&BTreeSet::new());
        assert_eq!(
            months,
            vec![mk(2023, 11), mk(2023, 12), mk(2024, 1), mk(2024, 2)]
        );
    }

    #[test]
    fn test_fixed_range_inverted_is_empty() {
        let sel = MonthSelection::Fixed {
            start: mk(2024, 6),
            end: mk(2024, 1),
        };
        assert!(sel.resolve(&BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_inferred_sorts_observed() {
        let observed: BTreeSet<_> = [mk(2024, 6), mk(2024, 1), mk(2023, 12)].into();
        assert_eq!(
            MonthSelection::Inferred.resolve(&observed),
            vec![mk(2023, 12), mk(2024, 1), mk(2024, 6)]
        );
    }

    #[test]
    fn test_contains() {
        let sel = MonthSelection::Fixed {
            start: mk(2024, 1),
            end: mk(2024, 3),
        };
        assert!(sel.contains(mk(2024, 1)));
        assert!(sel.contains(mk(2024, 3)));
        assert!(!sel.contains(mk(2024, 4)));
        assert!(MonthSelection::Inferred.contains(mk(1999, 7)));
    }
}
