//! Whole-month booking intervals.
//!
//! A booking always covers complete calendar months, so the only time unit the engine
//! knows is a [`YearMonth`]. An [`Interval`] is a closed range of those months and the
//! overlap test treats a shared month as a collision: two renters can never hold the
//! same billboard in the same month.

use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month. Ordering is by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: i32,
}

impl YearMonth {
    /// Builds a month, rejecting anything outside 1..=12.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInterval`] for an out-of-range month.
    pub fn new(month: i32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_interval(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Parses user input in `MM/YYYY` form.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDate`] if the text is not a valid month and year.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        NaiveDate::parse_from_str(&format!("01/{trimmed}"), "%d/%m/%Y")
            .map(Self::from_date)
            .map_err(|_| Error::InvalidDate {
                input: input.to_string(),
            })
    }

    /// The month containing `date`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            // month() is always 1..=12
            month: date.month() as i32,
        }
    }

    /// The current month in UTC.
    #[must_use]
    pub fn current() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    #[must_use]
    pub const fn month(self) -> i32 {
        self.month
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Months elapsed since January of year zero. Consecutive months have consecutive
    /// indices, which makes this the storage key for occupied months.
    #[must_use]
    pub fn index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month - 1)
    }
}

/// Wire shape of [`YearMonth`]; only reachable through [`YearMonth::new`].
#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: i32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = Error;

    fn try_from(raw: RawYearMonth) -> Result<Self> {
        Self::new(raw.month, raw.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// Closed month range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: YearMonth,
    end: YearMonth,
}

impl Interval {
    /// # Errors
    /// Returns [`Error::InvalidInterval`] if `end` is before `start`.
    pub fn new(start: YearMonth, end: YearMonth) -> Result<Self> {
        if end < start {
            return Err(Error::invalid_interval(format!(
                "end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Re-runs construction checks on a value that may have been built elsewhere.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInterval`] for an out-of-range month or an inverted range.
    pub fn validated(self) -> Result<Self> {
        Self::new(
            YearMonth::new(self.start.month, self.start.year)?,
            YearMonth::new(self.end.month, self.end.year)?,
        )
    }

    /// Builds an interval with no checks, for exercising validation paths in tests.
    #[cfg(test)]
    pub(crate) const fn unchecked(start: (i32, i32), end: (i32, i32)) -> Self {
        Self {
            start: YearMonth {
                month: start.0,
                year: start.1,
            },
            end: YearMonth {
                month: end.0,
                year: end.1,
            },
        }
    }

    /// Parses a `MM/YYYY` start and end pair as submitted by the booking form.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDate`] for unparsable text and
    /// [`Error::InvalidInterval`] for an inverted range.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(YearMonth::parse(start)?, YearMonth::parse(end)?)
    }

    /// A single-month interval.
    #[must_use]
    pub const fn single(month: YearMonth) -> Self {
        Self {
            start: month,
            end: month,
        }
    }

    #[must_use]
    pub const fn start(&self) -> YearMonth {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> YearMonth {
        self.end
    }

    /// True when both intervals share at least one month.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of whole months covered, counting both endpoints.
    ///
    /// Never below one for an interval that passed [`Interval::new`].
    #[must_use]
    pub fn month_count(&self) -> i64 {
        i64::from(self.end.year - self.start.year) * 12
            + i64::from(self.end.month - self.start.month + 1)
    }

    /// Storage keys of every month in the interval.
    pub fn month_indices(&self) -> impl Iterator<Item = i64> {
        self.start.index()..=self.end.index()
    }
}

/// Wire shape of [`Interval`]; only reachable through [`Interval::new`].
#[derive(Deserialize)]
struct RawInterval {
    start: YearMonth,
    end: YearMonth,
}

impl TryFrom<RawInterval> for Interval {
    type Error = Error;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// True if `candidate` overlaps any interval in `others`.
pub fn overlaps_any<'a>(
    candidate: &Interval,
    others: impl IntoIterator<Item = &'a Interval>,
) -> bool {
    others.into_iter().any(|other| candidate.overlaps(other))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn ym(month: i32, year: i32) -> YearMonth {
        YearMonth::new(month, year).unwrap()
    }

    fn iv(start: (i32, i32), end: (i32, i32)) -> Interval {
        Interval::new(ym(start.0, start.1), ym(end.0, end.1)).unwrap()
    }

    #[test]
    fn test_year_month_ordering() {
        assert!(ym(12, 2024) < ym(1, 2025));
        assert!(ym(2, 2025) < ym(3, 2025));
        assert_eq!(ym(5, 2025), ym(5, 2025));
    }

    #[test]
    fn test_year_month_rejects_bad_month() {
        assert!(matches!(
            YearMonth::new(0, 2025),
            Err(Error::InvalidInterval { .. })
        ));
        assert!(matches!(
            YearMonth::new(13, 2025),
            Err(Error::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_year_month_parse() {
        assert_eq!(YearMonth::parse("03/2025").unwrap(), ym(3, 2025));
        assert_eq!(YearMonth::parse(" 11/2026 ").unwrap(), ym(11, 2026));

        for bad in ["", "2025/03", "13/2025", "00/2025", "march 2025", "03-2025"] {
            assert!(
                matches!(YearMonth::parse(bad), Err(Error::InvalidDate { .. })),
                "expected InvalidDate for {bad:?}"
            );
        }
    }

    #[test]
    fn test_year_month_display_and_index() {
        assert_eq!(ym(1, 2025).to_string(), "01/2025");
        assert_eq!(ym(1, 2025).index() + 1, ym(2, 2025).index());
        assert_eq!(ym(12, 2024).index() + 1, ym(1, 2025).index());
    }

    #[test]
    fn test_interval_rejects_inverted_range() {
        let result = Interval::new(ym(3, 2025), ym(1, 2025));
        assert!(matches!(result, Err(Error::InvalidInterval { .. })));

        let result = Interval::parse("01/2026", "12/2025");
        assert!(matches!(result, Err(Error::InvalidInterval { .. })));
    }

    #[test]
    fn test_single_month_interval_is_valid() {
        let interval = Interval::single(ym(2, 2025));
        assert_eq!(interval.start(), interval.end());
        assert_eq!(interval.month_count(), 1);
    }

    #[test]
    fn test_disjoint_intervals_do_not_overlap() {
        let a = iv((1, 2025), (2, 2025));
        let b = iv((3, 2025), (4, 2025));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        let far = iv((1, 2030), (12, 2030));
        assert!(!a.overlaps(&far));
    }

    #[test]
    fn test_touching_months_overlap() {
        let ends_march = iv((1, 2025), (3, 2025));
        let starts_march = iv((3, 2025), (6, 2025));
        assert!(ends_march.overlaps(&starts_march));
        assert!(starts_march.overlaps(&ends_march));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = iv((1, 2025), (3, 2025));
        let inner = iv((2, 2025), (2, 2025));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
        assert!(outer.overlaps(&outer));
    }

    #[test]
    fn test_overlap_is_symmetric_and_matches_shared_months() {
        let months: Vec<YearMonth> = (2024..=2025)
            .flat_map(|year| (1..=12).map(move |month| ym(month, year)))
            .collect();
        let intervals: Vec<Interval> = months
            .iter()
            .step_by(3)
            .flat_map(|&start| {
                months
                    .iter()
                    .filter(move |&&end| end >= start)
                    .step_by(4)
                    .map(move |&end| Interval::new(start, end).unwrap())
            })
            .collect();

        for a in &intervals {
            for b in &intervals {
                let shares_month = a.month_indices().any(|m| b.month_indices().any(|n| m == n));
                assert_eq!(a.overlaps(b), shares_month, "{a} vs {b}");
                assert_eq!(a.overlaps(b), b.overlaps(a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_month_count_across_years() {
        assert_eq!(iv((1, 2025), (3, 2025)).month_count(), 3);
        assert_eq!(iv((11, 2024), (2, 2025)).month_count(), 4);
        assert_eq!(iv((1, 2024), (12, 2025)).month_count(), 24);
        assert_eq!(iv((11, 2024), (2, 2025)).month_indices().count(), 4);
    }

    fn from_toml<T>(text: &str) -> std::result::Result<T, toml::de::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        toml::from_str(text)
    }

    #[test]
    fn test_deserialize_valid_interval() {
        let interval: Interval = from_toml(
            r"
            start = { year = 2025, month = 1 }
            end = { year = 2025, month = 3 }
            ",
        )
        .unwrap();
        assert_eq!(interval, iv((1, 2025), (3, 2025)));

        let text = toml::to_string(&interval).unwrap();
        assert_eq!(from_toml::<Interval>(&text).unwrap(), interval);
    }

    #[test]
    fn test_deserialize_rejects_bad_month() {
        let err = from_toml::<YearMonth>("year = 2025\nmonth = 13").unwrap_err();
        assert!(err.to_string().contains("month must be between 1 and 12"));

        let result = from_toml::<Interval>(
            r"
            start = { year = 2025, month = 1 }
            end = { year = 2025, month = 13 }
            ",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_inverted_range() {
        let err = from_toml::<Interval>(
            r"
            start = { year = 2025, month = 3 }
            end = { year = 2025, month = 1 }
            ",
        )
        .unwrap_err();
        assert!(err.to_string().contains("is before start"));
    }

    #[test]
    fn test_validated_rechecks_unchecked_values() {
        assert_eq!(
            Interval::unchecked((1, 2025), (3, 2025)).validated().unwrap(),
            iv((1, 2025), (3, 2025))
        );
        assert!(matches!(
            Interval::unchecked((3, 2025), (1, 2025)).validated(),
            Err(Error::InvalidInterval { .. })
        ));
        assert!(matches!(
            Interval::unchecked((13, 2025), (13, 2025)).validated(),
            Err(Error::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_overlaps_any() {
        let candidate = iv((1, 2025), (3, 2025));
        let booked = [iv((5, 2025), (6, 2025)), iv((2, 2025), (2, 2025))];
        assert!(overlaps_any(&candidate, &booked));
        assert!(!overlaps_any(&candidate, &booked[..1]));
        assert!(!overlaps_any(&candidate, &[]));
    }
}
