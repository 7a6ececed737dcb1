//! Month-granularity date math.
//!
//! Every function takes its reference date explicitly; nothing here reads a
//! clock or a timezone. Only the year and month of each date participate,
//! except in [`add_months`] which has to produce a full date.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Serialize, Serializer};

/// A year-month token. Orders chronologically and renders as `YYYY-MM`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MonthLabel {
    year: i32,
    month: u32,
}

impl MonthLabel {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    fn ordinal(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn month_label(date: NaiveDate) -> MonthLabel {
    MonthLabel::from_date(date)
}

fn month_offset(from: NaiveDate, to: NaiveDate) -> i64 {
    MonthLabel::from_date(to).ordinal() - MonthLabel::from_date(from).ordinal()
}

/// Whole calendar months from `as_of` to `date`. Past and current months give 0.
pub fn months_until(as_of: NaiveDate, date: NaiveDate) -> u32 {
    u32::try_from(month_offset(as_of, date).max(0)).unwrap_or(u32::MAX)
}

/// Advances `date` by `months`, carrying into later years.
///
/// A day past the end of the resulting month clamps to its last day, so
/// Jan 31 + 1 month is Feb 28 (or Feb 29 in a leap year). Saturates at the
/// latest representable date instead of overflowing.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Months from `start`'s month through `end`'s month inclusive; at least 1.
pub fn months_between_inclusive(start: NaiveDate, end: NaiveDate) -> u32 {
    let months = u32::try_from(month_offset(start, end).max(0)).unwrap_or(u32::MAX - 1);
    months + 1
}

pub fn generate_monthly_labels(start: NaiveDate, end: NaiveDate) -> Vec<MonthLabel> {
    let count = months_between_inclusive(start, end);
    (0..count)
        .map(|offset| month_label(add_months(start, offset)))
        .collect()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn months_until_compares_year_and_month_only() {
        let as_of = date(2026, 10, 16);
        assert_eq!(months_until(as_of, date(2027, 10, 1)), 12);
        assert_eq!(months_until(as_of, date(2027, 10, 31)), 12);
        assert_eq!(months_until(as_of, date(2026, 11, 1)), 1);
        assert_eq!(months_until(as_of, date(2026, 10, 31)), 0);
    }

    #[test]
    fn months_until_clamps_past_dates_to_zero() {
        let as_of = date(2026, 10, 16);
        assert_eq!(months_until(as_of, date(2026, 9, 30)), 0);
        assert_eq!(months_until(as_of, date(2001, 1, 1)), 0);
    }

    #[test]
    fn add_months_carries_into_next_year() {
        assert_eq!(add_months(date(2026, 11, 15), 3), date(2027, 2, 15));
        assert_eq!(add_months(date(2026, 1, 1), 24), date(2028, 1, 1));
        assert_eq!(add_months(date(2026, 5, 9), 0), date(2026, 5, 9));
    }

    #[test]
    fn add_months_clamps_end_of_month_days() {
        assert_eq!(add_months(date(2026, 1, 31), 1), date(2026, 2, 28));
        assert_eq!(add_months(date(2028, 1, 31), 1), date(2028, 2, 29));
        assert_eq!(add_months(date(2026, 3, 31), 1), date(2026, 4, 30));
        assert_eq!(add_months(date(2026, 1, 31), 2), date(2026, 3, 31));
    }

    #[test]
    fn add_months_saturates_instead_of_overflowing() {
        assert_eq!(add_months(NaiveDate::MAX, 1), NaiveDate::MAX);
    }

    #[test]
    fn month_label_is_zero_padded() {
        assert_eq!(month_label(date(2026, 3, 9)).to_string(), "2026-03");
        assert_eq!(month_label(date(987, 12, 1)).to_string(), "0987-12");
        assert_eq!(
            serde_json::to_string(&month_label(date(2027, 1, 5))).expect("serializes"),
            "\"2027-01\""
        );
    }

    #[test]
    fn months_between_inclusive_never_drops_below_one() {
        assert_eq!(months_between_inclusive(date(2026, 10, 1), date(2026, 10, 31)), 1);
        assert_eq!(months_between_inclusive(date(2026, 10, 1), date(2027, 10, 1)), 13);
        assert_eq!(months_between_inclusive(date(2026, 10, 1), date(2025, 1, 1)), 1);
    }

    #[test]
    fn labels_from_month_end_start_do_not_skip_short_months() {
        let labels = generate_monthly_labels(date(2026, 1, 31), date(2026, 4, 1));
        let rendered: Vec<String> = labels.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["2026-01", "2026-02", "2026-03", "2026-04"]);
    }

    #[test]
    fn labels_cross_year_boundary() {
        let labels = generate_monthly_labels(date(2026, 11, 1), date(2027, 2, 10));
        let rendered: Vec<String> = labels.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["2026-11", "2026-12", "2027-01", "2027-02"]);
    }

    #[test]
    fn first_of_month_resets_day() {
        assert_eq!(first_of_month(date(2026, 10, 16)), date(2026, 10, 1));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_labels_are_contiguous_and_sized(
            start_offset in 0u32..600,
            span in 0u32..240,
            start_day in 1u32..=28,
            end_day in 1u32..=28,
        ) {
            let start = add_months(date(1990, 1, start_day), start_offset);
            let end = add_months(date(1990, 1, end_day), start_offset + span);
            let labels = generate_monthly_labels(start, end);

            prop_assert_eq!(labels.len() as u32, months_between_inclusive(start, end));
            prop_assert_eq!(labels.len() as u32, span + 1);
            prop_assert_eq!(labels[0], month_label(start));
            for pair in labels.windows(2) {
                prop_assert_eq!(pair[1].ordinal() - pair[0].ordinal(), 1);
            }
        }

        #[test]
        fn prop_months_until_matches_add_months(
            offset in 0u32..600,
            day in 1u32..=28,
        ) {
            let as_of = date(2000, 1, 1);
            let base = date(2000, 1, day);
            let target = add_months(base, offset);
            prop_assert_eq!(months_until(as_of, target), offset);
            prop_assert!(months_until(target, as_of) == 0);
        }
    }
}
