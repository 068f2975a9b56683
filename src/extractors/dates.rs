//! Date range resolver.
//!
//! Precedence ladder, first match wins:
//! 1. "today"  2. "yesterday"  3. "last N days"
//! 4. "this month"  5. "last month"  6. "this quarter"
//! 7. "Q[1-4] YYYY"  8. "this year" / "ytd"  9. bare year 20xx
//! 10. nothing matched: all time
//!
//! Calendar periods run from 00:00:00 on their first day to 23:59:59 on their
//! last day (UTC). Open-ended periods ("last N days", "this year") end at `now`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use regex::Regex;

use super::compile;
use crate::matching::Matcher;
use crate::report::DateRange;

type DateRule = fn(&DateRangeResolver, &str, DateTime<Utc>) -> Option<DateRange>;

/// Ordered date rules. The name is reported by [`DateRangeResolver::resolve_rule`].
const RULES: &[(&str, DateRule)] = &[
    ("today", DateRangeResolver::today),
    ("yesterday", DateRangeResolver::yesterday),
    ("last_n_days", DateRangeResolver::last_n_days),
    ("this_month", DateRangeResolver::this_month),
    ("last_month", DateRangeResolver::last_month),
    ("this_quarter", DateRangeResolver::this_quarter),
    ("quarter_of_year", DateRangeResolver::quarter_of_year),
    ("this_year", DateRangeResolver::this_year),
    ("calendar_year", DateRangeResolver::calendar_year),
];

/// Resolves date phrases in a normalized query to a [`DateRange`].
#[derive(Debug, Clone)]
pub struct DateRangeResolver {
    matcher: Matcher,
    last_n_days_re: Option<Regex>,
    quarter_re: Option<Regex>,
    year_re: Option<Regex>,
}

impl DateRangeResolver {
    /// Create a resolver using `matcher` for keyword rules.
    pub fn new(matcher: Matcher) -> Self {
        Self {
            matcher,
            last_n_days_re: compile(r"last\s+(\d+)\s+days?"),
            quarter_re: compile(r"\bq([1-4])\s*(\d{4})\b"),
            year_re: compile(r"\b(20\d{2})\b"),
        }
    }

    /// Resolve the query, falling back to all time.
    pub fn resolve(&self, text: &str, now: DateTime<Utc>) -> DateRange {
        self.resolve_rule(text, now)
            .map_or_else(DateRange::all_time, |(_, range)| range)
    }

    /// Resolve the query and report which rule fired.
    pub fn resolve_rule(&self, text: &str, now: DateTime<Utc>) -> Option<(&'static str, DateRange)> {
        RULES
            .iter()
            .find_map(|(name, rule)| rule(self, text, now).map(|range| (*name, range)))
    }

    fn today(&self, text: &str, now: DateTime<Utc>) -> Option<DateRange> {
        self.matcher
            .contains(text, "today")
            .then(|| DateRange::between(now, now))
    }

    fn yesterday(&self, text: &str, now: DateTime<Utc>) -> Option<DateRange> {
        if !self.matcher.contains(text, "yesterday") {
            return None;
        }
        let day = now.date_naive().pred_opt()?;
        Some(DateRange::between(start_of(day)?, end_of(day)?))
    }

    fn last_n_days(&self, text: &str, now: DateTime<Utc>) -> Option<DateRange> {
        let caps = self.last_n_days_re.as_ref()?.captures(text)?;
        let days: i64 = caps.get(1)?.as_str().parse().ok()?;
        let start = now.checked_sub_signed(Duration::try_days(days)?)?;
        Some(DateRange::between(start, now))
    }

    fn this_month(&self, text: &str, now: DateTime<Utc>) -> Option<DateRange> {
        if !self.matcher.contains(text, "this month") {
            return None;
        }
        month_range(now.year(), now.month())
    }

    fn last_month(&self, text: &str, now: DateTime<Utc>) -> Option<DateRange> {
        if !self.matcher.contains(text, "last month") {
            return None;
        }
        let (year, month) = if now.month() == 1 {
            (now.year().checked_sub(1)?, 12)
        } else {
            (now.year(), now.month().saturating_sub(1))
        };
        month_range(year, month)
    }

    fn this_quarter(&self, text: &str, now: DateTime<Utc>) -> Option<DateRange> {
        if !self.matcher.contains(text, "this quarter") {
            return None;
        }
        let quarter = now.month0().checked_div(3)?.checked_add(1)?;
        quarter_range(now.year(), quarter)
    }

    fn quarter_of_year(&self, text: &str, _now: DateTime<Utc>) -> Option<DateRange> {
        let caps = self.quarter_re.as_ref()?.captures(text)?;
        let quarter: u32 = caps.get(1)?.as_str().parse().ok()?;
        let year: i32 = caps.get(2)?.as_str().parse().ok()?;
        quarter_range(year, quarter)
    }

    fn this_year(&self, text: &str, now: DateTime<Utc>) -> Option<DateRange> {
        if !self.matcher.contains_any(text, &["this year", "ytd"]) {
            return None;
        }
        let start = start_of(NaiveDate::from_ymd_opt(now.year(), 1, 1)?)?;
        Some(DateRange::between(start, now))
    }

    fn calendar_year(&self, text: &str, _now: DateTime<Utc>) -> Option<DateRange> {
        let caps = self.year_re.as_ref()?.captures(text)?;
        let year: i32 = caps.get(1)?.as_str().parse().ok()?;
        let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(DateRange::between(start_of(first)?, end_of(last)?))
    }
}

fn start_of(day: NaiveDate) -> Option<DateTime<Utc>> {
    Some(day.and_hms_opt(0, 0, 0)?.and_utc())
}

fn end_of(day: NaiveDate) -> Option<DateTime<Utc>> {
    Some(day.and_hms_opt(23, 59, 59)?.and_utc())
}

/// Last calendar day of the given month.
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month.checked_add(1)?)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

fn month_range(year: i32, month: u32) -> Option<DateRange> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = last_day_of_month(year, month)?;
    Some(DateRange::between(start_of(first)?, end_of(last)?))
}

fn quarter_range(year: i32, quarter: u32) -> Option<DateRange> {
    if !(1..=4).contains(&quarter) {
        return None;
    }
    let first_month = quarter.checked_sub(1)?.checked_mul(3)?.checked_add(1)?;
    let first = NaiveDate::from_ymd_opt(year, first_month, 1)?;
    let last = last_day_of_month(year, first_month.checked_add(2)?)?;
    Some(DateRange::between(start_of(first)?, end_of(last)?))
}
