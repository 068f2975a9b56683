//! Report name synthesis.
//!
//! Parts, joined with `" - "`:
//! 1. capitalized report type (omitted for generic)
//! 2. first counterparty, if a counterparty filter exists
//! 3. products joined by ", ", if a product filter exists
//! 4. date context, only when a date range resolved
//!
//! The date context re-tests the raw query against its own phrase list
//! ("this month", "last month", "this quarter", "this year") and otherwise
//! reads "Custom Period". It does not look at which date rule fired, so a
//! range resolved from "last 30 days" is labelled "Custom Period".

use crate::extractors::entities::{COUNTERPARTY_FIELD, PRODUCT_FIELD};
use crate::matching::Matcher;
use crate::report::{DateRange, Filter, ReportType};

/// Name used when no part applies.
pub const FALLBACK_NAME: &str = "Custom Report";

const DATE_LABELS: &[(&str, &str)] = &[
    ("this month", "This Month"),
    ("last month", "Last Month"),
    ("this quarter", "This Quarter"),
    ("this year", "This Year"),
];

/// Build the display name for a parsed report.
pub fn synthesize_name(
    raw_query: &str,
    matcher: Matcher,
    report_type: ReportType,
    filters: &[Filter],
    date_range: &DateRange,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if report_type != ReportType::Generic {
        parts.push(report_type.label());
    }

    if let Some(counterparty) = first_filter(filters, COUNTERPARTY_FIELD)
        .and_then(|f| f.value.first_text())
    {
        parts.push(counterparty.to_owned());
    }

    if let Some(products) = first_filter(filters, PRODUCT_FIELD) {
        let names = products.value.texts();
        if !names.is_empty() {
            parts.push(names.join(", "));
        }
    }

    if !date_range.is_all_time() {
        let label = DATE_LABELS
            .iter()
            .find(|(phrase, _)| matcher.contains(raw_query, phrase))
            .map_or("Custom Period", |(_, label)| *label);
        parts.push(label.to_owned());
    }

    if parts.is_empty() {
        FALLBACK_NAME.to_owned()
    } else {
        parts.join(" - ")
    }
}

fn first_filter<'a>(filters: &'a [Filter], field: &str) -> Option<&'a Filter> {
    filters.iter().find(|f| f.field == field)
}
