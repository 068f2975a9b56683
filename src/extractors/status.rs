//! Categorical status filters: risk category, settlement status, lifecycle.
//!
//! Pure keyword lookup. Every recognised keyword appends one `equals`
//! filter, so "active, high risk" yields two filters. "active" is ignored
//! whenever "inactive" appears anywhere in the query.

use super::{ExtractContext, FilterExtractor};
use crate::report::Filter;

/// Field name for risk category filters.
pub const RISK_FIELD: &str = "risk_category";
/// Field name for settlement status filters.
pub const SETTLEMENT_FIELD: &str = "settlement_status";
/// Field name for lifecycle filters.
pub const LIFECYCLE_FIELD: &str = "status";

/// Keyword → (field, value), checked in order.
const KEYWORDS: &[(&str, &str, &str)] = &[
    ("high risk", RISK_FIELD, "High"),
    ("medium risk", RISK_FIELD, "Medium"),
    ("low risk", RISK_FIELD, "Low"),
    ("settled", SETTLEMENT_FIELD, "Settled"),
    ("pending", SETTLEMENT_FIELD, "Pending"),
    ("failed", SETTLEMENT_FIELD, "Failed"),
];

/// Keyword-based status filter extractor.
pub struct StatusFilterExtractor;

impl FilterExtractor for StatusFilterExtractor {
    fn name(&self) -> &str {
        "extractor:status"
    }

    fn extract(&self, ctx: &ExtractContext<'_>) -> Vec<Filter> {
        let mut filters: Vec<Filter> = KEYWORDS
            .iter()
            .filter(|(keyword, _, _)| ctx.has(keyword))
            .map(|(_, field, value)| Filter::equals(field, *value))
            .collect();

        if ctx.has("active") && !ctx.text.contains("inactive") {
            filters.push(Filter::equals(LIFECYCLE_FIELD, "Active"));
        }

        filters
    }
}
