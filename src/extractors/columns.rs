//! Output shaping detectors: metrics, grouping, sort, limit, aggregations.

use regex::Regex;

use super::{compile, ExtractContext};
use crate::lexicon::default_columns;
use crate::report::{Aggregation, ReportType, SortDirection, SortSpec};

/// Grouping phrases, checked in this order.
const GROUPINGS: &[(&str, &str)] = &[
    ("by counterparty", "counterparty"),
    ("by product", "product_type"),
    ("by trader", "trader"),
    ("by desk", "desk"),
    ("by sector", "sector"),
    ("by date", "trade_date"),
];

/// Sort fields, first present keyword wins.
const SORT_FIELDS: &[(&str, &str)] = &[
    ("volume", "amount_ngn"),
    ("exposure", "current_exposure"),
    ("date", "trade_date"),
];

/// Aggregation verbs and their trigger keywords. Checks are independent.
const AGGREGATIONS: &[(Aggregation, &[&str])] = &[
    (Aggregation::Sum, &["total", "sum"]),
    (Aggregation::Avg, &["average", "avg"]),
    (Aggregation::Count, &["count"]),
    (Aggregation::Max, &["maximum", "max"]),
    (Aggregation::Min, &["minimum", "min"]),
];

/// Detects output columns and result shaping from the normalized query.
#[derive(Debug, Clone)]
pub struct ColumnDetector {
    top_re: Option<Regex>,
    first_re: Option<Regex>,
}

impl Default for ColumnDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnDetector {
    /// Compile the limit patterns.
    pub fn new() -> Self {
        Self {
            top_re: compile(r"top\s+(\d+)"),
            first_re: compile(r"first\s+(\d+)"),
        }
    }

    /// Union of metric fields for every keyword present, or the report
    /// type's default column list when no keyword matched.
    pub fn metrics(&self, ctx: &ExtractContext<'_>, report_type: ReportType) -> Vec<String> {
        let mut metrics: Vec<String> = Vec::new();
        for group in &ctx.lexicon.metrics {
            if !ctx.has(&group.surface) {
                continue;
            }
            for field in &group.values {
                if !metrics.contains(field) {
                    metrics.push(field.clone());
                }
            }
        }

        if metrics.is_empty() {
            metrics = default_columns(report_type)
                .iter()
                .map(|c| (*c).to_owned())
                .collect();
        }
        metrics
    }

    /// Group-by fields in check order; `None` when no phrase matched.
    pub fn group_by(&self, ctx: &ExtractContext<'_>) -> Option<Vec<String>> {
        let fields: Vec<String> = GROUPINGS
            .iter()
            .filter(|(phrase, _)| ctx.has(phrase))
            .map(|(_, field)| (*field).to_owned())
            .collect();
        (!fields.is_empty()).then_some(fields)
    }

    /// Sort spec, only when the query says "sorted by" or "order by".
    pub fn sort_by(&self, ctx: &ExtractContext<'_>) -> Option<SortSpec> {
        if !ctx.has_any(&["sorted by", "order by"]) {
            return None;
        }
        let field = SORT_FIELDS
            .iter()
            .find(|(keyword, _)| ctx.has(keyword))
            .map(|(_, field)| (*field).to_owned())?;
        let direction = if ctx.has("ascending") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        Some(SortSpec { field, direction })
    }

    /// Row limit from "top N", else "first N". Zero is not a limit.
    pub fn limit(&self, text: &str) -> Option<u32> {
        let caps = [&self.top_re, &self.first_re]
            .into_iter()
            .flatten()
            .find_map(|re| re.captures(text))?;
        caps.get(1)?
            .as_str()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
    }

    /// Aggregation verbs present in the query, in canonical order.
    pub fn aggregations(&self, ctx: &ExtractContext<'_>) -> Vec<Aggregation> {
        AGGREGATIONS
            .iter()
            .filter(|(_, keywords)| ctx.has_any(keywords))
            .map(|(aggregation, _)| *aggregation)
            .collect()
    }
}
