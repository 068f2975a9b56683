//! Output data model for compiled report queries.
//!
//! A [`ParsedReport`] is the only artifact the compiler produces. It is built
//! once per parse, owned by the caller, and serializes to the camelCase JSON
//! shape consumed by the report execution engine and the template store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Report type
// ---------------------------------------------------------------------------

/// Report domain selected by the report-type classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    /// Trade and transaction listings.
    Transactions,
    /// Counterparty / client listings.
    Counterparties,
    /// Credit exposure and limit utilization.
    Exposure,
    /// Profit and loss.
    Pnl,
    /// KYC / AML compliance.
    Compliance,
    /// Cash and liquidity positions.
    Liquidity,
    /// No domain keyword recognised.
    Generic,
}

impl ReportType {
    /// Lower-case identifier, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Counterparties => "counterparties",
            Self::Exposure => "exposure",
            Self::Pnl => "pnl",
            Self::Compliance => "compliance",
            Self::Liquidity => "liquidity",
            Self::Generic => "generic",
        }
    }

    /// Display form with the first letter capitalized (e.g. `"Pnl"`).
    pub fn label(self) -> String {
        capitalize(self.as_str())
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Comparison applied by a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    /// Field equals the scalar value.
    Equals,
    /// Field equals any element of the list value.
    In,
    /// Field contains the text value.
    Contains,
    /// Field is strictly greater than the numeric value.
    GreaterThan,
    /// Field is strictly less than the numeric value.
    LessThan,
    /// Field lies within a two-element range.
    Between,
}

impl FilterOperator {
    /// Serialized operator name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::In => "in",
            Self::Contains => "contains",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::Between => "between",
        }
    }
}

/// Right-hand side of a [`Filter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A numeric threshold.
    Number(f64),
    /// A single categorical value.
    Text(String),
    /// Several categorical values (used with [`FilterOperator::In`]).
    List(Vec<String>),
}

impl FilterValue {
    /// First textual value, if any. Lists yield their first element.
    pub fn first_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t.as_str()),
            Self::List(items) => items.first().map(String::as_str),
            Self::Number(_) => None,
        }
    }

    /// All textual values as a slice-like vector. Numbers yield nothing.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Self::Text(t) => vec![t.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
            Self::Number(_) => Vec::new(),
        }
    }

    /// Numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(t) => f.write_str(t),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// A single predicate `{field, operator, value}`.
///
/// Consumers treat the filter list as an AND of independent predicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Target field name.
    pub field: String,
    /// Comparison to apply.
    pub operator: FilterOperator,
    /// Comparison operand.
    pub value: FilterValue,
}

impl Filter {
    /// Build an `equals` filter on a text value.
    pub fn equals(field: &str, value: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            operator: FilterOperator::Equals,
            value: FilterValue::Text(value.into()),
        }
    }

    /// Build a filter from entity matches.
    ///
    /// One value gives `equals`, several give `in`, none gives `None`.
    pub fn one_or_many(field: &str, mut values: Vec<String>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(|v| Self::equals(field, v)),
            _ => Some(Self {
                field: field.to_owned(),
                operator: FilterOperator::In,
                value: FilterValue::List(values),
            }),
        }
    }

    /// Build a `greaterThan` filter on a numeric threshold.
    pub fn greater_than(field: &str, value: f64) -> Self {
        Self {
            field: field.to_owned(),
            operator: FilterOperator::GreaterThan,
            value: FilterValue::Number(value),
        }
    }

    /// Build a `lessThan` filter on a numeric threshold.
    pub fn less_than(field: &str, value: f64) -> Self {
        Self {
            field: field.to_owned(),
            operator: FilterOperator::LessThan,
            value: FilterValue::Number(value),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator.as_str(), self.value)
    }
}

// ---------------------------------------------------------------------------
// Sorting, dates, aggregations
// ---------------------------------------------------------------------------

/// Sort direction. Defaults to descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    #[default]
    Desc,
}

/// Sort field and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to sort on.
    pub field: String,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Inclusive time window. Both ends `None` means "all time".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Window start, if bounded.
    pub start: Option<DateTime<Utc>>,
    /// Window end, if bounded.
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// The unbounded range.
    pub fn all_time() -> Self {
        Self::default()
    }

    /// Bounded range. Callers guarantee `start <= end`.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether neither end is bounded.
    pub fn is_all_time(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Summary statistic requested from the execution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Sum of values.
    Sum,
    /// Arithmetic mean.
    Avg,
    /// Row count.
    Count,
    /// Maximum value.
    Max,
    /// Minimum value.
    Min,
}

// ---------------------------------------------------------------------------
// ParsedReport
// ---------------------------------------------------------------------------

/// Structured report specification compiled from free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReport {
    /// Report domain.
    pub report_type: ReportType,
    /// Synthesized display name; never empty.
    pub report_name: String,
    /// Predicates in extraction order (entities, numeric, status).
    pub filters: Vec<Filter>,
    /// Output columns, deduplicated in first-seen order.
    pub metrics: Vec<String>,
    /// Group-by fields; absent when no grouping phrase matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<Vec<String>>,
    /// Sort specification; absent unless "sorted by" / "order by" appears.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortSpec>,
    /// Row limit from "top N" / "first N".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Resolved time window.
    pub date_range: DateRange,
    /// Requested aggregation verbs, in canonical order.
    pub aggregations: Vec<Aggregation>,
}

impl ParsedReport {
    /// First filter on `field`, if any.
    pub fn filter(&self, field: &str) -> Option<&Filter> {
        self.filters.iter().find(|f| f.field == field)
    }

    /// One-line confirmation summary for display before execution.
    pub fn summary(&self) -> String {
        let mut out = self.report_name.clone();

        if !self.filters.is_empty() {
            let rendered: Vec<String> = self.filters.iter().map(ToString::to_string).collect();
            out.push_str(" | ");
            out.push_str(&rendered.join("; "));
        }

        out.push_str(" | ");
        match (self.date_range.start, self.date_range.end) {
            (Some(start), Some(end)) => {
                out.push_str(&format!(
                    "{} → {}",
                    start.format("%Y-%m-%d"),
                    end.format("%Y-%m-%d")
                ));
            }
            _ => out.push_str("all time"),
        }

        if let Some(limit) = self.limit {
            out.push_str(&format!(" | top {limit}"));
        }

        out
    }
}

/// Upper-case the first character, leaving the rest untouched.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-case the first character of each whitespace-separated word and
/// lower-case the rest.
pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| capitalize(&word.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}
