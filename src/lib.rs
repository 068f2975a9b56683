//! reportql: a deterministic natural-language report query compiler.
//!
//! Turns a free-text request such as "Show me all FX Spot transactions with
//! FirstBank in the last 30 days" into a [`ParsedReport`]: report domain,
//! filters, metrics, grouping, sorting, limit, date range, aggregations and
//! a display name. Every rule is a hand-built dictionary, regex, or ordered
//! precedence list; there is no statistical language model.
//!
//! See `DESIGN.md` for the architecture and rule-ordering decisions.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::LazyLock;

pub mod config;
pub mod lexicon;
pub mod logging;
pub mod matching;
pub mod report;

pub mod extractors;
pub mod naming;
pub mod parser;

pub mod template;

pub use parser::QueryParser;
pub use report::{
    Aggregation, DateRange, Filter, FilterOperator, FilterValue, ParsedReport, ReportType,
    SortDirection, SortSpec,
};

static DEFAULT_PARSER: LazyLock<QueryParser> = LazyLock::new(QueryParser::new);

/// Compile `query` with the built-in lexicon and substring matching.
pub fn parse(query: &str) -> ParsedReport {
    DEFAULT_PARSER.parse(query)
}
