//! Deterministic extractors run against the normalized query.
//!
//! Each extractor reads the same [`ExtractContext`] and contributes its part
//! of the [`ParsedReport`](crate::report::ParsedReport) independently. Nothing
//! here fails: an extractor either finds a match or contributes nothing.
//!
//! - [`report_type`]: first-match domain classifier
//! - [`entities`]: counterparty, product, trader and desk filters
//! - [`dates`]: precedence ladder of date phrases
//! - [`numeric`]: magnitude thresholds with b/m/k scaling
//! - [`status`]: risk, settlement and lifecycle filters
//! - [`columns`]: metrics, grouping, sort, limit and aggregations

use regex::Regex;

use crate::lexicon::Lexicon;
use crate::matching::Matcher;
use crate::report::Filter;

pub mod columns;
pub mod dates;
pub mod entities;
pub mod numeric;
pub mod report_type;
pub mod status;

/// Everything an extractor may read for one parse.
#[derive(Debug, Clone, Copy)]
pub struct ExtractContext<'a> {
    /// Query exactly as the caller supplied it.
    pub raw: &'a str,
    /// Lower-cased query with whitespace runs collapsed.
    pub text: &'a str,
    /// Dictionaries for entity and metric lookup.
    pub lexicon: &'a Lexicon,
    /// Keyword matcher honouring the configured match mode.
    pub matcher: Matcher,
}

impl ExtractContext<'_> {
    /// Whether the normalized query contains `keyword`.
    pub fn has(&self, keyword: &str) -> bool {
        self.matcher.contains(self.text, keyword)
    }

    /// Whether the normalized query contains any of `keywords`.
    pub fn has_any(&self, keywords: &[&str]) -> bool {
        self.matcher.contains_any(self.text, keywords)
    }
}

/// An extractor that turns query text into zero or more filters.
///
/// Implementations must be `Send + Sync` so a parser can be shared across
/// threads without locking.
pub trait FilterExtractor: Send + Sync {
    /// Stable identifier used in trace output.
    fn name(&self) -> &str;

    /// Produce filters for the query, in the order they were found.
    fn extract(&self, ctx: &ExtractContext<'_>) -> Vec<Filter>;
}

/// Lower-case the query and collapse whitespace runs to single spaces.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Compile a built-in pattern, logging instead of panicking on failure.
pub(crate) fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "failed to compile extractor pattern");
            None
        }
    }
}
