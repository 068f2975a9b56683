//! Parse orchestrator.
//!
//! Normalizes the query once, runs every extractor against the same text,
//! and assembles a [`ParsedReport`]. Only name synthesis reads the output of
//! other stages. Parsing never fails; unrecognised input degrades to a
//! generic, all-time report with no filters.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::Config;
use crate::extractors::columns::ColumnDetector;
use crate::extractors::dates::DateRangeResolver;
use crate::extractors::entities::EntityExtractor;
use crate::extractors::numeric::NumericFilterExtractor;
use crate::extractors::status::StatusFilterExtractor;
use crate::extractors::{normalize, report_type, ExtractContext, FilterExtractor};
use crate::lexicon::{Lexicon, LexiconError};
use crate::matching::{MatchMode, Matcher};
use crate::naming::synthesize_name;
use crate::report::ParsedReport;

/// Natural-language report query compiler.
///
/// Holds read-only dictionaries and compiled patterns; safe to share across
/// threads and to call concurrently.
pub struct QueryParser {
    lexicon: Arc<Lexicon>,
    matcher: Matcher,
    dates: DateRangeResolver,
    columns: ColumnDetector,
    /// Run in order: entities, numeric, status.
    filter_extractors: Vec<Box<dyn FilterExtractor>>,
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryParser {
    /// Parser over the built-in lexicon with substring matching.
    pub fn new() -> Self {
        Self::with_lexicon(Arc::new(Lexicon::builtin().clone()), MatchMode::Substring)
    }

    /// Parser over a caller-supplied lexicon and match mode.
    pub fn with_lexicon(lexicon: Arc<Lexicon>, mode: MatchMode) -> Self {
        let matcher = Matcher::new(mode);
        Self {
            lexicon,
            matcher,
            dates: DateRangeResolver::new(matcher),
            columns: ColumnDetector::new(),
            filter_extractors: vec![
                Box::new(EntityExtractor),
                Box::new(NumericFilterExtractor::new()),
                Box::new(StatusFilterExtractor),
            ],
        }
    }

    /// Parser built from configuration: lexicon extensions and match mode.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError`] if the configured lexicon extensions are invalid.
    pub fn from_config(config: &Config) -> Result<Self, LexiconError> {
        let lexicon = if config.lexicon.is_empty() {
            Lexicon::builtin().clone()
        } else {
            Lexicon::with_extensions(&config.lexicon)?
        };
        Ok(Self::with_lexicon(Arc::new(lexicon), config.matching.mode))
    }

    /// The dictionaries this parser matches against.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// The configured keyword match mode.
    pub fn match_mode(&self) -> MatchMode {
        self.matcher.mode()
    }

    /// Compile `query` relative to the current time.
    pub fn parse(&self, query: &str) -> ParsedReport {
        self.parse_at(query, Utc::now())
    }

    /// Compile `query` relative to a fixed `now`.
    pub fn parse_at(&self, query: &str, now: DateTime<Utc>) -> ParsedReport {
        let text = normalize(query);
        let ctx = ExtractContext {
            raw: query,
            text: &text,
            lexicon: &self.lexicon,
            matcher: self.matcher,
        };

        let report_type = report_type::classify(ctx.text, self.matcher);

        let mut filters = Vec::new();
        for extractor in &self.filter_extractors {
            let found = extractor.extract(&ctx);
            if !found.is_empty() {
                debug!(extractor = extractor.name(), count = found.len(), "filters extracted");
            }
            filters.extend(found);
        }

        let date_range = self.dates.resolve(ctx.text, now);
        let metrics = self.columns.metrics(&ctx, report_type);
        let group_by = self.columns.group_by(&ctx);
        let sort_by = self.columns.sort_by(&ctx);
        let limit = self.columns.limit(ctx.text);
        let aggregations = self.columns.aggregations(&ctx);

        let report_name =
            synthesize_name(query, self.matcher, report_type, &filters, &date_range);

        debug!(
            report_type = %report_type,
            filters = filters.len(),
            metrics = metrics.len(),
            all_time = date_range.is_all_time(),
            "query compiled"
        );

        ParsedReport {
            report_type,
            report_name,
            filters,
            metrics,
            group_by,
            sort_by,
            limit,
            date_range,
            aggregations,
        }
    }
}
