//! Numeric threshold extractor.
//!
//! Detects `<metric> <comparator> <number><suffix>` for trade volume/amount,
//! exposure, and utilization. Comparator words (greater, more, above, over,
//! exceed*, `>`) map to `greaterThan`; the raw `<` sign maps to `lessThan`.
//! Suffixes `b`/`m`/`k` (or `bn`, `billion`, `mn`, `million`, `thousand`)
//! scale by 1e9/1e6/1e3 and must end the word, so "100 by desk" stays 100.
//! Utilization is a plain percentage and is never scaled. Values that do not
//! fit a finite `f64` produce no filter.

use regex::Regex;

use super::{compile, ExtractContext, FilterExtractor};
use crate::report::Filter;

/// Field name for volume / amount thresholds.
pub const AMOUNT_FIELD: &str = "amount_ngn";
/// Field name for exposure thresholds.
pub const EXPOSURE_FIELD: &str = "current_exposure";
/// Field name for utilization thresholds.
pub const UTILIZATION_FIELD: &str = "utilization_pct";

const COMPARATOR: &str = r"(greater|more|above|over|exceed\w*|>|<)(?:\s+than)?";
const CURRENCY: &str = r"(?:₦|ngn)?\s*";
const AMOUNT: &str = r"(\d[\d,]*(?:\.\d+)?)";
const SUFFIX: &str = r"(?:\s*(billion|bn|b|million|mn|m|thousand|k)\b)?";

/// One metric pattern and how its captured number is interpreted.
#[derive(Debug, Clone)]
struct NumericPattern {
    field: &'static str,
    regex: Regex,
    scaled: bool,
}

/// Regex-based magnitude comparison extractor.
#[derive(Debug, Clone)]
pub struct NumericFilterExtractor {
    patterns: Vec<NumericPattern>,
}

impl Default for NumericFilterExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl NumericFilterExtractor {
    /// Compile the built-in volume, exposure and utilization patterns.
    pub fn new() -> Self {
        let specs = [
            (
                AMOUNT_FIELD,
                format!(r"(?:volume|amount)s?\s*(?:is\s+|of\s+)?{COMPARATOR}\s*{CURRENCY}{AMOUNT}{SUFFIX}"),
                true,
            ),
            (
                EXPOSURE_FIELD,
                format!(r"exposures?\s*(?:is\s+|of\s+)?{COMPARATOR}\s*{CURRENCY}{AMOUNT}{SUFFIX}"),
                true,
            ),
            (
                UTILIZATION_FIELD,
                format!(r"utili[sz]ation\s*(?:is\s+|of\s+)?{COMPARATOR}\s*{AMOUNT}\s*%?"),
                false,
            ),
        ];

        let patterns = specs
            .into_iter()
            .filter_map(|(field, pattern, scaled)| {
                compile(&pattern).map(|regex| NumericPattern {
                    field,
                    regex,
                    scaled,
                })
            })
            .collect();

        Self { patterns }
    }

    fn match_pattern(pattern: &NumericPattern, text: &str) -> Option<Filter> {
        let caps = pattern.regex.captures(text)?;
        let comparator = caps.get(1)?.as_str();
        let number: f64 = caps.get(2)?.as_str().replace(',', "").parse().ok()?;

        let value = if pattern.scaled {
            number * suffix_multiplier(caps.get(3).map(|m| m.as_str()))
        } else {
            number
        };
        if !value.is_finite() {
            return None;
        }

        Some(if comparator == "<" {
            Filter::less_than(pattern.field, value)
        } else {
            Filter::greater_than(pattern.field, value)
        })
    }
}

impl FilterExtractor for NumericFilterExtractor {
    fn name(&self) -> &str {
        "extractor:numeric"
    }

    fn extract(&self, ctx: &ExtractContext<'_>) -> Vec<Filter> {
        self.patterns
            .iter()
            .filter_map(|pattern| Self::match_pattern(pattern, ctx.text))
            .collect()
    }
}

/// Multiplier for a magnitude suffix; absent or unknown leaves the value unscaled.
pub fn suffix_multiplier(suffix: Option<&str>) -> f64 {
    match suffix {
        Some("b" | "bn" | "billion") => 1e9,
        Some("m" | "mn" | "million") => 1e6,
        Some("k" | "thousand") => 1e3,
        _ => 1.0,
    }
}
