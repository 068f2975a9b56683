//! Report-type classifier.
//!
//! Priority order, first match wins:
//! 1. transactions  2. counterparties  3. exposure
//! 4. pnl  5. compliance  6. liquidity  7. generic (fallback)
//!
//! A query mentioning both "trade" and "exposure" is a transactions report
//! because that rule is checked first.

use crate::matching::Matcher;
use crate::report::ReportType;

/// Ordered classifier rules: report type and the keywords that select it.
pub const RULES: &[(ReportType, &[&str])] = &[
    (
        ReportType::Transactions,
        &["transaction", "transactions", "trade", "trades"],
    ),
    (
        ReportType::Counterparties,
        &["counterparty", "counterparties", "client", "clients"],
    ),
    (ReportType::Exposure, &["exposure", "exposures", "credit"]),
    (ReportType::Pnl, &["pnl", "p&l", "profit"]),
    (ReportType::Compliance, &["compliance", "kyc", "aml"]),
    (ReportType::Liquidity, &["liquidity", "cash"]),
];

/// Classify a normalized query into a report domain.
pub fn classify(text: &str, matcher: Matcher) -> ReportType {
    RULES
        .iter()
        .find(|(_, keywords)| matcher.contains_any(text, keywords))
        .map_or(ReportType::Generic, |(report_type, _)| *report_type)
}
