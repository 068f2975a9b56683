//! Saved-report envelope handed to the template store.
//!
//! The store persists the compiled report together with the raw query, a
//! display name and free-form tags. This module only builds the envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::report::ParsedReport;

/// A compiled report packaged for reuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedReport {
    /// Unique template identifier.
    pub id: Uuid,
    /// Display name chosen by the user.
    pub name: String,
    /// Query text exactly as entered.
    pub query: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// When the envelope was created.
    pub created_at: DateTime<Utc>,
    /// The compiled report, stored verbatim.
    pub config: ParsedReport,
}

impl SavedReport {
    /// Package a compiled report.
    ///
    /// An empty or whitespace-only `name` falls back to the report's
    /// synthesized name. Tags are trimmed, empty tags dropped, and duplicates
    /// removed keeping first occurrence.
    pub fn new(name: &str, query: &str, tags: &[String], config: ParsedReport) -> Self {
        let name = match name.trim() {
            "" => config.report_name.clone(),
            trimmed => trimmed.to_owned(),
        };

        let mut clean_tags: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.trim();
            if !tag.is_empty() && !clean_tags.iter().any(|t| t == tag) {
                clean_tags.push(tag.to_owned());
            }
        }

        Self {
            id: Uuid::new_v4(),
            name,
            query: query.to_owned(),
            tags: clean_tags,
            created_at: Utc::now(),
            config,
        }
    }
}
