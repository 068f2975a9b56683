//! Keyword matching primitive shared by every extractor.
//!
//! Two modes:
//! - **Substring** (default): a keyword matches wherever it occurs, including
//!   inside longer words ("fx" in "fxd", "count" in "counterparty").
//! - **Word boundary**: the characters on either side of an occurrence must
//!   not be alphanumeric.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// How keywords are located in the normalized query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Plain substring containment.
    #[default]
    Substring,
    /// Occurrence must start and end on a word boundary.
    WordBoundary,
}

impl MatchMode {
    /// Parse a mode name as used in config files and env overrides.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "substring" => Some(Self::Substring),
            "word_boundary" | "word-boundary" | "word" => Some(Self::WordBoundary),
            _ => None,
        }
    }
}

/// Keyword matcher bound to a [`MatchMode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    mode: MatchMode,
}

impl Matcher {
    /// Create a matcher for the given mode.
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    /// The configured mode.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether `needle` occurs in `haystack` under this mode.
    pub fn contains(&self, haystack: &str, needle: &str) -> bool {
        !needle.is_empty() && self.occurrences(haystack, needle).next().is_some()
    }

    /// Whether any of `needles` occurs in `haystack`.
    pub fn contains_any(&self, haystack: &str, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.contains(haystack, n))
    }

    /// Byte spans of every accepted occurrence of `needle`.
    pub fn occurrences<'a>(
        &self,
        haystack: &'a str,
        needle: &'a str,
    ) -> impl Iterator<Item = Range<usize>> + 'a {
        let mode = self.mode;
        haystack
            .match_indices(needle)
            .map(|(start, m)| start..start.saturating_add(m.len()))
            .filter(move |span| match mode {
                MatchMode::Substring => true,
                MatchMode::WordBoundary => on_word_boundary(haystack, span),
            })
    }
}

/// Whether the span is flanked by non-alphanumeric characters (or the ends).
fn on_word_boundary(haystack: &str, span: &Range<usize>) -> bool {
    let before = haystack[..span.start].chars().next_back();
    let after = haystack[span.end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
