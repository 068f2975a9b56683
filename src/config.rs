//! Configuration loading and validation.
//!
//! reportql reads an optional `config.toml` (default `~/.reportql/config.toml`).
//! Every section has defaults, so a missing file or an empty file yields a
//! working configuration. `REPORTQL_MATCH_MODE` overrides `[matching] mode`.
//!
//! Precedence: env vars > config file > defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::matching::MatchMode;

/// Environment variable overriding the keyword match mode.
pub const MATCH_MODE_ENV: &str = "REPORTQL_MATCH_MODE";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keyword matching behaviour.
    pub matching: MatchingConfig,

    /// JSON output formatting.
    pub output: OutputConfig,

    /// Log verbosity for the CLI.
    pub logging: LoggingConfig,

    /// Operator-supplied dictionary entries.
    pub lexicon: LexiconConfig,
}

/// Keyword matching settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingConfig {
    /// Substring (default) or word-boundary matching.
    #[serde(default)]
    pub mode: MatchMode,
}

/// Output formatting settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Lexicon extension tables appended to the built-in dictionaries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Additional counterparty surface strings.
    pub counterparties: Vec<String>,
    /// Additional product synonyms (surface → canonical products).
    pub products: BTreeMap<String, Vec<String>>,
    /// Additional trader aliases (surface → canonical name).
    pub traders: BTreeMap<String, String>,
    /// Additional desk aliases (surface → canonical name).
    pub desks: BTreeMap<String, String>,
    /// Additional metric keyword groups (keyword → fields).
    pub metrics: BTreeMap<String, Vec<String>>,
}

impl LexiconConfig {
    /// Whether no extension entries are configured.
    pub fn is_empty(&self) -> bool {
        self.counterparties.is_empty()
            && self.products.is_empty()
            && self.traders.is_empty()
            && self.desks.is_empty()
            && self.metrics.is_empty()
    }
}

// Default value functions for serde

fn default_pretty() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".to_owned()
}

impl Config {
    /// Parse a TOML string into config.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or has wrongly typed fields.
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str(toml_str).context("failed to parse config TOML")
    }

    /// Apply environment overrides (env > config > defaults).
    ///
    /// Takes a resolver function so tests never mutate process environment.
    pub fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env(MATCH_MODE_ENV) {
            match MatchMode::from_name(&v) {
                Some(mode) => self.matching.mode = mode,
                None => tracing::warn!(
                    var = MATCH_MODE_ENV,
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
    }
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config at {}: {e}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config at {}: {e}", path.display()))?;
    Ok(config)
}

/// Load configuration from `path`, or defaults when the file does not exist,
/// then apply environment overrides.
///
/// # Errors
///
/// Returns an error if an existing file cannot be read or parsed.
pub fn load_or_default(path: &Path) -> anyhow::Result<Config> {
    let mut config = if path.exists() {
        tracing::debug!(path = %path.display(), "loading config from file");
        load_config(path)?
    } else {
        tracing::debug!(path = %path.display(), "no config file found, using defaults");
        Config::default()
    };
    config.apply_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

/// Load the default config (`~/.reportql/config.toml`), falling back to
/// defaults when absent.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or an existing
/// file is invalid.
pub fn load_default_config() -> anyhow::Result<Config> {
    load_or_default(&default_config_path()?)
}

/// Resolve the default config directory (`~/.reportql/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".reportql"))
}

/// Resolve the default config file path (`~/.reportql/config.toml`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
