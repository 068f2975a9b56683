//! reportql CLI entry point.
//!
//! Provides `parse`, `summary`, `lexicon` and `check-config` subcommands.
//! JSON goes to stdout; logs go to stderr (or a rotating file with `--log-dir`).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use reportql::config::{self, Config};
use reportql::logging;
use reportql::template::SavedReport;
use reportql::QueryParser;

/// Compile natural-language report requests into query plans.
#[derive(Parser)]
#[command(name = "reportql", version, about)]
struct Cli {
    /// Config file (default: ~/.reportql/config.toml, optional).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write JSON logs to this directory in addition to stderr.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Compile a query and print the report specification as JSON.
    Parse {
        /// The natural-language request.
        query: String,
        /// Evaluate relative dates against this RFC 3339 instant.
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
        /// Print single-line JSON.
        #[arg(long)]
        compact: bool,
        /// Wrap the report in a saved-report envelope with this name.
        #[arg(long)]
        save_as: Option<String>,
        /// Tag for the saved-report envelope (repeatable).
        #[arg(long = "tag", requires = "save_as")]
        tags: Vec<String>,
    },
    /// Compile a query and print a one-line summary for confirmation.
    Summary {
        /// The natural-language request.
        query: String,
        /// Evaluate relative dates against this RFC 3339 instant.
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
    },
    /// Print the effective lexicon (built-ins plus configured extensions).
    Lexicon,
    /// Validate the configuration file and lexicon extensions.
    CheckConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_cli_config(cli.config.as_deref())?;

    let _logging_guard = match &cli.log_dir {
        Some(dir) => Some(logging::init_file(dir, &config.logging.level)?),
        None => {
            logging::init_cli(&config.logging.level);
            None
        }
    };

    let parser = QueryParser::from_config(&config).context("invalid lexicon configuration")?;

    match cli.command {
        Command::Parse {
            query,
            now,
            compact,
            save_as,
            tags,
        } => {
            let report = parser.parse_at(&query, now.unwrap_or_else(Utc::now));
            let pretty = config.output.pretty && !compact;
            match save_as {
                Some(name) => {
                    let saved = SavedReport::new(&name, &query, &tags, report);
                    info!(id = %saved.id, name = %saved.name, "saved-report envelope built");
                    print_json(&saved, pretty)
                }
                None => print_json(&report, pretty),
            }
        }
        Command::Summary { query, now } => {
            let report = parser.parse_at(&query, now.unwrap_or_else(Utc::now));
            println!("{}", report.summary());
            Ok(())
        }
        Command::Lexicon => print_json(parser.lexicon(), config.output.pretty),
        Command::CheckConfig => {
            let lexicon = parser.lexicon();
            println!(
                "Configuration is valid: {} counterparties, {} products, {} traders, {} desks, {} metric groups (match mode: {:?})",
                lexicon.counterparties.len(),
                lexicon.products.len(),
                lexicon.traders.len(),
                lexicon.desks.len(),
                lexicon.metrics.len(),
                parser.match_mode(),
            );
            Ok(())
        }
    }
}

/// Load config from an explicit path (must exist) or the optional default.
fn load_cli_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            let mut config = config::load_config(path)?;
            config.apply_overrides(|key| std::env::var(key).ok());
            Ok(config)
        }
        None => match config::default_config_path() {
            Ok(default_path) => config::load_or_default(&default_path),
            Err(e) => {
                warn!(error = %e, "cannot resolve default config path, using defaults");
                let mut config = Config::default();
                config.apply_overrides(|key| std::env::var(key).ok());
                Ok(config)
            }
        },
    }
}

/// Parse an RFC 3339 timestamp into UTC.
fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
