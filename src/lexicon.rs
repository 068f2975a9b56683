//! Static dictionaries mapping surface strings to canonical entities.
//!
//! The built-in tables are read-only constants shared by every parse. Operators
//! may append entries through the `[lexicon]` config section, which produces an
//! owned [`Lexicon`] validated once at load time.

use std::sync::LazyLock;

use serde::Serialize;

use crate::config::LexiconConfig;
use crate::report::ReportType;

// ---------------------------------------------------------------------------
// Built-in tables
// ---------------------------------------------------------------------------

/// Counterparty surface strings. Title-cased when placed in a filter.
const COUNTERPARTIES: &[&str] = &[
    "firstbank",
    "access bank",
    "zenith bank",
    "gtbank",
    "uba",
    "stanbic ibtc",
    "fidelity bank",
    "union bank",
    "ecobank",
    "sterling bank",
    "wema bank",
    "fcmb",
    "citibank",
    "standard chartered",
    "dangote cement",
    "mtn nigeria",
    "nnpc",
];

/// Product synonyms expanding to one or more canonical product names.
const PRODUCTS: &[(&str, &[&str])] = &[
    ("fx spot", &["FX Spot"]),
    ("spot", &["FX Spot"]),
    ("fx forward", &["FX Forward"]),
    ("forward", &["FX Forward"]),
    ("fx swap", &["FX Swap"]),
    ("swap", &["FX Swap"]),
    ("ndf", &["NDF"]),
    ("fx", &["FX Spot", "FX Forward"]),
    ("treasury bill", &["Treasury Bills"]),
    ("t-bill", &["Treasury Bills"]),
    ("bond", &["FGN Bonds"]),
    ("money market", &["Money Market"]),
    ("placement", &["Money Market"]),
];

const TRADERS: &[(&str, &str)] = &[
    ("adebayo", "Adebayo Ogunleye"),
    ("chioma", "Chioma Eze"),
    ("emeka", "Emeka Nwosu"),
    ("funke", "Funke Adeyemi"),
    ("ibrahim", "Ibrahim Musa"),
];

const DESKS: &[(&str, &str)] = &[
    ("fx desk", "FX Desk"),
    ("money market desk", "Money Market Desk"),
    ("fixed income", "Fixed Income Desk"),
    ("treasury desk", "Treasury Desk"),
    ("derivatives", "Derivatives Desk"),
];

/// Metric keyword groups: keyword presence unions the field set into metrics.
const METRIC_GROUPS: &[(&str, &[&str])] = &[
    ("volume", &["amount_ngn", "trade_count"]),
    ("amount", &["amount_ngn"]),
    (
        "exposure",
        &["current_exposure", "credit_limit", "utilization_pct"],
    ),
    ("utilization", &["utilization_pct"]),
    ("credit limit", &["credit_limit"]),
    ("pnl", &["realized_pnl", "unrealized_pnl", "total_pnl"]),
    ("p&l", &["realized_pnl", "unrealized_pnl", "total_pnl"]),
    ("profit", &["total_pnl"]),
    ("exchange rate", &["exchange_rate"]),
    ("risk", &["risk_category", "risk_score"]),
    ("settlement", &["settlement_status", "settlement_date"]),
    ("kyc", &["kyc_status", "last_review_date"]),
    ("cash", &["cash_balance", "net_position"]),
    (
        "liquidity",
        &["cash_balance", "inflows", "outflows", "net_position"],
    ),
];

/// Default output columns for a report type when no metric keyword matched.
pub fn default_columns(report_type: ReportType) -> &'static [&'static str] {
    match report_type {
        ReportType::Transactions => &[
            "trade_id",
            "trade_date",
            "counterparty",
            "product_type",
            "amount_ngn",
            "exchange_rate",
            "status",
        ],
        ReportType::Counterparties => &[
            "counterparty_name",
            "sector",
            "credit_rating",
            "credit_limit",
            "current_exposure",
            "risk_category",
        ],
        ReportType::Exposure => &[
            "counterparty",
            "credit_limit",
            "current_exposure",
            "utilization_pct",
            "risk_category",
        ],
        ReportType::Pnl => &[
            "trade_date",
            "product_type",
            "desk",
            "realized_pnl",
            "unrealized_pnl",
            "total_pnl",
        ],
        ReportType::Compliance => &[
            "counterparty",
            "kyc_status",
            "aml_flag",
            "last_review_date",
            "risk_category",
        ],
        ReportType::Liquidity => &[
            "date",
            "currency",
            "cash_balance",
            "inflows",
            "outflows",
            "net_position",
        ],
        ReportType::Generic => &[],
    }
}

// ---------------------------------------------------------------------------
// Lexicon
// ---------------------------------------------------------------------------

/// Errors raised while validating lexicon extensions.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// A surface string was empty after trimming.
    #[error("empty surface string in lexicon table '{table}'")]
    EmptySurface {
        /// Table the entry belongs to.
        table: &'static str,
    },
    /// A canonical value was empty.
    #[error("empty canonical value for '{surface}' in lexicon table '{table}'")]
    EmptyCanonical {
        /// Table the entry belongs to.
        table: &'static str,
        /// Offending surface string.
        surface: String,
    },
}

/// Surface string mapped to a single canonical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alias {
    /// Lower-case text searched for in the query.
    pub surface: String,
    /// Canonical value emitted in filters.
    pub canonical: String,
}

/// Surface string mapped to several canonical values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expansion {
    /// Lower-case text searched for in the query.
    pub surface: String,
    /// Canonical values the surface expands to.
    pub values: Vec<String>,
}

/// Complete set of dictionaries used by one parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lexicon {
    /// Counterparty surface strings.
    pub counterparties: Vec<String>,
    /// Product synonyms.
    pub products: Vec<Expansion>,
    /// Trader aliases.
    pub traders: Vec<Alias>,
    /// Desk aliases.
    pub desks: Vec<Alias>,
    /// Metric keyword groups.
    pub metrics: Vec<Expansion>,
}

static BUILTIN: LazyLock<Lexicon> = LazyLock::new(Lexicon::from_tables);

impl Lexicon {
    /// Shared built-in lexicon.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    fn from_tables() -> Self {
        Self {
            counterparties: COUNTERPARTIES.iter().map(|s| (*s).to_owned()).collect(),
            products: PRODUCTS
                .iter()
                .map(|(surface, values)| expansion(surface, values))
                .collect(),
            traders: TRADERS.iter().map(|(s, c)| alias(s, c)).collect(),
            desks: DESKS.iter().map(|(s, c)| alias(s, c)).collect(),
            metrics: METRIC_GROUPS
                .iter()
                .map(|(surface, values)| expansion(surface, values))
                .collect(),
        }
    }

    /// Built-in tables plus operator-supplied extensions.
    ///
    /// Extension surfaces are lower-cased. A surface already present in a
    /// mapped table replaces that entry's canonical values in place; new
    /// surfaces are appended after the built-ins.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError`] on empty surface strings or empty canonical values.
    pub fn with_extensions(ext: &LexiconConfig) -> Result<Self, LexiconError> {
        let mut lexicon = Self::builtin().clone();

        for raw in &ext.counterparties {
            let surface = normalize_surface(raw, "counterparties")?;
            if !lexicon.counterparties.contains(&surface) {
                lexicon.counterparties.push(surface);
            }
        }

        for (raw, values) in &ext.products {
            let surface = normalize_surface(raw, "products")?;
            let values = checked_values(values, "products", &surface)?;
            upsert_expansion(&mut lexicon.products, surface, values);
        }

        for (raw, values) in &ext.metrics {
            let surface = normalize_surface(raw, "metrics")?;
            let values = checked_values(values, "metrics", &surface)?;
            upsert_expansion(&mut lexicon.metrics, surface, values);
        }

        for (raw, canonical) in &ext.traders {
            let entry = checked_alias(raw, canonical, "traders")?;
            upsert_alias(&mut lexicon.traders, entry);
        }

        for (raw, canonical) in &ext.desks {
            let entry = checked_alias(raw, canonical, "desks")?;
            upsert_alias(&mut lexicon.desks, entry);
        }

        Ok(lexicon)
    }
}

fn alias(surface: &str, canonical: &str) -> Alias {
    Alias {
        surface: surface.to_owned(),
        canonical: canonical.to_owned(),
    }
}

fn expansion(surface: &str, values: &[&str]) -> Expansion {
    Expansion {
        surface: surface.to_owned(),
        values: values.iter().map(|v| (*v).to_owned()).collect(),
    }
}

fn normalize_surface(raw: &str, table: &'static str) -> Result<String, LexiconError> {
    let surface = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if surface.is_empty() {
        return Err(LexiconError::EmptySurface { table });
    }
    Ok(surface.to_lowercase())
}

/// Trimmed canonical values; a blank entry or an empty list is rejected.
fn checked_values(
    values: &[String],
    table: &'static str,
    surface: &str,
) -> Result<Vec<String>, LexiconError> {
    let trimmed: Vec<String> = values.iter().map(|v| v.trim().to_owned()).collect();
    if trimmed.is_empty() || trimmed.iter().any(String::is_empty) {
        return Err(LexiconError::EmptyCanonical {
            table,
            surface: surface.to_owned(),
        });
    }
    Ok(trimmed)
}

fn checked_alias(raw: &str, canonical: &str, table: &'static str) -> Result<Alias, LexiconError> {
    let surface = normalize_surface(raw, table)?;
    let canonical = canonical.trim();
    if canonical.is_empty() {
        return Err(LexiconError::EmptyCanonical { table, surface });
    }
    Ok(Alias {
        surface,
        canonical: canonical.to_owned(),
    })
}

fn upsert_expansion(table: &mut Vec<Expansion>, surface: String, values: Vec<String>) {
    match table.iter_mut().find(|e| e.surface == surface) {
        Some(existing) => existing.values = values,
        None => table.push(Expansion { surface, values }),
    }
}

fn upsert_alias(table: &mut Vec<Alias>, entry: Alias) {
    match table.iter_mut().find(|a| a.surface == entry.surface) {
        Some(existing) => existing.canonical = entry.canonical,
        None => table.push(entry),
    }
}
