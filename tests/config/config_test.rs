//! Coverage for config parsing, file loading and parser construction.

use std::fs;

use reportql::config::{load_config, load_or_default, Config, MATCH_MODE_ENV};
use reportql::lexicon::LexiconError;
use reportql::matching::MatchMode;
use reportql::QueryParser;

#[test]
fn load_config_reads_file() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[output]
pretty = false

[lexicon.traders]
"kemi" = "Kemi Bello"
"#,
    )
    .expect("write config");

    let config = load_config(&path).expect("config should load");
    assert!(!config.output.pretty);
    assert_eq!(config.lexicon.traders["kemi"], "Kemi Bello");
}

#[test]
fn load_config_reports_missing_file() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("absent.toml");
    let err = load_config(&path).expect_err("missing file should fail");
    assert!(err.to_string().contains("failed to read config"));
}

#[test]
fn load_config_reports_malformed_toml() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[matching]\nmode = 42\n").expect("write config");
    let err = load_config(&path).expect_err("bad type should fail");
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn load_or_default_tolerates_missing_file() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let config = load_or_default(&dir.path().join("absent.toml")).expect("defaults");
    assert!(config.output.pretty);
    assert!(config.lexicon.is_empty());
}

#[test]
fn unknown_match_mode_is_rejected() {
    assert!(Config::from_toml("[matching]\nmode = \"fuzzy\"\n").is_err());
}

#[test]
fn env_resolver_overrides_file_value() {
    let mut config =
        Config::from_toml("[matching]\nmode = \"word_boundary\"\n").expect("config parses");
    config.apply_overrides(|key| (key == MATCH_MODE_ENV).then(|| "substring".to_owned()));
    assert_eq!(config.matching.mode, MatchMode::Substring);
}

#[test]
fn invalid_lexicon_extension_fails_parser_construction() {
    let config = Config::from_toml(
        r#"
[lexicon.desks]
"options desk" = "  "
"#,
    )
    .expect("config parses");
    let err = QueryParser::from_config(&config).err().expect("empty canonical");
    assert!(matches!(
        err,
        LexiconError::EmptyCanonical { table: "desks", .. }
    ));
}

#[test]
fn product_extension_is_matched() {
    let config = Config::from_toml(
        r#"
[lexicon.products]
"cross currency swap" = ["Cross Currency Swap"]
"#,
    )
    .expect("config parses");
    let parser = QueryParser::from_config(&config).expect("valid lexicon");
    let report = parser.parse("cross currency swap trades");
    let product = report.filter("product_type").expect("product filter");
    assert_eq!(product.value.texts(), vec!["Cross Currency Swap"]);
}
