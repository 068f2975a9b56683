//! End-to-end behaviour of `QueryParser::parse`.

use chrono::{DateTime, Duration, TimeZone, Utc};

use reportql::{
    Aggregation, DateRange, Filter, FilterOperator, FilterValue, ParsedReport, QueryParser,
    ReportType, SortDirection,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 15, 0)
        .single()
        .expect("valid timestamp")
}

fn parse(query: &str) -> ParsedReport {
    QueryParser::new().parse_at(query, fixed_now())
}

fn thirty_days_before(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .checked_sub_signed(Duration::days(30))
        .expect("in range")
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s)
        .single()
        .expect("valid timestamp")
}

// ---------------------------------------------------------------------------
// Headline request
// ---------------------------------------------------------------------------

#[test]
fn fx_spot_with_firstbank_last_30_days() {
    let report = parse("Show me all FX Spot transactions with FirstBank in the last 30 days");

    assert_eq!(report.report_type, ReportType::Transactions);
    assert_eq!(
        report.filters,
        vec![
            Filter::equals("counterparty", "Firstbank"),
            Filter::equals("product_type", "FX Spot"),
        ]
    );
    assert_eq!(
        report.date_range,
        DateRange::between(thirty_days_before(fixed_now()), fixed_now())
    );
    assert_eq!(report.metrics.len(), 7);
    assert_eq!(report.group_by, None);
    assert_eq!(report.sort_by, None);
    assert_eq!(report.limit, None);
    assert!(report.aggregations.is_empty());
    assert_eq!(
        report.report_name,
        "Transactions - Firstbank - FX Spot - Custom Period"
    );
}

// ---------------------------------------------------------------------------
// Testable properties
// ---------------------------------------------------------------------------

#[test]
fn parsing_is_deterministic() {
    let parser = QueryParser::new();
    for query in [
        "",
        "asdkjhasd",
        "Show me all FX Spot transactions with FirstBank in the last 30 days",
        "top 10 high risk counterparties by sector sorted by exposure ascending",
        "total pnl by desk for Q2 2026",
        "volume exceeding ₦1B yesterday",
    ] {
        let first = parser.parse_at(query, fixed_now());
        let second = parser.parse_at(query, fixed_now());
        assert_eq!(first, second, "{query}");
    }
}

#[test]
fn today_wins_over_this_month() {
    let report = parse("today and this month");
    assert_eq!(
        report.date_range,
        DateRange::between(fixed_now(), fixed_now())
    );
}

#[test]
fn multiple_counterparties_and_single_product() {
    let report = parse("FX Spot trades with FirstBank and Access Bank");

    let counterparty = report.filter("counterparty").expect("counterparty filter");
    assert_eq!(counterparty.operator, FilterOperator::In);
    assert_eq!(
        counterparty.value,
        FilterValue::List(vec!["Firstbank".to_owned(), "Access Bank".to_owned()])
    );

    let product = report.filter("product_type").expect("product filter");
    assert_eq!(product.value.texts(), vec!["FX Spot"]);
}

#[test]
fn volume_threshold_scaled_by_suffix() {
    let report = parse("volume exceeding ₦1B");
    assert_eq!(
        report.filters,
        vec![Filter::greater_than("amount_ngn", 1_000_000_000.0)]
    );
}

#[test]
fn grouping_word_after_threshold_is_not_a_suffix() {
    let report = parse("exposure above 100 by counterparty");
    assert_eq!(
        report.filters,
        vec![Filter::greater_than("current_exposure", 100.0)]
    );
    assert_eq!(report.group_by, Some(vec!["counterparty".to_owned()]));
}

#[test]
fn unrepresentable_threshold_yields_no_filter() {
    let report = parse(&format!("volume over {}", "9".repeat(400)));
    assert!(report.filters.is_empty());
    let json = serde_json::to_string(&report).expect("should serialize");
    assert!(!json.contains("\"value\":null"));
}

#[test]
fn last_n_days_against_wall_clock() {
    let before = Utc::now();
    let report = QueryParser::new().parse("last 30 days");
    let after = Utc::now();

    let start = report.date_range.start.expect("start resolved");
    let end = report.date_range.end.expect("end resolved");
    assert_eq!(end.signed_duration_since(start), Duration::days(30));
    assert!(before <= end && end <= after);
}

#[test]
fn gibberish_degrades_gracefully() {
    let report = parse("asdkjhasd");
    assert_eq!(report.report_type, ReportType::Generic);
    assert!(report.filters.is_empty());
    assert!(report.metrics.is_empty());
    assert_eq!(report.report_name, "Custom Report");
    assert!(report.date_range.is_all_time());
}

#[test]
fn empty_query_is_a_complete_report() {
    let report = parse("   ");
    assert_eq!(report.report_type, ReportType::Generic);
    assert_eq!(report.report_name, "Custom Report");
    assert!(report.aggregations.is_empty());
}

#[test]
fn top_n_counterparties_by_exposure() {
    let report = parse("show top 5 counterparties by exposure");
    assert_eq!(report.report_type, ReportType::Counterparties);
    assert_eq!(report.limit, Some(5));
    assert_eq!(report.group_by, None);
    assert!(report.metrics.iter().any(|m| m == "current_exposure"));
}

// ---------------------------------------------------------------------------
// Composite requests
// ---------------------------------------------------------------------------

#[test]
fn grouping_sorting_and_aggregations() {
    let report = parse("Total volume by counterparty by desk sorted by volume ascending");

    assert_eq!(
        report.group_by,
        Some(vec!["counterparty".to_owned(), "desk".to_owned()])
    );
    let sort = report.sort_by.expect("sort present");
    assert_eq!(sort.field, "amount_ngn");
    assert_eq!(sort.direction, SortDirection::Asc);
    assert!(report.aggregations.contains(&Aggregation::Sum));
    assert_eq!(report.metrics, vec!["amount_ngn", "trade_count"]);
}

#[test]
fn status_filters_follow_entity_filters() {
    let report = parse("active high risk clients with exposure above 500m");
    assert_eq!(report.report_type, ReportType::Counterparties);
    assert_eq!(
        report.filters,
        vec![
            Filter::greater_than("current_exposure", 500_000_000.0),
            Filter::equals("risk_category", "High"),
            Filter::equals("status", "Active"),
        ]
    );
}

#[test]
fn explicit_quarter_names_custom_period() {
    let report = parse("pnl by desk for Q2 2026");
    assert_eq!(report.report_type, ReportType::Pnl);
    assert_eq!(report.date_range.start, Some(at(2026, 4, 1, 0, 0, 0)));
    assert_eq!(report.date_range.end, Some(at(2026, 6, 30, 23, 59, 59)));
    assert_eq!(report.report_name, "Pnl - Custom Period");
}

#[test]
fn this_month_label_in_name() {
    let report = parse("kyc reviews this month");
    assert_eq!(report.report_type, ReportType::Compliance);
    assert_eq!(report.report_name, "Compliance - This Month");
    assert_eq!(report.date_range.start, Some(at(2026, 10, 1, 0, 0, 0)));
    assert_eq!(report.date_range.end, Some(at(2026, 10, 31, 23, 59, 59)));
}

#[test]
fn report_json_shape() {
    let report = parse("Show me all FX Spot transactions with FirstBank in the last 30 days");
    let json = serde_json::to_value(&report).expect("should serialize");

    assert_eq!(json["reportType"], "transactions");
    assert_eq!(json["filters"][0]["field"], "counterparty");
    assert_eq!(json["filters"][0]["operator"], "equals");
    assert_eq!(json["filters"][0]["value"], "Firstbank");
    assert!(json["dateRange"]["start"].is_string());
    assert!(json["dateRange"]["end"].is_string());
    assert!(json.get("groupBy").is_none());

    let back: ParsedReport = serde_json::from_value(json).expect("should deserialize");
    assert_eq!(back, report);
}

#[test]
fn crate_level_parse_matches_default_parser() {
    let query = "fx swaps with zenith bank";
    let via_fn = reportql::parse(query);
    let via_parser = QueryParser::new().parse(query);
    assert_eq!(via_fn.filters, via_parser.filters);
    assert_eq!(via_fn.report_name, via_parser.report_name);
}
