//! A single parser shared across threads without locking.

use std::sync::Arc;
use std::thread;

use chrono::{TimeZone, Utc};

use reportql::QueryParser;

#[test]
fn shared_parser_gives_identical_results_across_threads() {
    let parser = Arc::new(QueryParser::new());
    let now = Utc
        .with_ymd_and_hms(2026, 3, 31, 17, 45, 0)
        .single()
        .expect("valid timestamp");
    let query = "top 10 pending fx trades with GTBank sorted by volume this quarter";

    let expected = parser.parse_at(query, now);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let parser = Arc::clone(&parser);
            thread::spawn(move || parser.parse_at(query, now))
        })
        .collect();

    for handle in handles {
        let report = handle.join().expect("worker thread should not panic");
        assert_eq!(report, expected);
    }

    assert_eq!(expected.limit, Some(10));
    assert_eq!(expected.report_name, "Transactions - Gtbank - FX Spot, FX Forward - This Quarter");
}
