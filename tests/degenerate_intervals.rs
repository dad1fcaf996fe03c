//! Tests for degenerate annotation intervals (end field <= start field).
//!
//! Note: Tests are run serially to avoid global config race conditions.

use anno_sweep::config;
use anno_sweep::prelude::*;
use serial_test::serial;

/// Reset config to default state before each test
fn reset_config() {
    config::set_allow_degenerate(false);
}

#[test]
#[serial]
fn test_strict_mode_rejects_degenerate() {
    reset_config();

    let content = "chr1\t.\t.\t100\t201\tok\nchr1\t.\t.\t300\t300\tbad\n";
    match Catalog::from_reader(content.as_bytes()) {
        Err(RecordError::InvalidInterval { line, start, end }) => {
            assert_eq!(line, 2);
            assert_eq!(start, 300);
            assert_eq!(end, 299);
        }
        other => panic!("expected InvalidInterval, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_strict_mode_error_message() {
    reset_config();

    let err = Catalog::from_reader("chr1\t.\t.\t50\t10\n".as_bytes()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid interval at line 1: end (9) < start (50)"
    );
}

#[test]
#[serial]
fn test_lenient_mode_loads_but_never_matches() {
    reset_config();
    config::set_allow_degenerate(true);

    let content = "chr1\t.\t.\t300\t300\tempty\nchr1\t.\t.\t100\t201\tgene\n";
    let catalog = Catalog::from_reader(content.as_bytes()).unwrap();
    reset_config();

    let entry = catalog.get("chr1").unwrap();
    assert_eq!(entry.len(), 2);
    assert_eq!(entry.max_span(), 101);

    let queries = QuerySet::from_reader("chr1\t150\nchr1\t299\nchr1\t300\n".as_bytes()).unwrap();
    let payloads: Vec<String> = match_queries(&catalog, &queries)
        .map(|m| m.interval.payload.clone())
        .collect();
    assert_eq!(payloads, vec!["chr1\t.\t.\t100\t201\tgene"]);
}
