//! CSV shaping integration tests

use app_lib::app::{parse_csv, read_csv_file};
use app_lib::domain::{Field, Record};
use app_lib::error::AppError;
use std::io::Write;

// ──────────────────────── Helper ────────────────────────

fn leaf<'a>(record: &'a Record, dotted: &str) -> Option<&'a str> {
    record.get_dotted(dotted).and_then(Field::as_leaf)
}

// ══════════════════════════════════════════════════════════
//  nesting
// ══════════════════════════════════════════════════════════

#[test]
fn dotted_headers_build_nested_record() {
    let records = parse_csv("a,b.c,b.d\n1,2,3").unwrap();
    assert_eq!(records.len(), 1);

    let r = &records[0];
    assert_eq!(r.len(), 2);
    assert_eq!(leaf(r, "a"), Some("1"));
    let b = r.get("b").and_then(Field::as_nested).unwrap();
    assert_eq!(b.len(), 2);
    assert_eq!(b.get("c").and_then(Field::as_leaf), Some("2"));
    assert_eq!(b.get("d").and_then(Field::as_leaf), Some("3"));
    assert_eq!(
        serde_json::to_string(r).unwrap(),
        r#"{"a":"1","b":{"c":"2","d":"3"}}"#
    );
}

#[test]
fn keys_follow_header_order() {
    let records = parse_csv("z,a.y,m,a.x\n1,2,3,4").unwrap();
    let keys: Vec<&str> = records[0].iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn deep_paths_roundtrip_through_leaf_paths() {
    let csv = "firstName,address.street,address.geo.lat,address.geo.lng,tags\n\
               Ann,Main St,1.5,-2.25,x\n\
               Bob,Side Rd,0,0,y\n";
    let headers: Vec<&str> = csv.lines().next().unwrap().split(',').collect();
    let records = parse_csv(csv).unwrap();
    assert_eq!(records.len(), 2);

    for r in &records {
        let flat = r.leaf_paths();
        let paths: Vec<&str> = flat.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, headers);
        for (path, value) in &flat {
            assert_eq!(leaf(r, path), Some(value.as_str()));
        }
    }
    assert_eq!(leaf(&records[1], "address.geo.lat"), Some("0"));
}

#[test]
fn values_and_headers_are_trimmed() {
    let records = parse_csv("  name , address.city \n  Ann ,  Oslo  \r\n").unwrap();
    assert_eq!(leaf(&records[0], "name"), Some("Ann"));
    assert_eq!(leaf(&records[0], "address.city"), Some("Oslo"));
}

#[test]
fn values_stay_strings() {
    let records = parse_csv("age,flag\n042,true").unwrap();
    assert_eq!(leaf(&records[0], "age"), Some("042"));
    assert_eq!(leaf(&records[0], "flag"), Some("true"));
}

#[test]
fn duplicate_header_last_column_wins() {
    let records = parse_csv("a,b,a\n1,2,3").unwrap();
    assert_eq!(records[0].len(), 2);
    assert_eq!(leaf(&records[0], "a"), Some("3"));
}

#[test]
fn repeated_nested_header_overwrites_leaf() {
    let records = parse_csv("a.b,a.c,a.b\n1,2,3").unwrap();
    let a = records[0].get("a").and_then(Field::as_nested).unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!(leaf(&records[0], "a.b"), Some("3"));
    assert_eq!(leaf(&records[0], "a.c"), Some("2"));
}

// ══════════════════════════════════════════════════════════
//  edge cases
// ══════════════════════════════════════════════════════════

#[test]
fn empty_input_fails() {
    for input in ["", "   ", "\n\n \t\n"] {
        let err = parse_csv(input).unwrap_err();
        assert!(matches!(err, AppError::EmptyInput), "{:?}", input);
        assert_eq!(err.code(), "EMPTY_INPUT");
    }
}

#[test]
fn header_only_returns_empty() {
    assert!(parse_csv("a,b\n").unwrap().is_empty());
    assert!(parse_csv("a,b").unwrap().is_empty());
}

#[test]
fn short_row_reports_line_and_counts() {
    let err = parse_csv("a,b,c\n1,2,3\n4,5\n").unwrap_err();
    match err {
        AppError::MalformedRow {
            line,
            expected,
            actual,
        } => {
            assert_eq!(line, 3);
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn long_row_is_malformed_too() {
    let err = parse_csv("a,b\n1,2,3").unwrap_err();
    assert_eq!(err.code(), "MALFORMED_ROW");
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn blank_line_inside_data_is_malformed() {
    let err = parse_csv("a,b\n1,2\n\n3,4").unwrap_err();
    assert!(matches!(err, AppError::MalformedRow { line: 3, .. }));
}

#[test]
fn scalar_and_nested_header_conflict() {
    for csv in ["address,address.city\nx,y", "address.city,address\ny,x"] {
        let err = parse_csv(csv).unwrap_err();
        match err {
            AppError::ConflictingHeader { header, other } => {
                assert_eq!(header, "address");
                assert_eq!(other, "address.city");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[test]
fn header_conflict_detected_without_data_rows() {
    let err = parse_csv("a.b,a.b.c").unwrap_err();
    assert_eq!(err.code(), "CONFLICTING_HEADER");
}

#[test]
fn sibling_headers_with_shared_text_prefix_are_fine() {
    let records = parse_csv("address,addressLine.one\nx,y").unwrap();
    assert_eq!(leaf(&records[0], "address"), Some("x"));
    assert_eq!(leaf(&records[0], "addressLine.one"), Some("y"));
}

// ══════════════════════════════════════════════════════════
//  read_csv_file
// ══════════════════════════════════════════════════════════

#[test]
fn read_csv_file_parses_contents() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "a,b.c").unwrap();
    writeln!(file, "1,2").unwrap();
    let records = read_csv_file(file.path()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(leaf(&records[0], "b.c"), Some("2"));
}

#[test]
fn read_csv_file_missing_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_csv_file(&dir.path().join("nope.csv")).unwrap_err();
    assert_eq!(err.code(), "IO_ERROR");
    assert!(err.to_string().contains("nope.csv"));
}
