//! CSV shaping: flat comma-separated lines into nested records.
//!
//! Headers are split on `.` to build nested records, so `address.city` and
//! `address.zip` end up under one `address` record. Values are kept as
//! strings. There is no quoting or escaping: every `,` is a delimiter.

use crate::domain::Record;
use crate::error::AppError;
use std::path::Path;

/// Read `path` as UTF-8 and shape it with [`parse_csv`].
pub fn read_csv_file(path: &Path) -> Result<Vec<Record>, AppError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("{}: {}", path.display(), e)))?;
    parse_csv(&text)
}

/// Parse CSV text into one [`Record`] per data line.
pub fn parse_csv(text: &str) -> Result<Vec<Record>, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::EmptyInput);
    }

    let mut lines = text.split('\n');
    let header_line = lines.next().unwrap_or_default();
    let headers: Vec<Vec<&str>> = split_line(header_line)
        .into_iter()
        .map(|h| h.split('.').collect())
        .collect();
    check_header_paths(&headers)?;

    let mut out = Vec::new();
    // Line 1 is the header.
    for (idx, line) in lines.enumerate() {
        let line_no = idx + 2;
        let values = split_line(line);
        if values.len() != headers.len() {
            return Err(AppError::MalformedRow {
                line: line_no,
                expected: headers.len(),
                actual: values.len(),
            });
        }

        let mut record = Record::new();
        for (path, value) in headers.iter().zip(values) {
            let assigned = record.set_path(path, value.to_string());
            debug_assert!(assigned, "header paths were checked for conflicts");
        }
        out.push(record);
    }
    log::debug!("Parsed {} CSV records", out.len());
    Ok(out)
}

fn split_line(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

/// Reject a header that is both a leaf and the parent of another header,
/// e.g. `address` next to `address.city`.
fn check_header_paths(headers: &[Vec<&str>]) -> Result<(), AppError> {
    for (i, a) in headers.iter().enumerate() {
        for b in headers.iter().skip(i + 1) {
            if a.len() == b.len() {
                continue;
            }
            let (short, long) = if a.len() < b.len() { (a, b) } else { (b, a) };
            if long.starts_with(short) {
                return Err(AppError::ConflictingHeader {
                    header: short.join("."),
                    other: long.join("."),
                });
            }
        }
    }
    Ok(())
}
