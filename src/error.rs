//! Stable error codes for the loader and report.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("CSV input is empty")]
    EmptyInput,

    #[error("Malformed row at line {line}: expected {expected} fields, found {actual}")]
    MalformedRow {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Conflicting headers: '{header}' is both a value and a parent of '{other}'")]
    ConflictingHeader { header: String, other: String },

    #[error("Invalid age '{value}' in {record}")]
    InvalidAge { record: String, value: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Db(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "EMPTY_INPUT",
            Self::MalformedRow { .. } => "MALFORMED_ROW",
            Self::ConflictingHeader { .. } => "CONFLICTING_HEADER",
            Self::InvalidAge { .. } => "INVALID_AGE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Db(_) => "DB_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    pub fn to_serde(&self) -> AppErrorDto {
        let details = match self {
            Self::MalformedRow {
                line,
                expected,
                actual,
            } => Some(serde_json::json!({
                "line": line,
                "expected": expected,
                "actual": actual,
            })),
            Self::ConflictingHeader { header, other } => Some(serde_json::json!({
                "header": header,
                "other": other,
            })),
            Self::InvalidAge { record, value } => Some(serde_json::json!({
                "record": record,
                "value": value,
            })),
            _ => None,
        };
        AppErrorDto {
            code: self.code().to_string(),
            message: self.to_string(),
            details,
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_serde().serialize(serializer)
    }
}

#[derive(Debug, Serialize)]
pub struct AppErrorDto {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
