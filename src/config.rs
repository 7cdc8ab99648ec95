//! Runtime configuration, built once at startup.

use crate::error::AppError;
use std::path::PathBuf;

pub const DB_URL_VAR: &str = "DB_URL";
pub const FILE_PATH_VAR: &str = "FILE_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub csv_path: PathBuf,
}

impl AppConfig {
    pub fn new(db_url: &str, csv_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        Ok(Self {
            db_path: parse_db_url(db_url)?,
            csv_path: csv_path.into(),
        })
    }

    /// Load `.env` if present, then read `DB_URL` and `FILE_PATH`.
    /// Explicit overrides win over the environment.
    pub fn from_env(
        db_override: Option<String>,
        csv_override: Option<PathBuf>,
    ) -> Result<Self, AppError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(AppError::Config(format!(".env: {}", e)));
            }
        }
        Self::from_lookup(|k| std::env::var(k).ok(), db_override, csv_override)
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        db_override: Option<String>,
        csv_override: Option<PathBuf>,
    ) -> Result<Self, AppError> {
        let db_url = db_override
            .or_else(|| lookup(DB_URL_VAR))
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::Config(format!("{} is not defined", DB_URL_VAR)))?;
        let csv_path = csv_override
            .or_else(|| lookup(FILE_PATH_VAR).map(PathBuf::from))
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| AppError::Config(format!("{} is not defined", FILE_PATH_VAR)))?;
        Self::new(&db_url, csv_path)
    }
}

/// Accepts a plain path, `sqlite://<path>`, `sqlite:<path>` or `:memory:`.
fn parse_db_url(url: &str) -> Result<PathBuf, AppError> {
    let url = url.trim();
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    if path.is_empty() {
        return Err(AppError::Config(format!("{} has no database path", DB_URL_VAR)));
    }
    if path.contains("://") {
        return Err(AppError::Config(format!(
            "{} must point at a SQLite database, got '{}'",
            DB_URL_VAR, url
        )));
    }
    Ok(PathBuf::from(path))
}
