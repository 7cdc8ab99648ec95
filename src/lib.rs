pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;

use config::AppConfig;
use error::AppError;
use infra::{create_schema, open_db, DbPool};

/// Shape `csv_text`, load it into `pool` and render the report
/// over everything stored in `persons`.
pub fn run_with_pool(pool: &DbPool, csv_text: &str) -> Result<String, AppError> {
    create_schema(pool)?;
    let records = app::parse_csv(csv_text)?;
    app::load_records(pool, &records)?;
    app::age_report(pool)
}

/// Full pipeline: open DB → schema → parse → insert → query → report.
pub fn run(config: &AppConfig) -> Result<String, AppError> {
    let pool = open_db(&config.db_path)?;
    create_schema(&pool)?;
    let records = app::read_csv_file(&config.csv_path)?;
    log::info!("Read {} records from {:?}", records.len(), config.csv_path);
    app::load_records(&pool, &records)?;
    app::age_report(&pool)
}
