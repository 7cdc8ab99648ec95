//! Age distribution report over loaded persons.

use crate::app::person_load::list_persons;
use crate::domain::{parse_age, AgeBucket, AgeDistribution, AgeSource, Field, Record};
use crate::error::AppError;
use crate::infra::DbPool;
use std::fmt::Write;

pub const REPORT_HEADER: &str = "Age-Group % Distribution";

impl AgeSource for Record {
    fn age(&self) -> Result<i64, AppError> {
        let describe = || self.to_json().to_string();
        match self.get("age") {
            Some(Field::Leaf(raw)) => parse_age(raw, describe),
            Some(field) => Err(AppError::InvalidAge {
                record: describe(),
                value: field.to_json().to_string(),
            }),
            None => Err(AppError::InvalidAge {
                record: describe(),
                value: String::new(),
            }),
        }
    }
}

/// Bucket every item in a single pass. The first unreadable age aborts.
pub fn calc_age_dist<T: AgeSource>(items: &[T]) -> Result<AgeDistribution, AppError> {
    let mut dist = AgeDistribution::new();
    for item in items {
        dist.record(item.age()?);
    }
    Ok(dist)
}

/// Header line, then `<label> <percentage>` per bucket in fixed order.
pub fn render_report(dist: &AgeDistribution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", REPORT_HEADER);
    for bucket in AgeBucket::all() {
        let _ = writeln!(out, "{} {}", bucket.label(), dist.percentage_text(*bucket));
    }
    out
}

/// Read every stored person and render the report.
pub fn age_report(pool: &DbPool) -> Result<String, AppError> {
    let persons = list_persons(pool)?;
    let dist = calc_age_dist(&persons)?;
    log::debug!("Aggregated {} persons", dist.total());
    Ok(render_report(&dist))
}
