//! Person load use cases: map shaped records onto the `persons` table.

use crate::domain::{check_age, parse_age, AgeSource, Field, Record};
use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use rusqlite::params;
use rusqlite::types::Value;
use serde::Serialize;

const FIRST_NAME: &str = "firstName";
const LAST_NAME: &str = "lastName";
const AGE: &str = "age";
const ADDRESS: &str = "address";

/// Insert parameters for one `persons` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInsert {
    pub name: String,
    pub age: i64,
    pub address: Option<serde_json::Value>,
    pub additional_info: Option<serde_json::Value>,
}

/// A `persons` row read back from the database.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPerson {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub address: Option<serde_json::Value>,
    pub additional_info: Option<serde_json::Value>,
}

impl AgeSource for StoredPerson {
    fn age(&self) -> Result<i64, AppError> {
        Ok(self.age)
    }
}

impl PersonInsert {
    /// Map one shaped record. `line` is the CSV line the record came from.
    pub fn from_record(record: &Record, line: usize) -> Result<Self, AppError> {
        let part = |key: &str| {
            record
                .get(key)
                .and_then(Field::as_leaf)
                .unwrap_or_default()
                .to_string()
        };
        let name = format!("{} {}", part(FIRST_NAME), part(LAST_NAME))
            .trim()
            .to_string();
        if name.is_empty() {
            return Err(AppError::Validation(format!(
                "line {}: firstName or lastName is required",
                line
            )));
        }

        let age = match record.get(AGE) {
            Some(Field::Leaf(raw)) => parse_age(raw, || format!("line {}", line))?,
            Some(nested @ Field::Nested(_)) => {
                return Err(AppError::InvalidAge {
                    record: format!("line {}", line),
                    value: nested.to_json().to_string(),
                })
            }
            None => {
                return Err(AppError::InvalidAge {
                    record: format!("line {}", line),
                    value: String::new(),
                })
            }
        };

        let address = match record.get(ADDRESS) {
            None => None,
            Some(Field::Leaf(s)) if s.is_empty() => None,
            Some(field) => Some(field.to_json()),
        };

        let mut extra = serde_json::Map::new();
        for (key, field) in record.iter() {
            if matches!(key, FIRST_NAME | LAST_NAME | AGE | ADDRESS) {
                continue;
            }
            extra.insert(key.to_string(), field.to_json());
        }

        Ok(PersonInsert {
            name,
            age,
            address,
            additional_info: Some(serde_json::Value::Object(extra)),
        })
    }
}

/// Map every record first, then insert them in one transaction.
/// Line numbers assume `records` came straight from the CSV shaper.
pub fn load_records(pool: &DbPool, records: &[Record]) -> Result<usize, AppError> {
    let rows = records
        .iter()
        .enumerate()
        .map(|(idx, r)| PersonInsert::from_record(r, idx + 2))
        .collect::<Result<Vec<_>, _>>()?;
    insert_persons(pool, &rows)
}

/// Bulk insert; all rows or none.
pub fn insert_persons(pool: &DbPool, rows: &[PersonInsert]) -> Result<usize, AppError> {
    let conn = get_connection(pool);
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| AppError::Db(e.to_string()))?;

    let mut inserted = 0usize;
    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO persons (name, age, address, additional_info) VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(|e| AppError::Db(e.to_string()))?;
        for p in rows {
            let address = p.address.as_ref().map(|v| v.to_string());
            let additional_info = p.additional_info.as_ref().map(|v| v.to_string());
            inserted += stmt
                .execute(params![p.name, p.age, address, additional_info])
                .map_err(|e| AppError::Db(e.to_string()))?;
        }
    }

    tx.commit().map_err(|e| AppError::Db(e.to_string()))?;
    log::info!("Data inserted: {} rows", inserted);
    Ok(inserted)
}

pub fn list_persons(pool: &DbPool) -> Result<Vec<StoredPerson>, AppError> {
    let conn = get_connection(pool);
    let mut stmt = conn
        .prepare("SELECT id, name, age, address, additional_info FROM persons ORDER BY id")
        .map_err(|e| AppError::Db(e.to_string()))?;
    let mut rows = stmt.query([]).map_err(|e| AppError::Db(e.to_string()))?;

    let mut out = Vec::new();
    while let Some(row) = rows.next().map_err(|e| AppError::Db(e.to_string()))? {
        let id: i64 = row.get(0)?;
        let age = stored_age(row.get(2)?, id)?;
        let address: Option<String> = row.get(3)?;
        let additional_info: Option<String> = row.get(4)?;
        out.push(StoredPerson {
            id,
            name: row.get(1)?,
            age,
            address: parse_json_column(address, id, ADDRESS)?,
            additional_info: parse_json_column(additional_info, id, "additional_info")?,
        });
    }
    Ok(out)
}

/// SQLite keeps whatever type was written, so a text age can come back.
fn stored_age(value: Value, id: i64) -> Result<i64, AppError> {
    let record = || format!("persons row {}", id);
    match value {
        Value::Integer(n) => check_age(n, record),
        Value::Text(s) => parse_age(&s, record),
        Value::Real(f) => Err(AppError::InvalidAge {
            record: record(),
            value: f.to_string(),
        }),
        Value::Null | Value::Blob(_) => Err(AppError::InvalidAge {
            record: record(),
            value: String::new(),
        }),
    }
}

fn parse_json_column(
    raw: Option<String>,
    id: i64,
    column: &str,
) -> Result<Option<serde_json::Value>, AppError> {
    raw.map(|s| {
        serde_json::from_str(&s).map_err(|e| {
            AppError::Db(format!("persons row {}: invalid JSON in {}: {}", id, column, e))
        })
    })
    .transpose()
}
