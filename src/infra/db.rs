//! SQLite connection and the fixed `persons` schema.

use crate::error::AppError;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

pub struct DbPool(pub Mutex<Connection>);

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS persons (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    address TEXT NULL,
    additional_info TEXT NULL
)";

/// Open the database at `db_path` and return the managed pool.
/// `:memory:` opens a private in-memory database.
pub fn open_db(db_path: &Path) -> Result<DbPool, AppError> {
    let conn = if db_path == Path::new(":memory:") {
        Connection::open_in_memory().map_err(|e| AppError::Db(e.to_string()))?
    } else {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Connection::open(db_path).map_err(|e| AppError::Db(e.to_string()))?
    };
    log::info!("Connected to DB: {:?}", db_path);
    Ok(DbPool(Mutex::new(conn)))
}

/// Create the `persons` table if it does not exist yet.
pub fn create_schema(pool: &DbPool) -> Result<(), AppError> {
    let conn = get_connection(pool);
    conn.execute(SCHEMA_SQL, [])
        .map_err(|e| AppError::Db(e.to_string()))?;
    log::info!("Table created");
    Ok(())
}

/// In-memory pool with the schema applied, for tests.
pub fn init_test_db() -> DbPool {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute(SCHEMA_SQL, []).expect("create schema");
    DbPool(Mutex::new(conn))
}

/// Get connection from pool.
pub fn get_connection(pool: &DbPool) -> std::sync::MutexGuard<'_, Connection> {
    pool.0.lock().expect("db lock")
}
