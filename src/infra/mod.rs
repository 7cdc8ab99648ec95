//! Infrastructure: SQLite connection and schema.

pub mod db;

pub(crate) use db::get_connection;
pub use db::{create_schema, init_test_db, open_db, DbPool};
