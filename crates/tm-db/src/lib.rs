//! tm-db - Database capability layer for Tidemark
//!
//! This crate provides the `Database` trait the migration engine executes
//! against, DuckDB and SQLite implementations, a scoped transaction guard,
//! and the stores that persist the current schema version.

pub mod connect;
pub mod duckdb;
pub mod error;
pub mod sqlite;
pub mod traits;
pub mod transaction;
pub mod version_store;

pub use connect::{connect, DbType};
pub use crate::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use sqlite::SqliteBackend;
pub use traits::Database;
pub use transaction::{with_transaction, Transaction};
pub use version_store::{
    version_store_for, MarkerStorage, RegisterVersionStore, TableVersionStore, VersionStore,
    DEFAULT_VERSION_COLUMN, DEFAULT_VERSION_TABLE,
};
