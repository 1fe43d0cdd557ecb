//! Backend selection from configuration

use crate::duckdb::DuckDbBackend;
use crate::error::DbResult;
use crate::sqlite::SqliteBackend;
use crate::traits::Database;
use serde::{Deserialize, Serialize};

/// Database type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// SQLite (default)
    #[default]
    Sqlite,
    /// DuckDB
    DuckDb,
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbType::Sqlite => write!(f, "sqlite"),
            DbType::DuckDb => write!(f, "duckdb"),
        }
    }
}

impl DbType {
    /// SQL dialect name understood by the statement splitter
    pub fn dialect_name(&self) -> &'static str {
        match self {
            DbType::Sqlite => "sqlite",
            DbType::DuckDb => "duckdb",
        }
    }
}

/// Open a connection of the given type. `path` may be `:memory:`.
pub fn connect(db_type: DbType, path: &str) -> DbResult<Box<dyn Database>> {
    log::debug!("Connecting to {db_type} database at {path}");
    match db_type {
        DbType::Sqlite => Ok(Box::new(SqliteBackend::new(path)?)),
        DbType::DuckDb => Ok(Box::new(DuckDbBackend::new(path)?)),
    }
}
