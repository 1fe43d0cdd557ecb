//! Persisted schema-version marker.
//!
//! The marker is a single non-negative integer: the last version whose step
//! committed. Absent storage reads as 0 ("nothing applied"). Two stores
//! exist: the backend's native register (SQLite `user_version`) and a
//! one-row bookkeeping table created on first write.

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use serde::{Deserialize, Serialize};
use tm_sql::{is_valid_identifier, quote_ident};

/// Default name of the bookkeeping table
pub const DEFAULT_VERSION_TABLE: &str = "tm_version";

/// Default name of the column holding the version in the bookkeeping table
pub const DEFAULT_VERSION_COLUMN: &str = "tm_version";

/// Reads and writes the current schema version
pub trait VersionStore: Send + Sync {
    /// Read the marker; 0 when it was never written
    fn read(&self, db: &dyn Database) -> DbResult<u32>;

    /// Write the marker. Visible to a subsequent `read` on the same
    /// connection immediately.
    fn write(&self, db: &dyn Database, version: u32) -> DbResult<()>;

    /// Short human-readable description for logs and status output
    fn describe(&self) -> String;
}

/// Marker kept in the backend's built-in integer register
#[derive(Debug, Default, Clone, Copy)]
pub struct RegisterVersionStore;

impl VersionStore for RegisterVersionStore {
    fn read(&self, db: &dyn Database) -> DbResult<u32> {
        db.read_version_register()
    }

    fn write(&self, db: &dyn Database, version: u32) -> DbResult<()> {
        db.write_version_register(version)
    }

    fn describe(&self) -> String {
        "native version register".to_string()
    }
}

/// Marker kept in a one-row table
#[derive(Debug, Clone)]
pub struct TableVersionStore {
    table: String,
    column: String,
}

impl TableVersionStore {
    /// Create a store for `table.column`. Both names must be plain
    /// identifiers since they are spliced into SQL.
    pub fn new(table: &str, column: &str) -> DbResult<Self> {
        for (what, ident) in [("version table", table), ("version column", column)] {
            if !is_valid_identifier(ident) {
                return Err(DbError::InvalidIdentifier {
                    what: what.to_string(),
                    ident: ident.to_string(),
                });
            }
        }
        Ok(Self {
            table: table.to_string(),
            column: column.to_string(),
        })
    }

    /// Bookkeeping table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Version column name
    pub fn column(&self) -> &str {
        &self.column
    }
}

impl Default for TableVersionStore {
    fn default() -> Self {
        Self {
            table: DEFAULT_VERSION_TABLE.to_string(),
            column: DEFAULT_VERSION_COLUMN.to_string(),
        }
    }
}

impl VersionStore for TableVersionStore {
    fn read(&self, db: &dyn Database) -> DbResult<u32> {
        if !db.relation_exists(&self.table)? {
            return Ok(0);
        }
        let sql = format!(
            "SELECT {} FROM {} LIMIT 1",
            quote_ident(&self.column),
            quote_ident(&self.table)
        );
        match db.query_optional_i64(&sql)? {
            None => Ok(0),
            Some(value) => u32::try_from(value).map_err(|_| DbError::InvalidMarker(value)),
        }
    }

    fn write(&self, db: &dyn Database, version: u32) -> DbResult<()> {
        let table = quote_ident(&self.table);
        let column = quote_ident(&self.column);
        db.execute(&format!(
            "CREATE TABLE IF NOT EXISTS {table} ({column} BIGINT NOT NULL)"
        ))?;
        db.execute(&format!("DELETE FROM {table}"))?;
        db.execute(&format!("INSERT INTO {table} ({column}) VALUES ({version})"))?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("table {}.{}", self.table, self.column)
    }
}

/// Where the version marker lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStorage {
    /// Native register when the backend has one, table otherwise
    #[default]
    Auto,
    /// Always use the bookkeeping table
    Table,
}

/// Pick the version store for `db`.
///
/// `table` and `column` name the bookkeeping table; they are validated even
/// when the native register ends up being used so that a bad configuration
/// is reported regardless of backend.
pub fn version_store_for(
    db: &dyn Database,
    storage: MarkerStorage,
    table: &str,
    column: &str,
) -> DbResult<Box<dyn VersionStore>> {
    let table_store = TableVersionStore::new(table, column)?;
    match storage {
        MarkerStorage::Auto if db.has_version_register() => Ok(Box::new(RegisterVersionStore)),
        _ => Ok(Box::new(table_store)),
    }
}

#[cfg(test)]
#[path = "version_store_test.rs"]
mod tests;
