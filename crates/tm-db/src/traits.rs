//! Database trait definition

use crate::error::{DbError, DbResult};

/// Database capability consumed by the migration engine.
///
/// Calls are synchronous and blocking. Implementations own a single
/// connection, so `begin`/`commit`/`rollback` bracket everything executed in
/// between; see [`crate::Transaction`] for the scoped form.
pub trait Database: Send + Sync {
    /// Execute a single SQL statement, returns affected rows
    fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements in one driver call
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run a query and return the first column of the first row as an
    /// integer, or `None` when there are no rows or the value is NULL
    fn query_optional_i64(&self, sql: &str) -> DbResult<Option<i64>>;

    /// Check if a table or view exists
    fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Open a transaction
    fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    fn rollback(&self) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// SQL dialect used to split statements for this database
    fn dialect_name(&self) -> &'static str {
        "generic"
    }

    /// Whether the database has a built-in integer register able to hold
    /// the schema version without any table
    fn has_version_register(&self) -> bool {
        false
    }

    /// Read the built-in version register
    fn read_version_register(&self) -> DbResult<u32> {
        Err(DbError::NotImplemented {
            backend: self.db_type().to_string(),
            feature: "version register".to_string(),
        })
    }

    /// Write the built-in version register
    fn write_version_register(&self, _version: u32) -> DbResult<()> {
        Err(DbError::NotImplemented {
            backend: self.db_type().to_string(),
            feature: "version register".to_string(),
        })
    }
}
