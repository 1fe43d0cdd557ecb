//! SQLite database backend implementation
//!
//! SQLite keeps a spare 32-bit integer in the database header, exposed as
//! `PRAGMA user_version`. Tidemark stores the schema version there, so a
//! migrated SQLite database carries no bookkeeping table.

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite database backend
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Create a new in-memory SQLite connection
    pub fn in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DbError::ConnectionError(format!("failed to open in-memory database: {e}")))?;
        Self::configure(conn)
    }

    /// Create a new SQLite connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Self::configure(conn)
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn configure(conn: Connection) -> DbResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")
            .map_err(|e| DbError::ConnectionError(format!("failed to set pragmas: {e}")))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    fn control(&self, sql: &str) -> DbResult<()> {
        self.conn()?
            .execute_batch(sql)
            .map_err(|e| DbError::TransactionError(format!("{sql} failed: {e}")))
    }
}

impl Database for SqliteBackend {
    fn execute(&self, sql: &str) -> DbResult<usize> {
        // Changesets may carry row-returning statements such as
        // `PRAGMA journal_mode=WAL`, which `Connection::execute` rejects.
        let conn = self.conn()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))?;
        Ok(conn.changes() as usize)
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.conn()?
            .execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn query_optional_i64(&self, sql: &str) -> DbResult<Option<i64>> {
        let conn = self.conn()?;
        conn.query_row(sql, [], |row| row.get::<_, Option<i64>>(0))
            .optional()
            .map(Option::flatten)
            .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))
    }

    fn relation_exists(&self, name: &str) -> DbResult<bool> {
        let conn = self.conn()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
                params![name],
                |row| row.get(0),
            )
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(count > 0)
    }

    fn begin(&self) -> DbResult<()> {
        self.control("BEGIN TRANSACTION")
    }

    fn commit(&self) -> DbResult<()> {
        self.control("COMMIT")
    }

    fn rollback(&self) -> DbResult<()> {
        self.control("ROLLBACK")
    }

    fn db_type(&self) -> &'static str {
        "sqlite"
    }

    fn dialect_name(&self) -> &'static str {
        "sqlite"
    }

    fn has_version_register(&self) -> bool {
        true
    }

    fn read_version_register(&self) -> DbResult<u32> {
        let value: i64 = self
            .conn()?
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .map_err(|e| DbError::ExecutionError(format!("failed to read user_version: {e}")))?;
        u32::try_from(value).map_err(|_| DbError::InvalidMarker(value))
    }

    fn write_version_register(&self, version: u32) -> DbResult<()> {
        self.conn()?
            .pragma_update(None, "user_version", i64::from(version))
            .map_err(|e| DbError::ExecutionError(format!("failed to write user_version: {e}")))
    }
}

#[cfg(test)]
#[path = "sqlite_test.rs"]
mod tests;
