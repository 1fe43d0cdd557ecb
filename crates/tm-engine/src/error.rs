//! Error types for tm-engine

use thiserror::Error;
use tm_core::{CoreError, Direction};
use tm_db::DbError;
use tm_sql::SqlError;

/// Migration errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// G001: Requested version is not among the visible versions
    #[error("[G001] Version {target} is not available{}", tag_suffix(.tag))]
    UnknownTarget { target: u32, tag: Option<String> },

    /// G002: The database records a version that is not among the visible versions
    #[error("[G002] Database is at version {current}, which is not available{}", tag_suffix(.tag))]
    UnknownCurrent { current: u32, tag: Option<String> },

    /// G003: A statement failed; the step was rolled back
    #[error("[G003] Migrating {direction} version {number} ({name}) failed at statement {index}: {source}\n  statement: {statement}")]
    Statement {
        number: u32,
        name: String,
        direction: Direction,
        index: usize,
        statement: String,
        source: DbError,
    },

    /// G004: A version's SQL could not be split into statements
    #[error("[G004] {0}")]
    Split(#[from] CoreError),

    /// G005: Reading or writing the version marker failed
    #[error("[G005] Version marker error: {0}")]
    Marker(#[source] DbError),

    /// G006: A lifecycle hook failed after its step committed
    #[error("[G006] after_{direction} hook of version {number} ({name}) failed, database left at version {marker}: {source}")]
    Hook {
        number: u32,
        name: String,
        direction: Direction,
        marker: u32,
        source: DbError,
    },

    /// G007: Database error outside a statement (transaction control, setup)
    #[error("[G007] {0}")]
    Database(#[from] DbError),

    /// G008: The database reports a dialect the statement splitter does not know
    #[error("[G008] {0}")]
    Dialect(#[from] SqlError),
}

fn tag_suffix(tag: &Option<String>) -> String {
    match tag {
        Some(tag) => format!(" for tag '{tag}'"),
        None => " without a tag".to_string(),
    }
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
