//! Error types for tm-sql

use thiserror::Error;

/// SQL text errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// SQL could not be tokenized (Q001)
    #[error("[Q001] SQL tokenize error at line {line}, column {column}: {message}")]
    TokenizeError {
        message: String,
        line: usize,
        column: usize,
    },

    /// Unknown dialect name (Q002)
    #[error("[Q002] Unknown SQL dialect: {0}")]
    UnknownDialect(String),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
