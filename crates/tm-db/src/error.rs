//! Error types for tm-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Transaction management error (D003)
    #[error("[D003] Transaction failed: {0}")]
    TransactionError(String),

    /// Not implemented (D004)
    #[error("[D004] Feature not implemented for {backend}: {feature}")]
    NotImplemented { backend: String, feature: String },

    /// Mutex poisoned (D005)
    #[error("[D005] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// Identifier rejected before being spliced into SQL (D006)
    #[error("[D006] Invalid identifier for {what}: '{ident}'")]
    InvalidIdentifier { what: String, ident: String },

    /// Stored version marker is not a valid version number (D007)
    #[error("[D007] Invalid version marker value: {0}")]
    InvalidMarker(i64),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
