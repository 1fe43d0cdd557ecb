//! Error types for tm-core

use thiserror::Error;

/// Core error type for Tidemark
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Changeset file name does not carry a valid version number
    #[error("[E003] Invalid changeset file name '{path}': {reason}. Expected <name>.<version>.sql with a positive integer version")]
    InvalidFilename { path: String, reason: String },

    /// E004: Changeset file body is malformed
    #[error("[E004] Failed to parse changeset {path}: {message}")]
    ChangesetParseError { path: String, message: String },

    /// E005: Two changesets share a version number
    #[error("[E005] Duplicate version {number}: '{first}' and '{second}'")]
    DuplicateVersion {
        number: u32,
        first: String,
        second: String,
    },

    /// E006: A changeset claimed the reserved base version number
    #[error("[E006] Version 0 is reserved for the base version (changeset '{name}')")]
    ReservedVersion { name: String },

    /// E007: Changeset SQL could not be split into statements
    #[error("[E007] Failed to split SQL of version {number} ({name}): {source}")]
    StatementSplit {
        number: u32,
        name: String,
        source: tm_sql::SqlError,
    },

    /// E008: IO error with file path context
    #[error("[E008] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E009: YAML parse error
    #[error("[E009] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
