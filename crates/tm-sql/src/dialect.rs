//! SQL dialect abstraction

use sqlparser::dialect::{
    Dialect, DuckDbDialect as SqlParserDuckDb, GenericDialect as SqlParserGeneric,
    SQLiteDialect as SqlParserSqlite,
};

use crate::error::{SqlError, SqlResult};
use crate::quote::quote_ident;

/// Trait for SQL dialect implementations
pub trait SqlDialect: Send + Sync {
    /// Get the underlying sqlparser dialect used by the tokenizer
    fn tokenizer_dialect(&self) -> &dyn Dialect;

    /// Quote an identifier for this dialect
    fn quote_ident(&self, ident: &str) -> String {
        quote_ident(ident)
    }

    /// Get the dialect name
    fn name(&self) -> &'static str;
}

/// Build a boxed dialect from its configuration name.
pub fn dialect_from_name(name: &str) -> SqlResult<Box<dyn SqlDialect>> {
    match name.to_lowercase().as_str() {
        "duckdb" => Ok(Box::new(DuckDbDialect::new())),
        "sqlite" => Ok(Box::new(SqliteDialect::new())),
        "generic" => Ok(Box::new(GenericDialect::new())),
        _ => Err(SqlError::UnknownDialect(name.to_string())),
    }
}

/// Dialect-agnostic tokenizing, used when the target database is unknown
#[derive(Default)]
pub struct GenericDialect {
    dialect: SqlParserGeneric,
}

impl GenericDialect {
    /// Create a new generic dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserGeneric {},
        }
    }
}

impl SqlDialect for GenericDialect {
    fn tokenizer_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}

/// DuckDB SQL dialect
#[derive(Default)]
pub struct DuckDbDialect {
    dialect: SqlParserDuckDb,
}

impl DuckDbDialect {
    /// Create a new DuckDB dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserDuckDb {},
        }
    }
}

impl SqlDialect for DuckDbDialect {
    fn tokenizer_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "duckdb"
    }
}

/// SQLite SQL dialect
#[derive(Default)]
pub struct SqliteDialect {
    dialect: SqlParserSqlite,
}

impl SqliteDialect {
    /// Create a new SQLite dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserSqlite {},
        }
    }
}

impl SqlDialect for SqliteDialect {
    fn tokenizer_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
