//! tm-sql - SQL text layer for Tidemark
//!
//! This crate splits raw changeset text into individually executable
//! statements using the sqlparser-rs tokenizer, and provides identifier
//! quoting for the few statements Tidemark builds itself.

pub mod dialect;
pub mod error;
pub mod quote;
pub mod splitter;

pub use dialect::{DuckDbDialect, GenericDialect, SqlDialect, SqliteDialect};
pub use error::{SqlError, SqlResult};
pub use quote::{is_valid_identifier, quote_ident};
pub use splitter::StatementSplitter;
