//! Statement splitting for changeset text.
//!
//! Drivers execute one statement per call when Tidemark needs to report
//! which statement of a changeset failed, so raw `up`/`down` blocks are cut
//! at top-level `;` terminators. The sqlparser tokenizer does the lexing,
//! which keeps terminators inside string literals, quoted identifiers,
//! dollar-quoted bodies and comments intact.

use crate::dialect::{dialect_from_name, GenericDialect, SqlDialect};
use crate::dialect::{DuckDbDialect, SqliteDialect};
use crate::error::{SqlError, SqlResult};
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Location, Token, Tokenizer};

/// Splits raw SQL text into individually executable statements
pub struct StatementSplitter {
    dialect: Box<dyn SqlDialect>,
}

impl StatementSplitter {
    /// Create a splitter using dialect-agnostic tokenizing
    pub fn generic() -> Self {
        Self {
            dialect: Box::new(GenericDialect::new()),
        }
    }

    /// Create a splitter with DuckDB tokenizing rules
    pub fn duckdb() -> Self {
        Self {
            dialect: Box::new(DuckDbDialect::new()),
        }
    }

    /// Create a splitter with SQLite tokenizing rules
    pub fn sqlite() -> Self {
        Self {
            dialect: Box::new(SqliteDialect::new()),
        }
    }

    /// Create a splitter from a dialect name
    pub fn from_dialect_name(name: &str) -> SqlResult<Self> {
        Ok(Self {
            dialect: dialect_from_name(name)?,
        })
    }

    /// Get the dialect name
    pub fn dialect_name(&self) -> &'static str {
        self.dialect.name()
    }

    /// Split `sql` into trimmed statements, in source order.
    ///
    /// Fragments holding nothing but whitespace or comments are dropped, so
    /// an empty or comment-only block yields an empty vector.
    pub fn split(&self, sql: &str) -> SqlResult<Vec<String>> {
        if sql.trim().is_empty() {
            return Ok(Vec::new());
        }

        let tokens = Tokenizer::new(self.dialect.tokenizer_dialect(), sql)
            .tokenize_with_location()
            .map_err(|e| SqlError::TokenizeError {
                message: e.message,
                line: e.location.line as usize,
                column: e.location.column as usize,
            })?;

        let offsets = LineOffsets::new(sql);
        let mut statements = Vec::new();
        let mut start = 0;
        let mut has_content = false;
        let mut block = BlockTracker::default();

        for tok in &tokens {
            match &tok.token {
                Token::Whitespace(_) | Token::EOF => {}
                Token::SemiColon if block.depth == 0 => {
                    let end = offsets.byte_offset(sql, tok.span.start);
                    if has_content {
                        push_trimmed(&mut statements, &sql[start..end]);
                    }
                    start = end + 1;
                    has_content = false;
                    block = BlockTracker::default();
                }
                token => {
                    has_content = true;
                    block.observe(token);
                }
            }
        }

        if has_content {
            push_trimmed(&mut statements, &sql[start..]);
        }
        Ok(statements)
    }
}

impl Default for StatementSplitter {
    fn default() -> Self {
        Self::generic()
    }
}

fn push_trimmed(statements: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
}

/// Tracks `BEGIN ... END` bodies of `CREATE TRIGGER` statements, whose inner
/// `;` terminators belong to the trigger and must not split it.
#[derive(Default)]
struct BlockTracker {
    leading: Option<Keyword>,
    saw_trigger: bool,
    depth: usize,
}

impl BlockTracker {
    fn observe(&mut self, token: &Token) {
        let keyword = match token {
            Token::Word(word) => word.keyword,
            _ => Keyword::NoKeyword,
        };
        let leading = *self.leading.get_or_insert(keyword);
        if leading != Keyword::CREATE {
            return;
        }

        match keyword {
            Keyword::TRIGGER => self.saw_trigger = true,
            Keyword::BEGIN if self.saw_trigger => self.depth += 1,
            Keyword::CASE if self.depth > 0 => self.depth += 1,
            Keyword::END if self.depth > 0 => self.depth -= 1,
            _ => {}
        }
    }
}

/// Maps tokenizer locations (1-based line, 1-based char column) back to
/// byte offsets in the source text.
struct LineOffsets {
    starts: Vec<usize>,
}

impl LineOffsets {
    fn new(sql: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            sql.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { starts }
    }

    fn byte_offset(&self, sql: &str, location: Location) -> usize {
        let line = (location.line as usize).saturating_sub(1);
        let Some(&line_start) = self.starts.get(line) else {
            return sql.len();
        };
        sql[line_start..]
            .char_indices()
            .nth((location.column as usize).saturating_sub(1))
            .map_or(sql.len(), |(i, _)| line_start + i)
    }
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
