//! Versions: numbered schema changesets.
//!
//! A [`Version`] pairs forward (`up`) and reverse (`down`) SQL with a
//! number, a display name and an optional tag set. Statement lists are
//! split on demand with the dialect of the database they will run on.

use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tm_db::{Database, DbResult};
use tm_sql::StatementSplitter;

/// Number of the synthetic base version, meaning "no changesets applied"
pub const BASE_VERSION: u32 = 0;

/// Direction of a migration step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Apply a version's `up` SQL
    Up,
    /// Apply a version's `down` SQL
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.pad("up"),
            Direction::Down => f.pad("down"),
        }
    }
}

/// Optional lifecycle hooks run after a version's step has committed.
///
/// Both methods default to no-ops, so implementors override only what they
/// need.
pub trait VersionHooks: Send + Sync {
    /// Called after the version's `up` statements committed
    fn after_up(&self, _db: &dyn Database) -> DbResult<()> {
        Ok(())
    }

    /// Called after the version's `down` statements committed
    fn after_down(&self, _db: &dyn Database) -> DbResult<()> {
        Ok(())
    }
}

/// One schema changeset
#[derive(Clone)]
pub struct Version {
    name: String,
    number: u32,
    up_text: String,
    down_text: String,
    tags: BTreeSet<String>,
    description: Option<String>,
    hooks: Option<Arc<dyn VersionHooks>>,
}

impl Version {
    /// Create an untagged version
    pub fn new(
        name: impl Into<String>,
        number: u32,
        up_text: impl Into<String>,
        down_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            number,
            up_text: up_text.into(),
            down_text: down_text.into(),
            tags: BTreeSet::new(),
            description: None,
            hooks: None,
        }
    }

    /// The synthetic base version: number 0, no SQL, no tags
    pub(crate) fn base() -> Self {
        Self::new("base", BASE_VERSION, "", "")
    }

    /// Restrict visibility to migrations run with one of `tags`
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a free-form description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach lifecycle hooks
    pub fn with_hooks(mut self, hooks: Arc<dyn VersionHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Human-readable name (display only)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version number
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Whether this is the synthetic base version
    pub fn is_base(&self) -> bool {
        self.number == BASE_VERSION
    }

    /// Raw forward SQL
    pub fn up_text(&self) -> &str {
        &self.up_text
    }

    /// Raw reverse SQL
    pub fn down_text(&self) -> &str {
        &self.down_text
    }

    /// Tag set; empty means visible to every run
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Lifecycle hooks, if any
    pub fn hooks(&self) -> Option<&dyn VersionHooks> {
        self.hooks.as_deref()
    }

    /// Whether a run requesting `tag` can see this version.
    ///
    /// The base version and untagged versions are always visible; a tagged
    /// version only when `tag` is one of its tags.
    pub fn is_visible(&self, tag: Option<&str>) -> bool {
        if self.is_base() || self.tags.is_empty() {
            return true;
        }
        tag.is_some_and(|t| self.tags.contains(t))
    }

    /// Individual statements of the `up` SQL, tokenized by `splitter`
    pub fn up_statements(&self, splitter: &StatementSplitter) -> CoreResult<Vec<String>> {
        self.split(splitter, &self.up_text)
    }

    /// Individual statements of the `down` SQL, tokenized by `splitter`
    pub fn down_statements(&self, splitter: &StatementSplitter) -> CoreResult<Vec<String>> {
        self.split(splitter, &self.down_text)
    }

    /// Statements for a step in `direction`
    pub fn statements(
        &self,
        direction: Direction,
        splitter: &StatementSplitter,
    ) -> CoreResult<Vec<String>> {
        match direction {
            Direction::Up => self.up_statements(splitter),
            Direction::Down => self.down_statements(splitter),
        }
    }

    fn split(&self, splitter: &StatementSplitter, text: &str) -> CoreResult<Vec<String>> {
        splitter
            .split(text)
            .map_err(|source| CoreError::StatementSplit {
                number: self.number,
                name: self.name.clone(),
                source,
            })
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Version")
            .field("name", &self.name)
            .field("number", &self.number)
            .field("tags", &self.tags)
            .field("has_hooks", &self.hooks.is_some())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number, self.name)
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
