//! The migration engine.
//!
//! A [`Migrator`] takes a snapshot of the versions visible to its tag when
//! it is built, reads the current version from the marker and walks toward
//! the requested target one version at a time. Each step's statements and
//! the marker update commit together in one transaction, so the marker
//! always names the last version whose step committed.

use crate::error::{MigrateError, MigrateResult};
use crate::report::{AppliedStep, MigrationReport};
use crate::target::MigrationTarget;
use std::sync::Arc;
use tm_core::{Direction, Version, VersionSet, BASE_VERSION};
use tm_db::{
    version_store_for, with_transaction, Database, MarkerStorage, VersionStore,
    DEFAULT_VERSION_COLUMN, DEFAULT_VERSION_TABLE,
};
use tm_sql::StatementSplitter;

/// Settings for a [`Migrator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratorOptions {
    /// Tag selecting the visible versions; `None` sees untagged versions only
    pub tag: Option<String>,
    /// Marker table name, used when the table store is selected
    pub version_table: String,
    /// Marker column name, used when the table store is selected
    pub version_column: String,
    /// Marker storage selection
    pub marker: MarkerStorage,
}

impl Default for MigratorOptions {
    fn default() -> Self {
        Self {
            tag: None,
            version_table: DEFAULT_VERSION_TABLE.to_string(),
            version_column: DEFAULT_VERSION_COLUMN.to_string(),
            marker: MarkerStorage::Auto,
        }
    }
}

impl MigratorOptions {
    /// Default options with `tag` set
    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }
}

/// One step of a migration plan
#[derive(Debug, Clone)]
pub struct PlannedStep {
    /// Version whose SQL runs: the one entered going up, the one left going down
    pub version: Arc<Version>,
    /// Which block of `version` runs
    pub direction: Direction,
    /// Marker value before the step
    pub from: u32,
    /// Marker value after the step
    pub to: u32,
}

/// Migration engine bound to one database
pub struct Migrator<'a> {
    db: &'a dyn Database,
    versions: Vec<Arc<Version>>,
    tag: Option<String>,
    store: Box<dyn VersionStore>,
    splitter: StatementSplitter,
}

impl<'a> Migrator<'a> {
    /// Create a migrator for `db` over the versions of `set` visible to
    /// `options.tag`
    pub fn new(db: &'a dyn Database, set: &VersionSet, options: MigratorOptions) -> MigrateResult<Self> {
        let store = version_store_for(
            db,
            options.marker,
            &options.version_table,
            &options.version_column,
        )
        .map_err(MigrateError::Marker)?;
        let splitter = StatementSplitter::from_dialect_name(db.dialect_name())?;
        let versions = set.filtered(options.tag.as_deref());
        log::debug!(
            "{} of {} versions visible, marker in {}, {} statement splitting",
            versions.len() - 1,
            set.user_version_count(),
            store.describe(),
            splitter.dialect_name()
        );
        Ok(Self {
            db,
            versions,
            tag: options.tag,
            store,
            splitter,
        })
    }

    /// Tag this migrator filters by
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Visible versions, ascending by number, starting with the base version
    pub fn visible_versions(&self) -> &[Arc<Version>] {
        &self.versions
    }

    /// Highest visible version number
    pub fn latest_version(&self) -> u32 {
        self.versions.last().map_or(BASE_VERSION, |v| v.number())
    }

    /// Splitter tokenizing changesets with the database's dialect
    pub fn splitter(&self) -> &StatementSplitter {
        &self.splitter
    }

    /// Where the marker lives
    pub fn marker_description(&self) -> String {
        self.store.describe()
    }

    /// Version currently recorded in the database
    pub fn current_version(&self) -> MigrateResult<u32> {
        self.store.read(self.db).map_err(MigrateError::Marker)
    }

    /// Compute the steps `migrate(target)` would apply, without touching
    /// the database beyond reading the marker
    pub fn plan(&self, target: impl Into<MigrationTarget>) -> MigrateResult<Vec<PlannedStep>> {
        let current = self.current_version()?;
        self.plan_from(current, target.into())
    }

    /// Move the database to `target`.
    ///
    /// Steps run in order, each in its own transaction together with the
    /// marker update. The first failure stops the run; earlier steps stay
    /// committed and the marker names the last of them. On error no report
    /// is returned: [`Migrator::current_version`] tells how far the run got,
    /// and a [`MigrateError::Hook`] carries that version as `marker`.
    pub fn migrate(&self, target: impl Into<MigrationTarget>) -> MigrateResult<MigrationReport> {
        let target = target.into();
        let current = self.current_version()?;
        let plan = self.plan_from(current, target)?;
        if plan.is_empty() {
            log::info!("Database already at version {current}, nothing to migrate");
            return Ok(MigrationReport::unchanged(current));
        }

        let mut steps = Vec::with_capacity(plan.len());
        for step in &plan {
            steps.push(self.apply(step)?);
        }

        let to = steps.last().map_or(current, |s| s.to);
        Ok(MigrationReport {
            from: current,
            to,
            steps,
        })
    }

    fn plan_from(&self, current: u32, target: MigrationTarget) -> MigrateResult<Vec<PlannedStep>> {
        let target = match target {
            MigrationTarget::Latest if self.versions.len() <= 1 => return Ok(Vec::new()),
            MigrationTarget::Latest => self.latest_version(),
            MigrationTarget::Version(number) => number,
        };
        if target == current {
            return Ok(Vec::new());
        }
        let target_idx = self.position(target).ok_or_else(|| MigrateError::UnknownTarget {
            target,
            tag: self.tag.clone(),
        })?;
        let current_idx = self.position(current).ok_or_else(|| MigrateError::UnknownCurrent {
            current,
            tag: self.tag.clone(),
        })?;

        let steps = if target_idx > current_idx {
            (current_idx + 1..=target_idx)
                .map(|i| PlannedStep {
                    version: Arc::clone(&self.versions[i]),
                    direction: Direction::Up,
                    from: self.versions[i - 1].number(),
                    to: self.versions[i].number(),
                })
                .collect()
        } else {
            (target_idx + 1..=current_idx)
                .rev()
                .map(|i| PlannedStep {
                    version: Arc::clone(&self.versions[i]),
                    direction: Direction::Down,
                    from: self.versions[i].number(),
                    to: self.versions[i - 1].number(),
                })
                .collect()
        };
        Ok(steps)
    }

    fn position(&self, number: u32) -> Option<usize> {
        self.versions
            .binary_search_by_key(&number, |v| v.number())
            .ok()
    }

    fn apply(&self, step: &PlannedStep) -> MigrateResult<AppliedStep> {
        let version = &step.version;
        let statements = version.statements(step.direction, &self.splitter)?;
        log::info!(
            "Migrating {} {} -> {}: {} ({} statements)",
            step.direction,
            step.from,
            step.to,
            version.name(),
            statements.len()
        );

        with_transaction(self.db, |db| -> MigrateResult<()> {
            for (index, statement) in statements.iter().enumerate() {
                log::debug!("[{}:{}] {statement}", version.number(), index + 1);
                db.execute(statement)
                    .map_err(|source| MigrateError::Statement {
                        number: version.number(),
                        name: version.name().to_string(),
                        direction: step.direction,
                        index: index + 1,
                        statement: statement.clone(),
                        source,
                    })?;
            }
            self.store.write(db, step.to).map_err(MigrateError::Marker)
        })?;

        if let Some(hooks) = version.hooks() {
            let result = match step.direction {
                Direction::Up => hooks.after_up(self.db),
                Direction::Down => hooks.after_down(self.db),
            };
            result.map_err(|source| MigrateError::Hook {
                number: version.number(),
                name: version.name().to_string(),
                direction: step.direction,
                marker: step.to,
                source,
            })?;
        }

        Ok(AppliedStep {
            number: version.number(),
            name: version.name().to_string(),
            direction: step.direction,
            from: step.from,
            to: step.to,
            statements: statements.len(),
        })
    }
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;
