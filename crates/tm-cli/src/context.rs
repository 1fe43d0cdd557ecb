//! Runtime context for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tm_core::{load_version_set, Config, ResolvedTarget, VersionSet};
use tm_db::{connect, Database};
use tm_engine::{Migrator, MigratorOptions};

use crate::cli::GlobalArgs;

/// Loaded project: configuration, selected target and discovered versions
pub(crate) struct ProjectContext {
    /// Project root directory
    pub root: PathBuf,

    /// Parsed tidemark.yml
    pub config: Config,

    /// Database and tag after applying the target and CLI overrides
    pub target: ResolvedTarget,

    /// Every discovered version, before tag filtering
    pub versions: VersionSet,
}

impl ProjectContext {
    /// Load the project described by the global arguments
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);

        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(&root).context("Failed to load project configuration")?
        };

        let target_name = Config::target_name(args.target.as_deref());
        let mut target = config
            .resolve_target(target_name.as_deref(), &root)
            .context("Failed to resolve target")?;
        if args.tag.is_some() {
            target.tag = args.tag.clone();
        }

        let versions = load_version_set(&config, &root).context("Failed to load changesets")?;
        log::debug!(
            "Loaded {} changesets for project '{}'",
            versions.user_version_count(),
            config.name
        );

        Ok(Self {
            root,
            config,
            target,
            versions,
        })
    }

    /// Open the target database
    pub fn connect(&self) -> Result<Box<dyn Database>> {
        let database = &self.target.database;
        connect(database.db_type, &database.path).with_context(|| {
            format!(
                "Failed to connect to {} database at {}",
                database.db_type, database.path
            )
        })
    }

    /// Build a migrator over `db` with the project's marker settings
    pub fn migrator<'a>(&self, db: &'a dyn Database) -> Result<Migrator<'a>> {
        let options = MigratorOptions {
            tag: self.target.tag.clone(),
            version_table: self.config.version_table.clone(),
            version_column: self.config.version_column.clone(),
            marker: self.config.marker,
        };
        Migrator::new(db, &self.versions, options).context("Failed to set up migrator")
    }

    /// Human-readable description of the tag filter
    pub fn tag_label(&self) -> String {
        match &self.target.tag {
            Some(tag) => format!("tag '{tag}'"),
            None => "no tag".to_string(),
        }
    }
}
