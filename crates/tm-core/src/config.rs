//! Configuration types and parsing for tidemark.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tm_db::{DbType, MarkerStorage, DEFAULT_VERSION_COLUMN, DEFAULT_VERSION_TABLE};

const DEFAULT_MIGRATION_DIR: &str = "migrations";
const DEFAULT_DB_PATH: &str = ":memory:";

/// Environment variable consulted when no `--target` is given
pub const TARGET_ENV_VAR: &str = "TM_TARGET";

/// Main project configuration from tidemark.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Directories containing changeset files
    #[serde(default = "default_migration_paths")]
    pub migration_paths: Vec<String>,

    /// Tag applied when neither the CLI nor the target sets one
    #[serde(default)]
    pub tag: Option<String>,

    /// Table holding the version marker when no native register is used
    #[serde(default = "default_version_table")]
    pub version_table: String,

    /// Column of `version_table` holding the marker
    #[serde(default = "default_version_column")]
    pub version_column: String,

    /// Where the marker lives: the backend's native register when it has
    /// one (`auto`) or always the bookkeeping table (`table`)
    #[serde(default)]
    pub marker: MarkerStorage,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Named target configurations (e.g., dev, prod)
    #[serde(default)]
    pub targets: HashMap<String, TargetConfig>,
}

/// Target-specific configuration overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Database configuration override
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Tag override
    #[serde(default)]
    pub tag: Option<String>,
}

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database type (sqlite or duckdb)
    #[serde(rename = "type", default)]
    pub db_type: DbType,

    /// Database file path, or :memory:
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DbType::default(),
            path: default_db_path(),
        }
    }
}

impl DatabaseConfig {
    /// True for an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.path == DEFAULT_DB_PATH
    }
}

/// Effective settings after applying a named target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Target name, if one was selected
    pub name: Option<String>,
    /// Database to connect to, with a file path made absolute
    pub database: DatabaseConfig,
    /// Tag selecting the visible versions
    pub tag: Option<String>,
}

fn default_migration_paths() -> Vec<String> {
    vec![DEFAULT_MIGRATION_DIR.to_string()]
}

fn default_version_table() -> String {
    DEFAULT_VERSION_TABLE.to_string()
}

fn default_version_column() -> String {
    DEFAULT_VERSION_COLUMN.to_string()
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for tidemark.yml or tidemark.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("tidemark.yml");
        let yaml_path = dir.join("tidemark.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.migration_paths.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "At least one migration_paths entry must be specified".to_string(),
            });
        }

        for (what, ident) in [
            ("version_table", &self.version_table),
            ("version_column", &self.version_column),
        ] {
            if !tm_sql::is_valid_identifier(ident) {
                return Err(CoreError::ConfigInvalid {
                    message: format!("{what} '{ident}' is not a valid SQL identifier"),
                });
            }
        }

        Ok(())
    }

    /// Get absolute migration paths relative to a project root
    pub fn migration_paths_absolute(&self, root: &Path) -> Vec<PathBuf> {
        self.migration_paths.iter().map(|p| root.join(p)).collect()
    }

    /// Get the sorted list of available target names
    pub fn available_targets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.targets.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Apply a named target (or none) to the base configuration.
    ///
    /// The target's database and tag replace the base values when set. A
    /// relative database path is resolved against `root`.
    pub fn resolve_target(&self, target: Option<&str>, root: &Path) -> CoreResult<ResolvedTarget> {
        let (database, tag) = match target {
            Some(name) => {
                let target_config =
                    self.targets
                        .get(name)
                        .ok_or_else(|| CoreError::ConfigInvalid {
                            message: format!(
                                "Target '{}' not found. Available targets: {}",
                                name,
                                self.available_targets().join(", ")
                            ),
                        })?;
                (
                    target_config
                        .database
                        .clone()
                        .unwrap_or_else(|| self.database.clone()),
                    target_config.tag.clone().or_else(|| self.tag.clone()),
                )
            }
            None => (self.database.clone(), self.tag.clone()),
        };

        let mut database = database;
        if !database.is_in_memory() && Path::new(&database.path).is_relative() {
            database.path = root.join(&database.path).display().to_string();
        }

        Ok(ResolvedTarget {
            name: target.map(String::from),
            database,
            tag,
        })
    }

    /// Resolve the target name from the CLI flag, falling back to TM_TARGET
    pub fn target_name(cli_target: Option<&str>) -> Option<String> {
        cli_target
            .map(String::from)
            .or_else(|| std::env::var(TARGET_ENV_VAR).ok())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
