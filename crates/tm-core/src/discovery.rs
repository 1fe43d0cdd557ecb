//! Changeset discovery from the file system.
//!
//! A changeset is a `<name>.<version>.sql` file whose body is divided into
//! sections by marker comments:
//!
//! ```sql
//! -- tm:up
//! CREATE TABLE users (name TEXT NOT NULL);
//! -- tm:down
//! DROP TABLE users;
//! ```
//!
//! Tags and a description come from an optional 1:1 YAML file with the
//! same stem (`<name>.<version>.yml` or `.yaml`).

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::registry::VersionSet;
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const UP_MARKER: &str = "tm:up";
const DOWN_MARKER: &str = "tm:down";

/// Configuration for a changeset from its .yml file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangesetConfig {
    /// Tags restricting the changeset to runs requesting one of them
    #[serde(default)]
    pub tags: Vec<String>,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
}

impl ChangesetConfig {
    /// Load changeset configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: ChangesetConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Split a changeset file name into `(name, version)`.
///
/// The file name must look like `<name>.<version>.sql` where `<version>` is
/// a positive integer.
pub fn parse_changeset_filename(path: &Path) -> CoreResult<(String, u32)> {
    let invalid = |reason: &str| CoreError::InvalidFilename {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };

    let stem = path
        .file_name()
        .and_then(|s| s.to_str())
        .and_then(|s| s.strip_suffix(".sql"))
        .ok_or_else(|| invalid("not a .sql file"))?;
    let (name, number) = stem
        .rsplit_once('.')
        .ok_or_else(|| invalid("missing version number"))?;
    if name.is_empty() {
        return Err(invalid("missing name"));
    }
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("version is not a non-negative integer"));
    }
    let number: u32 = number
        .parse()
        .map_err(|_| invalid("version number out of range"))?;
    if number == 0 {
        return Err(invalid("version 0 is reserved"));
    }
    Ok((name.to_string(), number))
}

/// Split a changeset body into its `(up, down)` SQL blocks.
///
/// Text before the first marker is ignored; a missing section is empty.
pub fn parse_changeset_body(path: &Path, body: &str) -> CoreResult<(String, String)> {
    #[derive(Clone, Copy, PartialEq)]
    enum Section {
        Preamble,
        Up,
        Down,
    }

    let mut section = Section::Preamble;
    let mut seen_up = false;
    let mut seen_down = false;
    let mut up = String::new();
    let mut down = String::new();

    for line in body.lines() {
        match section_marker(line) {
            Some(UP_MARKER) if seen_up => return Err(duplicate_marker(path, UP_MARKER)),
            Some(DOWN_MARKER) if seen_down => return Err(duplicate_marker(path, DOWN_MARKER)),
            Some(UP_MARKER) => {
                seen_up = true;
                section = Section::Up;
            }
            Some(_) => {
                seen_down = true;
                section = Section::Down;
            }
            None => {
                let target = match section {
                    Section::Preamble => continue,
                    Section::Up => &mut up,
                    Section::Down => &mut down,
                };
                target.push_str(line);
                target.push('\n');
            }
        }
    }

    if !seen_up && !seen_down {
        log::warn!(
            "Changeset {} has no '-- {UP_MARKER}' or '-- {DOWN_MARKER}' marker; treating it as empty",
            path.display()
        );
    }
    Ok((up, down))
}

fn section_marker(line: &str) -> Option<&'static str> {
    let comment = line.trim().strip_prefix("--")?.trim();
    if comment.eq_ignore_ascii_case(UP_MARKER) {
        Some(UP_MARKER)
    } else if comment.eq_ignore_ascii_case(DOWN_MARKER) {
        Some(DOWN_MARKER)
    } else {
        None
    }
}

fn duplicate_marker(path: &Path, marker: &str) -> CoreError {
    CoreError::ChangesetParseError {
        path: path.display().to_string(),
        message: format!("'-- {marker}' appears more than once"),
    }
}

/// Load one changeset file, together with its optional YAML sidecar
pub fn load_changeset(path: &Path) -> CoreResult<Version> {
    let (name, number) = parse_changeset_filename(path)?;
    let body = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;
    let (up, down) = parse_changeset_body(path, &body)?;

    let yml_path = path.with_extension("yml");
    let yaml_path = path.with_extension("yaml");
    let config = if yml_path.exists() {
        ChangesetConfig::load(&yml_path)?
    } else if yaml_path.exists() {
        ChangesetConfig::load(&yaml_path)?
    } else {
        ChangesetConfig::default()
    };

    let mut version = Version::new(name, number, up, down).with_tags(config.tags);
    if let Some(description) = config.description {
        version = version.with_description(description);
    }
    Ok(version)
}

/// Discover all changeset files in the given directories, sorted by version
pub fn discover_versions(paths: &[PathBuf]) -> CoreResult<Vec<Version>> {
    let mut versions = Vec::new();

    for path in paths {
        if !path.exists() {
            log::debug!("Changeset directory {} does not exist, skipping", path.display());
            continue;
        }
        discover_recursive(path, &mut versions)?;
    }

    versions.sort_by_key(|v| v.number());
    Ok(versions)
}

fn discover_recursive(dir: &Path, versions: &mut Vec<Version>) -> CoreResult<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })?;

    for path in sorted_entry_paths(dir, entries.map(|entry| entry.map(|e| e.path())))? {
        if path.is_dir() {
            discover_recursive(&path, versions)?;
        } else if path.extension().is_some_and(|e| e == "sql") {
            versions.push(load_changeset(&path)?);
        } else if !path.extension().is_some_and(|e| e == "yml" || e == "yaml") {
            log::warn!("Ignoring non-changeset file {}", path.display());
        }
    }
    Ok(())
}

/// Collect directory entries in name order, failing on the first entry
/// that could not be read.
fn sorted_entry_paths<I>(dir: &Path, entries: I) -> CoreResult<Vec<PathBuf>>
where
    I: IntoIterator<Item = std::io::Result<PathBuf>>,
{
    let mut paths = entries
        .into_iter()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;
    paths.sort();
    Ok(paths)
}

/// Discover the changesets of a project and build its registry
pub fn load_version_set(config: &Config, root: &Path) -> CoreResult<VersionSet> {
    let versions = discover_versions(&config.migration_paths_absolute(root))?;
    log::debug!("Discovered {} changesets", versions.len());
    VersionSet::new(versions)
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
