//! The version registry and its tag filter.
//!
//! A [`VersionSet`] is built once from the materialized changesets and never
//! changes afterwards. Each migration run takes a filtered snapshot of it
//! with [`VersionSet::filtered`].

use crate::error::{CoreError, CoreResult};
use crate::version::{Version, BASE_VERSION};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Immutable set of known versions, sorted ascending by number, always
/// holding the base version
#[derive(Debug, Clone)]
pub struct VersionSet {
    versions: Vec<Arc<Version>>,
}

impl VersionSet {
    /// Build a registry from user versions.
    ///
    /// Fails on a version numbered 0 (reserved for the base version) or on
    /// two versions sharing a number.
    pub fn new(versions: impl IntoIterator<Item = Version>) -> CoreResult<Self> {
        let mut all: Vec<Arc<Version>> = Vec::new();
        for version in versions {
            if version.number() == BASE_VERSION {
                return Err(CoreError::ReservedVersion {
                    name: version.name().to_string(),
                });
            }
            all.push(Arc::new(version));
        }

        all.sort_by_key(|v| v.number());
        for pair in all.windows(2) {
            if pair[0].number() == pair[1].number() {
                return Err(CoreError::DuplicateVersion {
                    number: pair[0].number(),
                    first: pair[0].name().to_string(),
                    second: pair[1].name().to_string(),
                });
            }
        }

        all.insert(0, Arc::new(Version::base()));
        Ok(Self { versions: all })
    }

    /// A registry holding only the base version
    pub fn base_only() -> Self {
        Self {
            versions: vec![Arc::new(Version::base())],
        }
    }

    /// Every version, base included, ascending
    pub fn all(&self) -> &[Arc<Version>] {
        &self.versions
    }

    /// Number of user versions (the base version is not counted)
    pub fn user_version_count(&self) -> usize {
        self.versions.len() - 1
    }

    /// Look up a version by number
    pub fn get(&self, number: u32) -> Option<&Arc<Version>> {
        self.versions
            .binary_search_by_key(&number, |v| v.number())
            .ok()
            .map(|idx| &self.versions[idx])
    }

    /// Every tag used by any version
    pub fn tags(&self) -> BTreeSet<&str> {
        self.versions
            .iter()
            .flat_map(|v| v.tags().iter().map(String::as_str))
            .collect()
    }

    /// Snapshot of the versions visible to a run requesting `tag`
    pub fn filtered(&self, tag: Option<&str>) -> Vec<Arc<Version>> {
        filtered_versions(&self.versions, tag)
    }
}

/// Compute the versions visible to a run requesting `tag`, ascending by
/// number.
///
/// The base version is always part of the result, inserted if `all` lacks
/// it. Untagged versions are always visible; tagged versions only when
/// `tag` is one of their tags.
pub fn filtered_versions(all: &[Arc<Version>], tag: Option<&str>) -> Vec<Arc<Version>> {
    let mut visible: Vec<Arc<Version>> = all
        .iter()
        .filter(|v| v.is_visible(tag))
        .cloned()
        .collect();
    if !visible.iter().any(|v| v.is_base()) {
        visible.push(Arc::new(Version::base()));
    }
    visible.sort_by_key(|v| v.number());
    visible
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
