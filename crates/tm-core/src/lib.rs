//! tm-core - Core library for Tidemark
//!
//! This crate provides the version model (numbered changesets with up/down
//! SQL, tags and lifecycle hooks), the immutable version registry with its
//! tag filter, discovery of changeset files on disk, and project
//! configuration parsing.

pub mod config;
pub mod discovery;
pub mod error;
pub mod registry;
pub mod version;

pub use config::{Config, DatabaseConfig, ResolvedTarget, TargetConfig};
pub use discovery::{discover_versions, load_version_set, ChangesetConfig};
pub use error::{CoreError, CoreResult};
pub use registry::{filtered_versions, VersionSet};
pub use version::{Direction, Version, VersionHooks, BASE_VERSION};
