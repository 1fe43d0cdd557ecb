//! tm-engine - Migration engine for Tidemark
//!
//! The [`Migrator`] moves a database from the version recorded in its
//! marker to a requested version, one version per transaction, using the
//! versions visible to its tag.

pub mod error;
pub mod migrator;
pub mod report;
pub mod target;

pub use error::{MigrateError, MigrateResult};
pub use migrator::{Migrator, MigratorOptions, PlannedStep};
pub use report::{AppliedStep, MigrationReport};
pub use target::MigrationTarget;
