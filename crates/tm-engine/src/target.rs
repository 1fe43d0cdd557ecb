//! Requested migration target

use std::fmt;

/// Where a migration run should end up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MigrationTarget {
    /// Highest visible version
    #[default]
    Latest,
    /// A specific version number (0 is the base version)
    Version(u32),
}

impl From<u32> for MigrationTarget {
    fn from(number: u32) -> Self {
        MigrationTarget::Version(number)
    }
}

/// Negative integers mean [`MigrationTarget::Latest`].
impl From<i64> for MigrationTarget {
    fn from(number: i64) -> Self {
        match u32::try_from(number) {
            Ok(n) => MigrationTarget::Version(n),
            Err(_) if number < 0 => MigrationTarget::Latest,
            Err(_) => MigrationTarget::Version(u32::MAX),
        }
    }
}

impl fmt::Display for MigrationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationTarget::Latest => write!(f, "latest"),
            MigrationTarget::Version(n) => write!(f, "{n}"),
        }
    }
}
