//! The fixed set of task board columns.

use super::SpecDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five fixed task categories of a specification.
///
/// Column order is significant: it is the order in which the board and the
/// exported document present the columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskColumn {
    /// User-interface work.
    Frontend,
    /// Server-side work.
    Backend,
    /// Schema and data work.
    Database,
    /// Test authoring and verification.
    Testing,
    /// Build, deployment and operations work.
    DevOps,
}

impl TaskColumn {
    /// All columns in board order.
    pub const ALL: [Self; 5] = [
        Self::Frontend,
        Self::Backend,
        Self::Database,
        Self::Testing,
        Self::DevOps,
    ];

    /// Returns the canonical lower-case key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Database => "database",
            Self::Testing => "testing",
            Self::DevOps => "devops",
        }
    }

    /// Returns the human-readable column title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::Database => "Database",
            Self::Testing => "Testing",
            Self::DevOps => "DevOps",
        }
    }

    /// Returns the keys under which a raw payload may store this column, in
    /// lookup order.
    ///
    /// The generation service and the persistence service disagree on key
    /// casing, so the lower-case key and the capitalized title are both
    /// accepted.
    #[must_use]
    pub const fn lookup_keys(self) -> &'static [&'static str] {
        match self {
            Self::Frontend => &["frontend", "Frontend"],
            Self::Backend => &["backend", "Backend"],
            Self::Database => &["database", "Database"],
            Self::Testing => &["testing", "Testing"],
            Self::DevOps => &["devops", "DevOps", "Devops"],
        }
    }
}

impl fmt::Display for TaskColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskColumn {
    type Error = SpecDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == normalized)
            .ok_or_else(|| SpecDomainError::UnknownColumn(value.to_owned()))
    }
}

impl FromStr for TaskColumn {
    type Err = SpecDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}
