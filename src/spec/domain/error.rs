//! Error types for specification domain parsing.

use thiserror::Error;

/// Errors returned while parsing specification domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpecDomainError {
    /// The column name is not one of the five fixed task columns.
    #[error("unknown task column: {0}")]
    UnknownColumn(String),

    /// The template type is not one of the supported product templates.
    #[error("unknown template type '{0}', expected Web App, Mobile App, Internal Tool or API Service")]
    UnknownTemplateType(String),

    /// The complexity level is not one of `Low`, `Medium` or `High`.
    #[error("unknown complexity '{0}', expected Low, Medium or High")]
    UnknownComplexity(String),
}
