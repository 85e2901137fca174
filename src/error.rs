//! Error types for morphtest operations.
//!
//! Every failure in the generator is fatal: nothing is retried or skipped,
//! and each variant carries enough context to find the offending catalog
//! record, parameter or file.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for morphtest operations.
///
/// # Examples
///
/// ```
/// use morphtest::error::MorphError;
///
/// let err = MorphError::InvalidParameter {
///     param: "informative".to_string(),
///     value: "12".to_string(),
///     constraint: "<= features (10)".to_string(),
/// };
/// assert!(err.to_string().contains("informative"));
/// ```
#[derive(Error, Debug)]
pub enum MorphError {
    /// A catalog record is malformed or misses a required field.
    #[error("Catalog error in record {record}: {message}")]
    Catalog {
        /// One-based index of the record in the catalog stream
        record: usize,
        /// What is wrong with the record
        message: String,
    },

    /// A case-insensitive token did not match any known variant.
    #[error("Unknown {kind} token: {token}")]
    UnknownToken {
        /// Token family (e.g. "feature type", "relation type")
        kind: &'static str,
        /// Offending token as written
        token: String,
    },

    /// YAML could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Parameter outside its valid domain.
    #[error("Invalid parameter: {param} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Filesystem failure with the operation that triggered it.
    #[error("I/O error while {context} ({}): {source}", path.display())]
    Io {
        /// What the generator was doing
        context: String,
        /// Path involved in the failure
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Code template failed to compile or render.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// No code generator is registered for the framework.
    #[error("No test case generator registered for framework '{0}'")]
    UnknownFramework(String),

    /// Structural problem with a dataset (e.g. row width mismatch).
    #[error("Dataset error: {0}")]
    Dataset(String),
}

impl MorphError {
    /// Create an I/O error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            path: path.into(),
            source,
        }
    }

    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(
        param: &str,
        value: impl std::fmt::Display,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    /// Create a catalog error for the given one-based record index.
    #[must_use]
    pub fn catalog(record: usize, message: impl Into<String>) -> Self {
        Self::Catalog {
            record,
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, MorphError>;
