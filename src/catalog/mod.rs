//! Algorithm catalog: the classifiers under test.
//!
//! The catalog is a YAML stream with one algorithm per document. A null
//! document ends the stream. Records are validated on ingest: unknown
//! fields, missing required fields and unknown tokens are errors, so a
//! malformed catalog aborts before anything is generated.
//!
//! ```yaml
//! name: NaiveBayes
//! type: classification
//! framework: weka
//! package: weka.classifiers.bayes
//! class: weka.classifiers.bayes.NaiveBayes
//! features: numeric
//! parameters:
//!   K:
//!     type: flag
//!     default: "false"
//! properties:
//!   scale: equal
//! ---
//! name: KNN
//! ...
//! ```

mod parser;

pub use parser::{load, parse_str};

use crate::error::{MorphError, Result};
use crate::relation::RelationType;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kinds of feature columns an algorithm supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    /// Any real value.
    Numeric,
    /// Non-negative real values.
    Positive,
    /// Real values in `[0, 1]`.
    Unit,
    /// Categorical values only.
    Nominal,
    /// Numeric and categorical columns.
    Mixed,
}

impl FeatureType {
    /// Upper-case token.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            Self::Numeric => "NUMERIC",
            Self::Positive => "POSITIVE",
            Self::Unit => "UNIT",
            Self::Nominal => "NOMINAL",
            Self::Mixed => "MIXED",
        }
    }

    /// All feature types.
    #[must_use]
    pub fn all() -> &'static [FeatureType] {
        &[
            Self::Numeric,
            Self::Positive,
            Self::Unit,
            Self::Nominal,
            Self::Mixed,
        ]
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for FeatureType {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|f| f.token() == upper)
            .ok_or_else(|| MorphError::UnknownToken {
                kind: "feature type",
                token: s.to_string(),
            })
    }
}

/// One hyperparameter with its configuration entries (e.g. `type`,
/// `default`, `min`, `max`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    name: String,
    values: BTreeMap<String, String>,
}

impl Parameter {
    /// Create a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, values: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration entries, sorted by key.
    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// A single configuration entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// A classifier under test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Algorithm {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    framework: String,
    package: String,
    class: String,
    parameters: Vec<Parameter>,
    features: FeatureType,
    properties: BTreeMap<String, RelationType>,
}

impl Algorithm {
    /// Algorithm name, e.g. `NaiveBayes`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Task type, e.g. `classification`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Framework identifier as written in the catalog.
    #[must_use]
    pub fn framework(&self) -> &str {
        &self.framework
    }

    /// Package qualifier.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Fully-qualified implementation reference.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Last segment of the implementation reference.
    #[must_use]
    pub fn simple_class_name(&self) -> &str {
        self.class.rsplit('.').next().unwrap_or(&self.class)
    }

    /// Hyperparameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Supported feature type.
    #[must_use]
    pub fn features(&self) -> FeatureType {
        self.features
    }

    /// Relation overrides keyed by upper-case property name.
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, RelationType> {
        &self.properties
    }

    /// Override for `property`, looked up case-insensitively.
    #[must_use]
    pub fn property_override(&self, property: &str) -> Option<RelationType> {
        self.properties.get(&property.to_uppercase()).copied()
    }
}
