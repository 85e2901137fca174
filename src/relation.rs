//! Relation model shared by metamorphic tests and algorithm overrides.
//!
//! A [`RelationType`] states what must hold between a classifier's output on
//! the original data and on the morphed data. [`PredictionType`] states which
//! output is compared, and [`TransformKind`] states what category of change a
//! morph performs.

use crate::error::{MorphError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Expected relation between original and morphed outputs.
///
/// Tokens are parsed case-insensitively, so `equal`, `EQUAL` and `Equal`
/// all map to [`RelationType::Equal`].
///
/// # Example
///
/// ```
/// use morphtest::relation::RelationType;
///
/// let relation: RelationType = "inverted".parse().expect("known token");
/// assert_eq!(relation, RelationType::Inverted);
/// assert_eq!(relation.token(), "INVERTED");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    /// Outputs must be identical.
    Equal,
    /// Binary outputs must be flipped.
    Inverted,
    /// Ranking of class scores must be preserved.
    OrderPreserving,
    /// Scores must agree within a tolerance.
    Approximate,
    /// No relation is expected; the generated check is skipped.
    Skip,
}

impl RelationType {
    /// Upper-case token used in catalogs and generated code.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::Inverted => "INVERTED",
            Self::OrderPreserving => "ORDER_PRESERVING",
            Self::Approximate => "APPROXIMATE",
            Self::Skip => "SKIP",
        }
    }

    /// All relation types.
    #[must_use]
    pub fn all() -> &'static [RelationType] {
        &[
            Self::Equal,
            Self::Inverted,
            Self::OrderPreserving,
            Self::Approximate,
            Self::Skip,
        ]
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for RelationType {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|r| r.token() == upper)
            .ok_or_else(|| MorphError::UnknownToken {
                kind: "relation type",
                token: s.to_string(),
            })
    }
}

/// Which classifier output a metamorphic test compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictionType {
    /// Plain class predictions, row by row.
    Class,
    /// Class predictions on permuted rows; row identity must be
    /// re-established before comparing.
    OrderedData,
    /// Class probabilities or scores.
    Score,
}

impl PredictionType {
    /// Upper-case token used in generated code.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            Self::Class => "CLASS",
            Self::OrderedData => "ORDERED_DATA",
            Self::Score => "SCORE",
        }
    }
}

impl fmt::Display for PredictionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Category of change a morph applies to a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransformKind {
    /// Rows are permuted.
    InstanceOrder,
    /// Feature columns are permuted.
    AttributeOrder,
    /// A constant is added to feature values.
    ValueShift,
    /// Feature values are multiplied by a factor.
    ValueScale,
    /// Class labels are rewritten.
    LabelChange,
    /// Rows are repeated.
    Duplication,
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InstanceOrder => "instance order",
            Self::AttributeOrder => "attribute order",
            Self::ValueShift => "value shift",
            Self::ValueScale => "value scale",
            Self::LabelChange => "label change",
            Self::Duplication => "duplication",
        };
        f.write_str(s)
    }
}
