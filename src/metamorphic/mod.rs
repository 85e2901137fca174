//! Metamorphic tests: seeded dataset transformations with a declared
//! expectation on how the classifier's output must change.
//!
//! The seed is an argument of [`MetamorphicTest::morph_data`], so a single
//! test instance can be shared across threads and iterations; the same
//! (dataset, seed) pair always yields the same morphed dataset.
//!
//! # Example
//!
//! ```
//! use morphtest::data::{generate_data, SyntheticSpec};
//! use morphtest::metamorphic::{MetamorphicTest, ScrambleInstances};
//! use morphtest::relation::RelationType;
//!
//! let data = generate_data(&SyntheticSpec::new(3, 1, 20).with_seed(1)).expect("valid spec");
//! let morphed = ScrambleInstances.morph_data(&data, 1).expect("scramble never fails");
//! assert_eq!(ScrambleInstances.relation(), RelationType::Equal);
//! assert_eq!(morphed.relation(), "synthetic_ScrambleInstances");
//! assert_eq!(morphed.num_instances(), data.num_instances());
//! ```

mod transforms;

pub use transforms::{
    ConstantShift, DuplicateInstances, InvertClass, ReorderAttributes, ScaleFeatures,
    ScrambleInstances,
};

use crate::catalog::Algorithm;
use crate::data::Dataset;
use crate::error::{MorphError, Result};
use crate::relation::{PredictionType, RelationType, TransformKind};
use std::fmt;

/// A seeded dataset transformation with an expected output relation.
pub trait MetamorphicTest: Send + Sync + fmt::Debug {
    /// Name used in file names, relation names and generated code.
    fn name(&self) -> &str;

    /// Which output is compared.
    fn prediction_type(&self) -> PredictionType;

    /// Relation expected between original and morphed outputs.
    fn relation(&self) -> RelationType;

    /// Category of change the morph performs.
    fn kind(&self) -> TransformKind;

    /// Upper-case semantic property an algorithm can override
    /// (see [`Algorithm::properties`]).
    fn property(&self) -> &str;

    /// Produce a new, morphed dataset. The input is never modified.
    fn morph_data(&self, data: &Dataset, seed: u64) -> Result<Dataset>;
}

/// Relation to expect for `algorithm` under `test`: the algorithm's
/// override for the test's property if declared, otherwise the test's own
/// relation.
#[must_use]
pub fn effective_relation(test: &dyn MetamorphicTest, algorithm: &Algorithm) -> RelationType {
    algorithm
        .property_override(test.property())
        .unwrap_or_else(|| test.relation())
}

/// Relation name of a morphed dataset: the source name plus the test name.
#[must_use]
pub fn provenance(data: &Dataset, test: &dyn MetamorphicTest) -> String {
    format!("{}_{}", data.relation(), test.name())
}

/// All built-in metamorphic tests, in a fixed order.
#[must_use]
pub fn all() -> Vec<Box<dyn MetamorphicTest>> {
    vec![
        Box::new(ScrambleInstances),
        Box::new(ReorderAttributes),
        Box::new(ConstantShift),
        Box::new(ScaleFeatures),
        Box::new(InvertClass),
        Box::new(DuplicateInstances),
    ]
}

/// Look up a built-in metamorphic test by name (case-sensitive).
#[must_use]
pub fn by_name(name: &str) -> Option<Box<dyn MetamorphicTest>> {
    all().into_iter().find(|t| t.name() == name)
}

/// Select built-in metamorphic tests by name, keeping the requested order.
///
/// # Errors
///
/// Returns [`MorphError::UnknownToken`] for names that are not built in.
pub fn select<S: AsRef<str>>(names: &[S]) -> Result<Vec<Box<dyn MetamorphicTest>>> {
    names
        .iter()
        .map(|name| {
            by_name(name.as_ref()).ok_or_else(|| MorphError::UnknownToken {
                kind: "metamorphic test",
                token: name.as_ref().to_string(),
            })
        })
        .collect()
}
