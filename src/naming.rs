//! Persisted file names.
//!
//! The data pass writes files under these names and the code pass emits
//! references to the same names; neither pass reads the other's output, so
//! this module is the only contract between them.

use crate::data::arff::EXTENSION;
use crate::smoke::DataSplit;

/// `smoketest_<name>_<iteration>_<training|test>.arff`
#[must_use]
pub fn smoke_file(test: &str, iteration: usize, split: DataSplit) -> String {
    format!("smoketest_{test}_{iteration}_{}.{EXTENSION}", split.suffix())
}

/// `<baseline>_<iteration>.arff`
#[must_use]
pub fn baseline_file(baseline: &str, iteration: usize) -> String {
    format!("{baseline}_{iteration}.{EXTENSION}")
}

/// `<baseline>_<iteration>_<test>.arff`
#[must_use]
pub fn morph_file(baseline: &str, iteration: usize, test: &str) -> String {
    format!("{baseline}_{iteration}_{test}.{EXTENSION}")
}

/// Relation name of a baseline dataset for an iteration.
#[must_use]
pub fn baseline_relation(baseline: &str, iteration: usize) -> String {
    format!("{baseline}_{iteration}")
}

/// Whether `name` may be used as a file name component and a code
/// identifier fragment.
#[must_use]
pub fn is_valid_component(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
