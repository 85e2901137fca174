//! Smoke tests: fixed edge-case datasets that catch gross classifier
//! failures (crashes, non-finite outputs, refusal to train).
//!
//! A smoke test is a named, stateless recipe. The test data pass calls
//! [`SmokeTest::create_data`] twice per iteration, once per [`DataSplit`],
//! and persists both results.
//!
//! # Example
//!
//! ```
//! use morphtest::smoke::{self, DataSplit, SmokeTest};
//!
//! let zeroes = smoke::by_name("AllZeroes").expect("built-in smoke test");
//! let data = zeroes.create_data(1, DataSplit::Training).expect("fixed recipe");
//! assert_eq!(data.num_instances(), 100);
//! ```

mod recipes;

pub use recipes::{
    AllZeroes, Bias, MaxDouble, MinDouble, MissingValues, OneClass, Outlier, Separable,
    SingleInstance, Starved, Uniform, VeryLarge, VerySmall,
};

use crate::data::Dataset;
use crate::error::{MorphError, Result};
use std::fmt;

/// Which artifact of a smoke test is being created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSplit {
    /// Data the classifier is trained on.
    Training,
    /// Held-out data the trained classifier predicts.
    Test,
}

impl DataSplit {
    /// File name suffix of the split.
    #[must_use]
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Training => "training",
            Self::Test => "test",
        }
    }

    /// Both splits, in the order they are written.
    #[must_use]
    pub fn both() -> [DataSplit; 2] {
        [Self::Training, Self::Test]
    }

    /// Seed for randomized recipes. Distinct per (iteration, split).
    #[must_use]
    pub fn seed(&self, iteration: usize) -> u64 {
        let base = (iteration as u64).wrapping_mul(2);
        match self {
            Self::Training => base,
            Self::Test => base + 1,
        }
    }
}

impl fmt::Display for DataSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// An edge-case data recipe.
pub trait SmokeTest: Send + Sync + fmt::Debug {
    /// Name used in file names and generated code.
    fn name(&self) -> &str;

    /// One-line description of the edge case.
    fn description(&self) -> &str;

    /// Create the dataset for an iteration and split.
    ///
    /// Fixed recipes ignore both arguments; randomized recipes seed from
    /// [`DataSplit::seed`].
    fn create_data(&self, iteration: usize, split: DataSplit) -> Result<Dataset>;
}

/// All built-in smoke tests, in a fixed order.
#[must_use]
pub fn all() -> Vec<Box<dyn SmokeTest>> {
    vec![
        Box::new(AllZeroes),
        Box::new(Uniform),
        Box::new(MinDouble),
        Box::new(MaxDouble),
        Box::new(VeryLarge),
        Box::new(VerySmall),
        Box::new(OneClass),
        Box::new(Bias),
        Box::new(Outlier),
        Box::new(MissingValues),
        Box::new(SingleInstance),
        Box::new(Starved),
        Box::new(Separable),
    ]
}

/// Look up a built-in smoke test by name (case-sensitive).
#[must_use]
pub fn by_name(name: &str) -> Option<Box<dyn SmokeTest>> {
    all().into_iter().find(|t| t.name() == name)
}

/// Select built-in smoke tests by name, keeping the requested order.
///
/// # Errors
///
/// Returns [`MorphError::UnknownToken`] for names that are not built in.
pub fn select<S: AsRef<str>>(names: &[S]) -> Result<Vec<Box<dyn SmokeTest>>> {
    names
        .iter()
        .map(|name| {
            by_name(name.as_ref()).ok_or_else(|| MorphError::UnknownToken {
                kind: "smoke test",
                token: name.as_ref().to_string(),
            })
        })
        .collect()
}
