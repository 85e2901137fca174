//! Parametric synthetic dataset generation.
//!
//! Feature values are drawn i.i.d. from a [`Distribution`]. The first
//! `informative` features are shifted by `label * spread` so that they
//! separate the classes; the remaining features are pure noise.
//!
//! # Example
//!
//! ```
//! use morphtest::data::{generate_data, SyntheticSpec};
//!
//! let spec = SyntheticSpec::new(10, 0, 100).with_balance(0.5).with_seed(42);
//! let a = generate_data(&spec).expect("valid spec");
//! let b = generate_data(&spec).expect("valid spec");
//! assert_eq!(a, b);
//! assert_eq!(a.num_instances(), 100);
//! ```

use super::{Dataset, Value};
use crate::error::{MorphError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Distribution family for feature values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Distribution {
    /// Uniform on `[low, high)`.
    Uniform {
        /// Inclusive lower bound
        low: f64,
        /// Exclusive upper bound
        high: f64,
    },
    /// Gaussian with the given mean and standard deviation.
    Normal {
        /// Mean
        mean: f64,
        /// Standard deviation
        std_dev: f64,
    },
}

impl Default for Distribution {
    fn default() -> Self {
        Self::Uniform { low: 0.0, high: 1.0 }
    }
}

impl Distribution {
    /// Distance by which informative features are shifted per class index.
    #[must_use]
    pub fn spread(&self) -> f64 {
        match self {
            Self::Uniform { low, high } => high - low,
            Self::Normal { std_dev, .. } => 3.0 * std_dev,
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Self::Uniform { low, high } => {
                if !low.is_finite() || !high.is_finite() || low >= high || !(high - low).is_finite()
                {
                    return Err(MorphError::invalid_parameter(
                        "distribution",
                        format!("uniform[{low}, {high})"),
                        "finite bounds with low < high and a finite width",
                    ));
                }
            }
            Self::Normal { mean, std_dev } => {
                if !mean.is_finite() || !self.spread().is_finite() || std_dev < 0.0 {
                    return Err(MorphError::invalid_parameter(
                        "distribution",
                        format!("normal({mean}, {std_dev})"),
                        "finite mean and 0 <= 3 * std_dev < f64::MAX",
                    ));
                }
            }
        }
        Ok(())
    }

    fn sample(&self, rng: &mut StdRng) -> f64 {
        match *self {
            Self::Uniform { low, high } => rng.gen_range(low..high),
            Self::Normal { mean, std_dev } => {
                // Box-Muller transform
                let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
                let u2: f64 = rng.gen_range(0.0..1.0);
                let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
                mean + std_dev * z
            }
        }
    }
}

/// Parameters of a synthetic dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSpec {
    /// Relation name of the produced dataset.
    #[serde(default = "default_relation")]
    pub relation: String,
    /// Number of feature columns.
    pub features: usize,
    /// Number of features correlated with the label.
    #[serde(default)]
    pub informative: usize,
    /// Number of rows.
    pub instances: usize,
    /// Number of classes.
    #[serde(default = "default_classes")]
    pub classes: usize,
    /// Feature value distribution.
    #[serde(default)]
    pub distribution: Distribution,
    /// Share of instances labeled with the first class.
    #[serde(default = "default_balance")]
    pub balance: f64,
    /// RNG seed.
    #[serde(default)]
    pub seed: u64,
}

fn default_relation() -> String {
    "synthetic".to_string()
}

fn default_classes() -> usize {
    2
}

fn default_balance() -> f64 {
    0.5
}

impl SyntheticSpec {
    /// Binary, balanced, uniform `[0, 1)` spec with seed 0.
    #[must_use]
    pub fn new(features: usize, informative: usize, instances: usize) -> Self {
        Self {
            relation: default_relation(),
            features,
            informative,
            instances,
            classes: default_classes(),
            distribution: Distribution::default(),
            balance: default_balance(),
            seed: 0,
        }
    }

    /// Set the relation name.
    #[must_use]
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = relation.into();
        self
    }

    /// Set the number of classes.
    #[must_use]
    pub fn with_classes(mut self, classes: usize) -> Self {
        self.classes = classes;
        self
    }

    /// Set the distribution family.
    #[must_use]
    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Set the share of the first class.
    #[must_use]
    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = balance;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the parameter domain.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidParameter`] for zero features,
    /// `informative > features`, fewer than two classes, a balance outside
    /// `[0, 1]` or an invalid distribution.
    pub fn validate(&self) -> Result<()> {
        if self.features == 0 {
            return Err(MorphError::invalid_parameter("features", 0, ">= 1"));
        }
        if self.informative > self.features {
            return Err(MorphError::invalid_parameter(
                "informative",
                self.informative,
                format!("<= features ({})", self.features),
            ));
        }
        if self.classes < 2 {
            return Err(MorphError::invalid_parameter("classes", self.classes, ">= 2"));
        }
        if !(0.0..=1.0).contains(&self.balance) {
            return Err(MorphError::invalid_parameter("balance", self.balance, "in [0, 1]"));
        }
        self.distribution.validate()
    }

    /// Number of instances per class.
    ///
    /// The first class gets `round(balance * instances)`; the remainder is
    /// spread as evenly as possible over the other classes, lower class
    /// indices first.
    #[must_use]
    pub fn class_counts(&self) -> Vec<usize> {
        let first = ((self.balance * self.instances as f64).round() as usize).min(self.instances);
        let rest = self.instances - first;
        let others = self.classes.saturating_sub(1).max(1);
        let mut counts = vec![first];
        for c in 0..self.classes.saturating_sub(1) {
            counts.push(rest / others + usize::from(c < rest % others));
        }
        counts
    }
}

/// Generate a dataset from a spec.
///
/// Identical specs, seed included, produce identical datasets.
///
/// # Errors
///
/// Returns [`MorphError::InvalidParameter`] if the spec is invalid.
pub fn generate_data(spec: &SyntheticSpec) -> Result<Dataset> {
    spec.validate()?;
    let mut rng = StdRng::seed_from_u64(spec.seed);

    let mut labels: Vec<usize> = spec
        .class_counts()
        .iter()
        .enumerate()
        .flat_map(|(class, &count)| std::iter::repeat(class).take(count))
        .collect();
    labels.shuffle(&mut rng);

    let spread = spec.distribution.spread();
    let mut data = Dataset::with_numeric_features(&spec.relation, spec.features, spec.classes)?;
    for label in labels {
        let mut row = Vec::with_capacity(spec.features + 1);
        for feature in 0..spec.features {
            let mut value = spec.distribution.sample(&mut rng);
            if feature < spec.informative {
                value += label as f64 * spread;
            }
            if !value.is_finite() {
                return Err(MorphError::invalid_parameter(
                    "distribution",
                    format!("{:?} with {} classes", spec.distribution, spec.classes),
                    "values within the finite f64 range",
                ));
            }
            row.push(Value::Numeric(value));
        }
        row.push(Value::Nominal(label));
        data.push_row(row)?;
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(data: &Dataset, row: usize, col: usize) -> f64 {
        match data.rows()[row][col] {
            Value::Numeric(v) => v,
            ref other => panic!("expected numeric, got {other:?}"),
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        let spec = SyntheticSpec::new(10, 0, 100).with_balance(0.5).with_seed(42);
        let a = generate_data(&spec).unwrap();
        let b = generate_data(&spec).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_different_seed_different_values() {
        let a = generate_data(&SyntheticSpec::new(10, 0, 100).with_seed(42)).unwrap();
        let b = generate_data(&SyntheticSpec::new(10, 0, 100).with_seed(43)).unwrap();
        let differs = (0..100).any(|r| (0..10).any(|c| numeric(&a, r, c) != numeric(&b, r, c)));
        assert!(differs);
    }

    #[test]
    fn test_balance_is_respected() {
        let spec = SyntheticSpec::new(10, 5, 100).with_balance(0.1).with_seed(1);
        let data = generate_data(&spec).unwrap();
        let zeros = data.labels().iter().filter(|&&l| l == 0).count();
        assert_eq!(zeros, 10);
        assert_eq!(data.num_instances(), 100);
    }

    #[test]
    fn test_class_counts_multiclass() {
        let spec = SyntheticSpec::new(2, 0, 10).with_classes(4).with_balance(0.3);
        assert_eq!(spec.class_counts(), vec![3, 3, 2, 2]);
        let counts = SyntheticSpec::new(2, 0, 7).with_balance(0.5).class_counts();
        assert_eq!(counts.iter().sum::<usize>(), 7);
    }

    #[test]
    fn test_informative_features_separate_classes() {
        let spec = SyntheticSpec::new(4, 2, 200).with_seed(7);
        let data = generate_data(&spec).unwrap();
        for (row, &label) in data.labels().iter().enumerate() {
            let informative = numeric(&data, row, 0);
            if label == 0 {
                assert!((0.0..1.0).contains(&informative));
            } else {
                assert!((1.0..2.0).contains(&informative));
            }
            let noise = numeric(&data, row, 3);
            assert!((0.0..1.0).contains(&noise));
        }
    }

    #[test]
    fn test_normal_distribution_is_deterministic() {
        let spec = SyntheticSpec::new(3, 1, 50)
            .with_distribution(Distribution::Normal {
                mean: 0.0,
                std_dev: 1.0,
            })
            .with_seed(9);
        assert_eq!(generate_data(&spec).unwrap(), generate_data(&spec).unwrap());
    }

    #[test]
    fn test_invalid_specs_fail() {
        assert!(generate_data(&SyntheticSpec::new(10, 11, 100)).is_err());
        assert!(generate_data(&SyntheticSpec::new(0, 0, 100)).is_err());
        assert!(generate_data(&SyntheticSpec::new(10, 0, 100).with_balance(1.5)).is_err());
        assert!(generate_data(&SyntheticSpec::new(10, 0, 100).with_classes(1)).is_err());
        let inverted = Distribution::Uniform { low: 1.0, high: 0.0 };
        assert!(generate_data(&SyntheticSpec::new(10, 0, 100).with_distribution(inverted)).is_err());
    }

    #[test]
    fn test_informative_over_features_is_not_clamped() {
        let err = generate_data(&SyntheticSpec::new(10, 12, 100)).unwrap_err();
        assert!(matches!(err, MorphError::InvalidParameter { ref param, .. } if param == "informative"));
    }

    #[test]
    fn test_unbounded_width_is_rejected() {
        let wide = Distribution::Uniform {
            low: -1e308,
            high: 1e308,
        };
        let spec = SyntheticSpec::new(2, 0, 4).with_distribution(wide);
        assert!(spec.validate().is_err());
        let err = generate_data(&spec).unwrap_err();
        assert!(matches!(err, MorphError::InvalidParameter { ref param, .. } if param == "distribution"));

        let huge = Distribution::Normal {
            mean: 0.0,
            std_dev: 1e308,
        };
        assert!(generate_data(&SyntheticSpec::new(2, 0, 4).with_distribution(huge)).is_err());
    }

    #[test]
    fn test_informative_shift_overflow_is_rejected() {
        let top = Distribution::Uniform {
            low: 0.0,
            high: 1e308,
        };
        let spec = SyntheticSpec::new(2, 2, 30)
            .with_classes(3)
            .with_balance(0.0)
            .with_distribution(top);
        assert!(spec.validate().is_ok());
        let err = generate_data(&spec).unwrap_err();
        assert!(err.to_string().contains("finite f64 range"));
    }

    #[test]
    fn test_zero_instances() {
        let data = generate_data(&SyntheticSpec::new(3, 0, 0)).unwrap();
        assert_eq!(data.num_instances(), 0);
        assert_eq!(data.num_features(), 3);
    }
}
