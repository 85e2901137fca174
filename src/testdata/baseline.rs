//! Baseline datasets shared by every metamorphic test of an iteration.

use crate::data::{generate_data, Dataset, Distribution, SyntheticSpec};
use crate::error::{MorphError, Result};
use crate::naming;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named baseline and the synthetic parameters that produce it.
///
/// The spec's `seed` and `relation` are ignored: both are derived from the
/// iteration when the baseline is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataDescription {
    /// Logical baseline name, used in file names and generated code.
    pub name: String,
    /// Synthetic data parameters.
    pub spec: SyntheticSpec,
}

impl DataDescription {
    /// Create a description.
    #[must_use]
    pub fn new(name: impl Into<String>, spec: SyntheticSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }

    /// Build the baseline for an iteration (seed = iteration).
    pub fn build(&self, iteration: usize) -> Result<Dataset> {
        let spec = self
            .spec
            .clone()
            .with_relation(naming::baseline_relation(&self.name, iteration))
            .with_seed(iteration as u64);
        generate_data(&spec)
    }
}

/// Ordered table of baselines.
///
/// The data pass builds baselines in table order and the code pass
/// references them by name from the same table.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineTable {
    entries: Vec<DataDescription>,
}

impl Default for BaselineTable {
    /// `UniformRandom` (10 features, none informative, 100 instances,
    /// balanced) and `UniformInformative` (10 features, 5 informative,
    /// 100 instances, 10% first class), both uniform on `[0, 1)`.
    fn default() -> Self {
        let uniform = Distribution::Uniform { low: 0.0, high: 1.0 };
        Self {
            entries: vec![
                DataDescription::new(
                    "UniformRandom",
                    SyntheticSpec::new(10, 0, 100)
                        .with_distribution(uniform)
                        .with_balance(0.5),
                ),
                DataDescription::new(
                    "UniformInformative",
                    SyntheticSpec::new(10, 5, 100)
                        .with_distribution(uniform)
                        .with_balance(0.1),
                ),
            ],
        }
    }
}

impl BaselineTable {
    /// Create a table from custom entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty, a name is not a valid file
    /// name component, names repeat, or a spec is invalid.
    pub fn new(entries: Vec<DataDescription>) -> Result<Self> {
        if entries.is_empty() {
            return Err(MorphError::invalid_parameter(
                "baselines",
                "[]",
                "at least one baseline",
            ));
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if !naming::is_valid_component(&entry.name) {
                return Err(MorphError::invalid_parameter(
                    "baselines.name",
                    &entry.name,
                    "ASCII letters, digits and '_'",
                ));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(MorphError::invalid_parameter(
                    "baselines.name",
                    &entry.name,
                    "unique names",
                ));
            }
            entry.spec.validate()?;
        }
        Ok(Self { entries })
    }

    /// Entries in generation order.
    #[must_use]
    pub fn entries(&self) -> &[DataDescription] {
        &self.entries
    }

    /// Baseline names in generation order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Number of baselines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty (never true for a constructed table).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_order() {
        let table = BaselineTable::default();
        assert_eq!(table.names(), vec!["UniformRandom", "UniformInformative"]);
        assert_eq!(table.entries()[1].spec.informative, 5);
        assert!((table.entries()[1].spec.balance - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_build_seeds_from_iteration() {
        let table = BaselineTable::default();
        let first = &table.entries()[0];
        let a = first.build(1).unwrap();
        assert_eq!(a.relation(), "UniformRandom_1");
        assert_eq!(a, first.build(1).unwrap());
        assert_ne!(a.rows(), first.build(2).unwrap().rows());
    }

    #[test]
    fn test_custom_table_validation() {
        let spec = SyntheticSpec::new(3, 1, 10);
        assert!(BaselineTable::new(vec![]).is_err());
        assert!(BaselineTable::new(vec![DataDescription::new("bad name", spec.clone())]).is_err());
        assert!(BaselineTable::new(vec![
            DataDescription::new("A", spec.clone()),
            DataDescription::new("A", spec.clone()),
        ])
        .is_err());
        assert!(
            BaselineTable::new(vec![DataDescription::new("A", SyntheticSpec::new(3, 4, 10))])
                .is_err()
        );
        let table = BaselineTable::new(vec![DataDescription::new("Small", spec)]).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_description_deserializes_with_defaults() {
        let desc: DataDescription = serde_yaml::from_str(
            "name: Gaussian\nspec:\n  features: 4\n  informative: 2\n  instances: 50\n  \
             distribution:\n    family: normal\n    mean: 0.0\n    std_dev: 1.0\n",
        )
        .unwrap();
        assert_eq!(desc.spec.classes, 2);
        assert!((desc.spec.balance - 0.5).abs() < f64::EPSILON);
        assert_eq!(
            desc.spec.distribution,
            Distribution::Normal {
                mean: 0.0,
                std_dev: 1.0
            }
        );
    }
}
