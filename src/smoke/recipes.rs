//! Built-in smoke test recipes.

use super::{DataSplit, SmokeTest};
use crate::data::{generate_data, Dataset, SyntheticSpec, Value};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FEATURES: usize = 10;
const INSTANCES: usize = 100;

/// Build a binary dataset cell by cell.
fn build(
    relation: String,
    instances: usize,
    mut cell: impl FnMut(usize, usize) -> Value,
    label: impl Fn(usize) -> usize,
) -> Result<Dataset> {
    let mut data = Dataset::with_numeric_features(relation, FEATURES, 2)?;
    for row in 0..instances {
        let mut values: Vec<Value> = (0..FEATURES).map(|col| cell(row, col)).collect();
        values.push(Value::Nominal(label(row)));
        data.push_row(values)?;
    }
    Ok(data)
}

fn alternating(row: usize) -> usize {
    row % 2
}

fn relation(name: &str, iteration: usize, split: DataSplit) -> String {
    format!("{name}_{iteration}_{split}")
}

/// Uniform `[0, 1)` values scaled by `factor`.
fn scaled_uniform(
    name: &str,
    factor: f64,
    iteration: usize,
    split: DataSplit,
) -> Result<Dataset> {
    let mut rng = StdRng::seed_from_u64(split.seed(iteration));
    build(
        relation(name, iteration, split),
        INSTANCES,
        |_, _| Value::Numeric(rng.gen_range(0.0..1.0) * factor),
        alternating,
    )
}

/// Constant value in every feature.
fn constant(name: &str, value: f64, iteration: usize, split: DataSplit) -> Result<Dataset> {
    build(
        relation(name, iteration, split),
        INSTANCES,
        |_, _| Value::Numeric(value),
        alternating,
    )
}

/// Every feature is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllZeroes;

impl SmokeTest for AllZeroes {
    fn name(&self) -> &str {
        "AllZeroes"
    }

    fn description(&self) -> &str {
        "all features are 0"
    }

    fn create_data(&self, iteration: usize, split: DataSplit) -> Result<Dataset> {
        constant(self.name(), 0.0, iteration, split)
    }
}

/// Uniform noise without signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl SmokeTest for Uniform {
    fn name(&self) -> &str {
        "Uniform"
    }

    fn description(&self) -> &str {
        "features uniform in [0, 1), labels unrelated"
    }

    fn create_data(&self, iteration: usize, split: DataSplit) -> Result<Dataset> {
        scaled_uniform(self.name(), 1.0, iteration, split)
    }
}

/// Smallest positive normal double in every feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinDouble;

impl SmokeTest for MinDouble {
    fn name(&self) -> &str {
        "MinDouble"
    }

    fn description(&self) -> &str {
        "all features are the smallest positive double"
    }

    fn create_data(&self, iteration: usize, split: DataSplit) -> Result<Dataset> {
        constant(self.name(), f64::MIN_POSITIVE, iteration, split)
    }
}

/// Largest finite double in every feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxDouble;

impl SmokeTest for MaxDouble {
    fn name(&self) -> &str {
        "MaxDouble"
    }

    fn description(&self) -> &str {
        "all features are the largest finite double"
    }

    fn create_data(&self, iteration: usize, split: DataSplit) -> Result<Dataset> {
        constant(self.name(), f64::MAX, iteration, split)
    }
}

/// Uniform values scaled to around 1e100.
#[derive(Debug, Clone, Copy, Default)]
pub struct VeryLarge;

impl SmokeTest for VeryLarge {
    fn name(&self) -> &str {
        "VeryLarge"
    }

    fn description(&self) -> &str {
        "uniform features scaled by 1e100"
    }

    fn create_data(&self, iteration: usize, split: DataSplit) -> Result<Dataset> {
        scaled_uniform(self.name(), 1e100, iteration, split)
    }
}

/// Uniform values scaled to around 1e-100.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerySmall;

impl SmokeTest for VerySmall {
    fn name(&self) -> &str {
        "VerySmall"
    }

    fn description(&self) -> &str {
        "uniform features scaled by 1e-100"
    }

    fn create_data(&self, iteration: usize, split: DataSplit) -> Result<Dataset> {
        scaled_uniform(self.name(), 1e-100, iteration, split)
    }
}

/// Every instance has the same label.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneClass;

impl SmokeTest for OneClass {
    fn name(&self) -> &str {
        "OneClass"
    }

    fn description(&self) -> &str {
        "every instance belongs to class 0"
    }

    fn create_data(&self, iteration: usize, split: DataSplit) -> Result<Dataset> {
        let mut rng = StdRng::seed_from_u64(split.seed(iteration));
        build(
            relation(self.name(), iteration, split),
            INSTANCES,
            |_, _| Value::Numeric(rng.gen_range(0.0..1.0)),
            |_| 0,
        )
    }
}

/// Heavy class imbalance: 95% of instances in class 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bias;

impl SmokeTest for Bias {
    fn name(&self) -> &str {
        "Bias"
    }

    fn description(&self) -> &str {
        "95% of instances belong to class 0"
    }

    fn create_data(&self, iteration: usize, split: DataSplit) -> Result<Dataset> {
        let spec = SyntheticSpec::new(FEATURES, 0, INSTANCES)
            .with_relation(relation(self.name(), iteration, split))
            .with_balance(0.95)
            .with_seed(split.seed(iteration));
        generate_data(&spec)
    }
}

/// Uniform data with a single extreme row.
#[derive(Debug, Clone, Copy, Default)]
pub struct Outlier;

impl SmokeTest for Outlier {
    fn name(&self) -> &str {
        "Outlier"
    }

    fn description(&self) -> &str {
        "uniform features with one row scaled by 1e10"
    }

    fn create_data(&self, iteration: usize, split: DataSplit) -> Result<Dataset> {
        let mut rng = StdRng::seed_from_u64(split.seed(iteration));
        let outlier_row = rng.gen_range(0..INSTANCES);
        build(
            relation(self.name(), iteration, split),
            INSTANCES,
            |row, _| {
                let v = rng.gen_range(0.0..1.0);
                Value::Numeric(if row == outlier_row { v * 1e10 } else { v })
            },
            alternating,
        )
    }
}

/// Uniform data with a regular pattern of missing feature values.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingValues;

impl SmokeTest for MissingValues {
    fn name(&self) -> &str {
        "MissingValues"
    }

    fn description(&self) -> &str {
        "uniform features, every fifth value missing"
    }

    fn create_data(&self, iteration: usize, split: DataSplit) -> Result<Dataset> {
        let mut rng = StdRng::seed_from_u64(split.seed(iteration));
        build(
            relation(self.name(), iteration, split),
            INSTANCES,
            |row, col| {
                let v = rng.gen_range(0.0..1.0);
                if (row + col) % 5 == 0 {
                    Value::Missing
                } else {
                    Value::Numeric(v)
                }
            },
            alternating,
        )
    }
}

/// A dataset with exactly one instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleInstance;

impl SmokeTest for SingleInstance {
    fn name(&self) -> &str {
        "SingleInstance"
    }

    fn description(&self) -> &str {
        "one instance only"
    }

    fn create_data(&self, iteration: usize, split: DataSplit) -> Result<Dataset> {
        build(
            relation(self.name(), iteration, split),
            1,
            |_, col| Value::Numeric(col as f64 / FEATURES as f64),
            |_| 0,
        )
    }
}

/// Two instances per class.
#[derive(Debug, Clone, Copy, Default)]
pub struct Starved;

impl SmokeTest for Starved {
    fn name(&self) -> &str {
        "Starved"
    }

    fn description(&self) -> &str {
        "two instances per class"
    }

    fn create_data(&self, iteration: usize, split: DataSplit) -> Result<Dataset> {
        let mut rng = StdRng::seed_from_u64(split.seed(iteration));
        build(
            relation(self.name(), iteration, split),
            4,
            |_, _| Value::Numeric(rng.gen_range(0.0..1.0)),
            alternating,
        )
    }
}

/// Every feature separates the classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Separable;

impl SmokeTest for Separable {
    fn name(&self) -> &str {
        "Separable"
    }

    fn description(&self) -> &str {
        "all features informative, classes linearly separable"
    }

    fn create_data(&self, iteration: usize, split: DataSplit) -> Result<Dataset> {
        let spec = SyntheticSpec::new(FEATURES, FEATURES, INSTANCES)
            .with_relation(relation(self.name(), iteration, split))
            .with_seed(split.seed(iteration));
        generate_data(&spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_instance_has_one_row() {
        let data = SingleInstance.create_data(1, DataSplit::Training).unwrap();
        assert_eq!(data.num_instances(), 1);
    }

    #[test]
    fn test_one_class_labels() {
        let data = OneClass.create_data(2, DataSplit::Test).unwrap();
        assert!(data.labels().iter().all(|&l| l == 0));
    }

    #[test]
    fn test_bias_imbalance() {
        let data = Bias.create_data(1, DataSplit::Training).unwrap();
        let zeros = data.labels().iter().filter(|&&l| l == 0).count();
        assert_eq!(zeros, 95);
    }

    #[test]
    fn test_missing_values_pattern() {
        let data = MissingValues.create_data(1, DataSplit::Training).unwrap();
        assert_eq!(data.rows()[0][0], Value::Missing);
        assert_ne!(data.rows()[0][1], Value::Missing);
        assert!(data.to_string().contains('?'));
    }

    #[test]
    fn test_outlier_has_one_extreme_row() {
        for iteration in 1..=3 {
            for split in DataSplit::both() {
                let data = Outlier.create_data(iteration, split).unwrap();
                let extreme_rows = data
                    .rows()
                    .iter()
                    .filter(|row| row.iter().any(|v| matches!(v, Value::Numeric(x) if *x >= 1.0)))
                    .count();
                assert_eq!(extreme_rows, 1, "iteration {iteration}, {split}");
            }
        }
    }

    #[test]
    fn test_max_double_renders_scientific() {
        let data = MaxDouble.create_data(1, DataSplit::Training).unwrap();
        assert!(data.to_string().contains("1.7976931348623157e308"));
    }

    #[test]
    fn test_relation_records_split() {
        let data = Starved.create_data(4, DataSplit::Test).unwrap();
        assert_eq!(data.relation(), "Starved_4_test");
    }
}
