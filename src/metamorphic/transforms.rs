//! Built-in metamorphic transformations.

use super::{provenance, MetamorphicTest};
use crate::data::{Dataset, Value};
use crate::error::{MorphError, Result};
use crate::relation::{PredictionType, RelationType, TransformKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Permutes the instances. Predictions per instance must not change, so
/// generated code re-associates rows by identity before comparing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrambleInstances;

impl MetamorphicTest for ScrambleInstances {
    fn name(&self) -> &str {
        "ScrambleInstances"
    }

    fn prediction_type(&self) -> PredictionType {
        PredictionType::OrderedData
    }

    fn relation(&self) -> RelationType {
        RelationType::Equal
    }

    fn kind(&self) -> TransformKind {
        TransformKind::InstanceOrder
    }

    fn property(&self) -> &str {
        "ORDER"
    }

    fn morph_data(&self, data: &Dataset, seed: u64) -> Result<Dataset> {
        let mut morphed = data.clone();
        morphed.set_relation(provenance(data, self));
        let mut rng = StdRng::seed_from_u64(seed);
        // Fisher-Yates
        for i in (1..morphed.num_instances()).rev() {
            let j = rng.gen_range(0..=i);
            morphed.swap_rows(i, j);
        }
        Ok(morphed)
    }
}

/// Permutes the feature columns; the class stays last.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReorderAttributes;

impl MetamorphicTest for ReorderAttributes {
    fn name(&self) -> &str {
        "ReorderAttributes"
    }

    fn prediction_type(&self) -> PredictionType {
        PredictionType::Class
    }

    fn relation(&self) -> RelationType {
        RelationType::Equal
    }

    fn kind(&self) -> TransformKind {
        TransformKind::AttributeOrder
    }

    fn property(&self) -> &str {
        "ATTRIBUTE_ORDER"
    }

    fn morph_data(&self, data: &Dataset, seed: u64) -> Result<Dataset> {
        let mut order: Vec<usize> = (0..data.num_features()).collect();
        order.shuffle(&mut StdRng::seed_from_u64(seed));
        order.push(data.class_index());

        let attributes = order.iter().map(|&i| data.attributes()[i].clone()).collect();
        let rows = data
            .rows()
            .iter()
            .map(|row| order.iter().map(|&i| row[i]).collect())
            .collect();
        Ok(Dataset::from_parts(provenance(data, self), attributes, rows))
    }
}

/// Adds a seed-derived constant in `[1, 100)` to every numeric feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantShift;

impl MetamorphicTest for ConstantShift {
    fn name(&self) -> &str {
        "ConstantShift"
    }

    fn prediction_type(&self) -> PredictionType {
        PredictionType::Class
    }

    fn relation(&self) -> RelationType {
        RelationType::Equal
    }

    fn kind(&self) -> TransformKind {
        TransformKind::ValueShift
    }

    fn property(&self) -> &str {
        "SHIFT"
    }

    fn morph_data(&self, data: &Dataset, seed: u64) -> Result<Dataset> {
        let shift: f64 = StdRng::seed_from_u64(seed).gen_range(1.0..100.0);
        Ok(data.map_numeric(provenance(data, self), |v| v + shift))
    }
}

/// Multiplies every numeric feature by a seed-derived factor in `[2, 10)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleFeatures;

impl MetamorphicTest for ScaleFeatures {
    fn name(&self) -> &str {
        "ScaleFeatures"
    }

    fn prediction_type(&self) -> PredictionType {
        PredictionType::Class
    }

    fn relation(&self) -> RelationType {
        RelationType::Equal
    }

    fn kind(&self) -> TransformKind {
        TransformKind::ValueScale
    }

    fn property(&self) -> &str {
        "SCALE"
    }

    fn morph_data(&self, data: &Dataset, seed: u64) -> Result<Dataset> {
        let factor: f64 = StdRng::seed_from_u64(seed).gen_range(2.0..10.0);
        Ok(data.map_numeric(provenance(data, self), |v| v * factor))
    }
}

/// Swaps the two labels of a binary class. Predictions must flip.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvertClass;

impl MetamorphicTest for InvertClass {
    fn name(&self) -> &str {
        "InvertClass"
    }

    fn prediction_type(&self) -> PredictionType {
        PredictionType::Class
    }

    fn relation(&self) -> RelationType {
        RelationType::Inverted
    }

    fn kind(&self) -> TransformKind {
        TransformKind::LabelChange
    }

    fn property(&self) -> &str {
        "CLASS_INVERSION"
    }

    fn morph_data(&self, data: &Dataset, _seed: u64) -> Result<Dataset> {
        let labels = data.class_attribute().num_labels().unwrap_or(0);
        if labels != 2 {
            return Err(MorphError::Dataset(format!(
                "{} needs a binary class, '{}' has {labels} labels",
                self.name(),
                data.relation()
            )));
        }
        let class = data.class_index();
        let rows = data
            .rows()
            .iter()
            .map(|row| {
                let mut row = row.clone();
                if let Value::Nominal(label) = row[class] {
                    row[class] = Value::Nominal(1 - label);
                }
                row
            })
            .collect();
        Ok(Dataset::from_parts(
            provenance(data, self),
            data.attributes().to_vec(),
            rows,
        ))
    }
}

/// Repeats every instance once, keeping the original order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateInstances;

impl MetamorphicTest for DuplicateInstances {
    fn name(&self) -> &str {
        "DuplicateInstances"
    }

    fn prediction_type(&self) -> PredictionType {
        PredictionType::Class
    }

    fn relation(&self) -> RelationType {
        RelationType::Equal
    }

    fn kind(&self) -> TransformKind {
        TransformKind::Duplication
    }

    fn property(&self) -> &str {
        "DUPLICATION"
    }

    fn morph_data(&self, data: &Dataset, _seed: u64) -> Result<Dataset> {
        let rows = data
            .rows()
            .iter()
            .flat_map(|row| [row.clone(), row.clone()])
            .collect();
        Ok(Dataset::from_parts(
            provenance(data, self),
            data.attributes().to_vec(),
            rows,
        ))
    }
}
