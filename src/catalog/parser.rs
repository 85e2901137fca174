//! Validating parser for the algorithm catalog.

use super::{Algorithm, FeatureType, Parameter};
use crate::error::{MorphError, Result};
use crate::naming;
use crate::relation::RelationType;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAlgorithm {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    framework: Option<String>,
    package: Option<String>,
    class: Option<String>,
    parameters: Option<Mapping>,
    features: Option<String>,
    properties: Option<BTreeMap<String, String>>,
}

fn required(value: Option<String>, field: &str, record: usize) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(MorphError::catalog(record, format!("missing field `{field}`"))),
    }
}

/// Packages become directory paths, so every dot-separated segment must be
/// a plain name component.
fn validate_package(package: String, record: usize) -> Result<String> {
    match package.split('.').find(|segment| !naming::is_valid_component(segment)) {
        None => Ok(package),
        Some(segment) => Err(MorphError::catalog(
            record,
            format!("package `{package}` has invalid segment `{segment}`"),
        )),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_parameters(raw: Mapping, record: usize) -> Result<Vec<Parameter>> {
    let mut parameters = Vec::with_capacity(raw.len());
    for (key, entries) in raw {
        let name = scalar_to_string(&key)
            .ok_or_else(|| MorphError::catalog(record, "parameter names must be scalars"))?;
        let Value::Mapping(entries) = entries else {
            return Err(MorphError::catalog(
                record,
                format!("parameter `{name}` must map keys to values"),
            ));
        };
        let mut values = BTreeMap::new();
        for (sub_key, sub_value) in &entries {
            let (Some(k), Some(v)) = (scalar_to_string(sub_key), scalar_to_string(sub_value))
            else {
                return Err(MorphError::catalog(
                    record,
                    format!("parameter `{name}` entries must be scalar key/value pairs"),
                ));
            };
            values.insert(k, v);
        }
        parameters.push(Parameter::new(name, values));
    }
    Ok(parameters)
}

fn parse_properties(
    raw: BTreeMap<String, String>,
    record: usize,
) -> Result<BTreeMap<String, RelationType>> {
    let mut properties = BTreeMap::new();
    for (property, relation) in raw {
        let key = property.to_uppercase();
        let relation: RelationType = relation.parse()?;
        if properties.insert(key.clone(), relation).is_some() {
            return Err(MorphError::catalog(
                record,
                format!("property `{key}` declared more than once"),
            ));
        }
    }
    Ok(properties)
}

impl RawAlgorithm {
    fn into_algorithm(self, record: usize) -> Result<Algorithm> {
        let features = required(self.features, "features", record)?;
        Ok(Algorithm {
            name: required(self.name, "name", record)?,
            kind: required(self.kind, "type", record)?,
            framework: required(self.framework, "framework", record)?,
            package: validate_package(required(self.package, "package", record)?, record)?,
            class: required(self.class, "class", record)?,
            parameters: match self.parameters {
                Some(raw) => parse_parameters(raw, record)?,
                None => Vec::new(),
            },
            features: features.parse::<FeatureType>()?,
            properties: match self.properties {
                Some(raw) => parse_properties(raw, record)?,
                None => BTreeMap::new(),
            },
        })
    }
}

/// Parse a catalog from YAML text.
///
/// # Errors
///
/// Returns an error for malformed YAML, unknown or missing fields, unknown
/// feature/relation tokens, or duplicate property keys.
///
/// # Example
///
/// ```
/// use morphtest::catalog::{parse_str, FeatureType};
///
/// let catalog = parse_str(
///     "name: NaiveBayes\ntype: classification\nframework: X\npackage: p\n\
///      class: p.NaiveBayes\nfeatures: NUMERIC\n",
/// ).expect("valid catalog");
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog[0].features(), FeatureType::Numeric);
/// ```
pub fn parse_str(text: &str) -> Result<Vec<Algorithm>> {
    let mut algorithms = Vec::new();
    if text.trim().is_empty() {
        return Ok(algorithms);
    }
    for (idx, document) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let record = idx + 1;
        let raw = Option::<RawAlgorithm>::deserialize(document)
            .map_err(|e| MorphError::catalog(record, e.to_string()))?;
        let Some(raw) = raw else {
            break;
        };
        algorithms.push(raw.into_algorithm(record)?);
    }
    Ok(algorithms)
}

/// Read and parse a catalog file.
///
/// # Errors
///
/// Returns [`MorphError::Io`] if the file cannot be read, otherwise the
/// errors of [`parse_str`].
pub fn load(path: &Path) -> Result<Vec<Algorithm>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| MorphError::io("reading algorithm catalog", path, e))?;
    parse_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RECORDS: &str = "\
name: NaiveBayes
type: classification
framework: weka
package: weka.classifiers.bayes
class: weka.classifiers.bayes.NaiveBayes
features: numeric
parameters:
  K:
    type: flag
    default: false
  D:
    type: flag
    default: 'false'
properties:
  Scale: equal
  shift: Skip
---
name: LogisticRegression
type: classification
framework: sklearn
package: sklearn.linear_model
class: sklearn.linear_model.LogisticRegression
features: mixed
parameters:
  C:
    type: double
    min: 0.1
    max: 10
";

    #[test]
    fn test_parse_two_records() {
        let catalog = parse_str(TWO_RECORDS).unwrap();
        assert_eq!(catalog.len(), 2);

        let nb = &catalog[0];
        assert_eq!(nb.name(), "NaiveBayes");
        assert_eq!(nb.kind(), "classification");
        assert_eq!(nb.framework(), "weka");
        assert_eq!(nb.features(), FeatureType::Numeric);
        assert_eq!(nb.parameters().len(), 2);
        assert_eq!(nb.parameters()[0].name(), "K");
        assert_eq!(nb.parameters()[0].get("default"), Some("false"));
        assert_eq!(nb.parameters()[1].name(), "D");
        assert_eq!(nb.property_override("SCALE"), Some(RelationType::Equal));
        assert_eq!(nb.property_override("shift"), Some(RelationType::Skip));
        assert_eq!(nb.property_override("ORDER"), None);

        let lr = &catalog[1];
        assert_eq!(lr.features(), FeatureType::Mixed);
        assert_eq!(lr.parameters()[0].get("min"), Some("0.1"));
        assert_eq!(lr.parameters()[0].get("max"), Some("10"));
        assert!(lr.properties().is_empty());
    }

    #[test]
    fn test_property_keys_normalized_regardless_of_order() {
        let a = parse_str(
            "name: A\ntype: c\nframework: x\npackage: p\nclass: p.A\nfeatures: numeric\n\
             properties:\n  scale: equal\n  order: skip\n",
        )
        .unwrap();
        let b = parse_str(
            "name: A\ntype: c\nframework: x\npackage: p\nclass: p.A\nfeatures: numeric\n\
             properties:\n  ORDER: SKIP\n  Scale: Equal\n",
        )
        .unwrap();
        assert_eq!(a[0].properties(), b[0].properties());
        assert_eq!(a[0].properties().keys().collect::<Vec<_>>(), vec!["ORDER", "SCALE"]);
    }

    #[test]
    fn test_null_document_ends_stream() {
        let text = "name: A\ntype: c\nframework: x\npackage: p\nclass: p.A\nfeatures: unit\n\
                    --- ~\n---\nname: B\n";
        let catalog = parse_str(text).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(parse_str("").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_field_fails_closed() {
        let err = parse_str(
            "name: A\ntype: c\nframework: x\npackage: p\nclass: p.A\nfeatures: numeric\ncolour: red\n",
        )
        .unwrap_err();
        assert!(matches!(err, MorphError::Catalog { record: 1, .. }));
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_missing_field_reports_record() {
        let text = "name: A\ntype: c\nframework: x\npackage: p\nclass: p.A\nfeatures: numeric\n\
                    ---\nname: B\ntype: c\nframework: x\npackage: p\nfeatures: numeric\n";
        let err = parse_str(text).unwrap_err();
        assert_eq!(err.to_string(), "Catalog error in record 2: missing field `class`");
    }

    #[test]
    fn test_unknown_tokens() {
        let bad_feature =
            parse_str("name: A\ntype: c\nframework: x\npackage: p\nclass: p.A\nfeatures: text\n");
        assert!(matches!(
            bad_feature,
            Err(MorphError::UnknownToken {
                kind: "feature type",
                ..
            })
        ));
        let bad_relation = parse_str(
            "name: A\ntype: c\nframework: x\npackage: p\nclass: p.A\nfeatures: numeric\n\
             properties:\n  scale: bigger\n",
        );
        assert!(matches!(
            bad_relation,
            Err(MorphError::UnknownToken {
                kind: "relation type",
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_property_after_normalization() {
        let err = parse_str(
            "name: A\ntype: c\nframework: x\npackage: p\nclass: p.A\nfeatures: numeric\n\
             properties:\n  scale: equal\n  SCALE: skip\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_parameter_must_be_mapping() {
        let err = parse_str(
            "name: A\ntype: c\nframework: x\npackage: p\nclass: p.A\nfeatures: numeric\n\
             parameters:\n  K: 3\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("parameter `K`"));
    }

    #[test]
    fn test_package_segments_must_be_plain_names() {
        for package in ["a./tmp/escaped", "a..b", "weka.classifiers..", "..", "a.b-c"] {
            let text = format!(
                "name: A\ntype: c\nframework: weka\npackage: '{package}'\nclass: p.A\n\
                 features: numeric\n"
            );
            let err = parse_str(&text).unwrap_err();
            assert!(
                matches!(err, MorphError::Catalog { record: 1, .. }),
                "{package} accepted: {err}"
            );
        }
        assert!(parse_str(
            "name: A\ntype: c\nframework: weka\npackage: org.apache_x.ml2\nclass: p.A\n\
             features: numeric\n"
        )
        .is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/definitely/not/here.yml")).unwrap_err();
        assert!(matches!(err, MorphError::Io { .. }));
    }
}
