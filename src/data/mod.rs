//! Tabular datasets for classifier test data.
//!
//! A [`Dataset`] is a relation name, an attribute schema and an ordered list
//! of rows. The last attribute is the class and is always nominal. Datasets
//! are rendered to ARFF text through their `Display` implementation (see
//! [`arff`]).

pub mod arff;
pub mod generator;

pub use generator::{generate_data, Distribution, SyntheticSpec};

use crate::error::{MorphError, Result};

/// Column type of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
    /// Real-valued column.
    Numeric,
    /// Categorical column with its ordered value labels.
    Nominal(Vec<String>),
}

/// A named column of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}

impl Attribute {
    /// Create a numeric attribute.
    #[must_use]
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Numeric,
        }
    }

    /// Create a nominal attribute with the given labels.
    #[must_use]
    pub fn nominal<S: AsRef<str>>(name: impl Into<String>, labels: &[S]) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Nominal(labels.iter().map(|l| l.as_ref().to_string()).collect()),
        }
    }

    /// Attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute kind.
    #[must_use]
    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    /// Whether the attribute is numeric.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, AttributeKind::Numeric)
    }

    /// Number of labels for nominal attributes, `None` for numeric ones.
    #[must_use]
    pub fn num_labels(&self) -> Option<usize> {
        match &self.kind {
            AttributeKind::Numeric => None,
            AttributeKind::Nominal(labels) => Some(labels.len()),
        }
    }
}

/// A single cell value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Numeric value.
    Numeric(f64),
    /// Index into the attribute's nominal labels.
    Nominal(usize),
    /// Missing value (`?` in ARFF).
    Missing,
}

/// A labeled dataset.
///
/// # Example
///
/// ```
/// use morphtest::data::{Attribute, Dataset, Value};
///
/// let mut data = Dataset::new(
///     "toy",
///     vec![Attribute::numeric("X0"), Attribute::nominal("class", &["0", "1"])],
/// ).expect("class attribute is nominal");
/// data.push_row(vec![Value::Numeric(0.5), Value::Nominal(1)]).expect("row fits schema");
/// assert_eq!(data.num_instances(), 1);
/// assert_eq!(data.num_features(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    relation: String,
    attributes: Vec<Attribute>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create an empty dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no attributes or the last attribute
    /// (the class) is not nominal.
    pub fn new(relation: impl Into<String>, attributes: Vec<Attribute>) -> Result<Self> {
        match attributes.last() {
            None => {
                return Err(MorphError::Dataset(
                    "dataset needs at least a class attribute".to_string(),
                ))
            }
            Some(class) if class.is_numeric() => {
                return Err(MorphError::Dataset(format!(
                    "class attribute '{}' must be nominal",
                    class.name()
                )))
            }
            Some(_) => {}
        }
        Ok(Self {
            relation: relation.into(),
            attributes,
            rows: Vec::new(),
        })
    }

    /// Create a dataset with `features` numeric attributes named `X0..` and
    /// a nominal class attribute with labels `0..classes`.
    pub fn with_numeric_features(
        relation: impl Into<String>,
        features: usize,
        classes: usize,
    ) -> Result<Self> {
        let mut attributes: Vec<Attribute> =
            (0..features).map(|i| Attribute::numeric(format!("X{i}"))).collect();
        let labels: Vec<String> = (0..classes).map(|c| c.to_string()).collect();
        attributes.push(Attribute::nominal("classAtt", &labels));
        Self::new(relation, attributes)
    }

    /// Append a row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row width or a value type does not match the
    /// schema. The class value may not be missing.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.attributes.len() {
            return Err(MorphError::Dataset(format!(
                "row has {} values, schema has {} attributes",
                row.len(),
                self.attributes.len()
            )));
        }
        for (attribute, value) in self.attributes.iter().zip(&row) {
            let fits = match (attribute.kind(), value) {
                (_, Value::Missing) => true,
                (AttributeKind::Numeric, Value::Numeric(_)) => true,
                (AttributeKind::Nominal(labels), Value::Nominal(idx)) => *idx < labels.len(),
                _ => false,
            };
            if !fits {
                return Err(MorphError::Dataset(format!(
                    "value {value:?} does not fit attribute '{}'",
                    attribute.name()
                )));
            }
        }
        if matches!(row.last(), Some(Value::Missing)) {
            return Err(MorphError::Dataset("class value may not be missing".to_string()));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Relation name.
    #[must_use]
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// Replace the relation name.
    pub fn set_relation(&mut self, relation: impl Into<String>) {
        self.relation = relation.into();
    }

    /// Attribute schema, class last.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// The class attribute.
    #[must_use]
    pub fn class_attribute(&self) -> &Attribute {
        &self.attributes[self.class_index()]
    }

    /// Index of the class attribute.
    #[must_use]
    pub fn class_index(&self) -> usize {
        self.attributes.len() - 1
    }

    /// Rows in order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn num_instances(&self) -> usize {
        self.rows.len()
    }

    /// Number of attributes excluding the class.
    #[must_use]
    pub fn num_features(&self) -> usize {
        self.attributes.len() - 1
    }

    /// Swap two rows.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }

    /// Class label index of every row.
    #[must_use]
    pub fn labels(&self) -> Vec<usize> {
        let class = self.class_index();
        self.rows
            .iter()
            .map(|row| match row[class] {
                Value::Nominal(idx) => idx,
                _ => unreachable!("push_row only accepts nominal class values"),
            })
            .collect()
    }

    /// Apply `f` to every non-missing numeric feature value, producing a new
    /// dataset with the given relation name.
    #[must_use]
    pub fn map_numeric(&self, relation: impl Into<String>, f: impl Fn(f64) -> f64) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|value| match value {
                        Value::Numeric(v) => Value::Numeric(f(*v)),
                        other => *other,
                    })
                    .collect()
            })
            .collect();
        Self {
            relation: relation.into(),
            attributes: self.attributes.clone(),
            rows,
        }
    }

    /// Build a dataset from parts that are already known to be consistent.
    pub(crate) fn from_parts(
        relation: String,
        attributes: Vec<Attribute>,
        rows: Vec<Vec<Value>>,
    ) -> Self {
        Self {
            relation,
            attributes,
            rows,
        }
    }
}
