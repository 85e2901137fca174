//! ARFF rendering for datasets.
//!
//! Output layout:
//!
//! ```text
//! @relation UniformRandom
//!
//! @attribute X0 numeric
//! @attribute classAtt {0,1}
//!
//! @data
//! 0.5488135039273248,1
//! ```
//!
//! Numbers use Rust's shortest round-trip formatting; magnitudes outside
//! `[1e-4, 1e16)` switch to scientific notation so extreme smoke test values
//! stay readable by Java and Python parsers alike.

use super::{AttributeKind, Dataset, Value};
use crate::error::{MorphError, Result};
use std::fmt::{self, Write as _};
use std::path::Path;

/// File extension of persisted datasets.
pub const EXTENSION: &str = "arff";

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@relation {}", quote(self.relation()))?;
        writeln!(f)?;
        for attribute in self.attributes() {
            match attribute.kind() {
                AttributeKind::Numeric => {
                    writeln!(f, "@attribute {} numeric", quote(attribute.name()))?;
                }
                AttributeKind::Nominal(labels) => {
                    let labels: Vec<String> = labels.iter().map(|l| quote(l)).collect();
                    writeln!(
                        f,
                        "@attribute {} {{{}}}",
                        quote(attribute.name()),
                        labels.join(",")
                    )?;
                }
            }
        }
        writeln!(f)?;
        writeln!(f, "@data")?;
        let mut line = String::new();
        for row in self.rows() {
            line.clear();
            for (i, (value, attribute)) in row.iter().zip(self.attributes()).enumerate() {
                if i > 0 {
                    line.push(',');
                }
                match (value, attribute.kind()) {
                    (Value::Missing, _) => line.push('?'),
                    (Value::Numeric(v), _) => line.push_str(&format_number(*v)),
                    (Value::Nominal(idx), AttributeKind::Nominal(labels)) => {
                        line.push_str(&quote(&labels[*idx]));
                    }
                    (Value::Nominal(idx), AttributeKind::Numeric) => {
                        let _ = write!(line, "{idx}");
                    }
                }
            }
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Format a numeric value for ARFF output.
///
/// NaN is written as missing. Infinities are spelled `Infinity` and
/// `-Infinity`, which both `Double.parseDouble` and Python's `float` accept.
///
/// ```
/// use morphtest::data::arff::format_number;
///
/// assert_eq!(format_number(0.25), "0.25");
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(f64::MAX), "1.7976931348623157e308");
/// assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "?".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if value != 0.0 && (magnitude >= 1e16 || magnitude < 1e-4) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

/// Quote a name or label when it contains characters ARFF treats as
/// delimiters.
#[must_use]
pub fn quote(name: &str) -> String {
    let needs_quotes = name.is_empty()
        || name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ',' | '{' | '}' | '\'' | '"' | '%' | '?'));
    if needs_quotes {
        format!("'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
    } else {
        name.to_string()
    }
}

/// Write a dataset to `path` as ARFF.
///
/// # Errors
///
/// Returns [`MorphError::Io`] with `context` if the file cannot be written.
pub fn write(dataset: &Dataset, path: &Path, context: &str) -> Result<()> {
    std::fs::write(path, dataset.to_string()).map_err(|e| MorphError::io(context, path, e))
}
