//! Built-in code generators, rendered from `minijinja` templates.

use super::{SuiteContext, TestcaseGenerator};
use crate::catalog::Algorithm;
use crate::error::Result;
use minijinja::{context, AutoEscape, Environment};
use std::fmt;
use std::path::PathBuf;

/// Frameworks with a built-in generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    /// Weka classifiers, JUnit 5 test classes.
    Weka,
    /// scikit-learn estimators, pytest modules.
    Sklearn,
    /// Spark MLlib classifiers, JUnit 5 test classes.
    Spark,
}

impl Framework {
    /// Lower-case framework identifier used in catalogs.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Weka => "weka",
            Self::Sklearn => "sklearn",
            Self::Spark => "spark",
        }
    }

    /// All built-in frameworks.
    #[must_use]
    pub fn all() -> &'static [Framework] {
        &[Self::Weka, Self::Sklearn, Self::Spark]
    }

    fn template(self) -> (&'static str, &'static str) {
        match self {
            Self::Weka => ("weka.java", include_str!("templates/weka.java")),
            Self::Sklearn => ("sklearn.py", include_str!("templates/sklearn.py")),
            Self::Spark => ("spark.java", include_str!("templates/spark.java")),
        }
    }

    fn class_suffix(self) -> &'static str {
        match self {
            Self::Weka | Self::Sklearn => "Test",
            Self::Spark => "SparkTest",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Generator of one built-in framework.
pub struct BuiltinGenerator {
    framework: Framework,
    env: Environment<'static>,
}

impl fmt::Debug for BuiltinGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinGenerator")
            .field("framework", &self.framework)
            .finish_non_exhaustive()
    }
}

impl BuiltinGenerator {
    /// Compile the framework's template.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MorphError::Template`] if the template does not
    /// compile.
    pub fn new(framework: Framework) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("quote", quote);
        env.add_filter("pyliteral", python_literal);
        env.add_filter("javaliteral", java_literal);
        let (name, source) = framework.template();
        env.add_template(name, source)?;
        Ok(Self { framework, env })
    }

    /// Test class name for `algorithm`, e.g. `NaiveBayesTest`.
    #[must_use]
    pub fn class_name(&self, algorithm: &Algorithm) -> String {
        format!("{}{}", identifier(algorithm.name()), self.framework.class_suffix())
    }
}

impl TestcaseGenerator for BuiltinGenerator {
    fn framework(&self) -> &str {
        self.framework.id()
    }

    fn file_path(&self, algorithm: &Algorithm) -> PathBuf {
        match self.framework {
            Framework::Sklearn => {
                PathBuf::from(format!("test_{}.py", identifier(algorithm.name()).to_lowercase()))
            }
            Framework::Weka | Framework::Spark => {
                let mut path: PathBuf = algorithm
                    .package()
                    .split('.')
                    .filter(|segment| !segment.is_empty())
                    .collect();
                path.push(format!("{}.java", self.class_name(algorithm)));
                path
            }
        }
    }

    fn generate_source(&self, suite: &SuiteContext<'_>) -> Result<String> {
        let (name, _) = self.framework.template();
        let template = self.env.get_template(name)?;
        let source = template.render(context! {
            suite => suite,
            class_name => self.class_name(suite.algorithm),
        })?;
        Ok(source)
    }
}

/// Reduce `name` to characters valid in Java and Python identifiers.
fn identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if ident.is_empty() {
        ident.push_str("Algorithm");
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Double-quoted string literal valid in Java and Python.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn python_literal(value: &str) -> String {
    match value.trim().to_lowercase().as_str() {
        "true" => "True".to_string(),
        "false" => "False".to_string(),
        "none" | "null" | "~" => "None".to_string(),
        _ if value.trim().parse::<f64>().is_ok_and(f64::is_finite) => value.trim().to_string(),
        _ => quote(value),
    }
}

fn java_literal(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.to_lowercase().as_str() {
        "true" | "false" => trimmed.to_lowercase(),
        _ if trimmed.parse::<i32>().is_ok() => trimmed.to_string(),
        _ if trimmed.parse::<f64>().is_ok_and(f64::is_finite) => {
            format!("{:?}", trimmed.parse::<f64>().unwrap_or_default())
        }
        _ => quote(value),
    }
}
