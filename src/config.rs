//! Generator configuration.
//!
//! Loadable from YAML; every field is optional there:
//!
//! ```yaml
//! testcase_path: generated/tests
//! testdata_path: generated/data
//! iterations: 3
//! smoke_tests: [AllZeroes, OneClass]
//! metamorphic_tests: [ScrambleInstances]
//! baselines:
//!   - name: Gaussian
//!     spec: { features: 4, informative: 2, instances: 50 }
//! ```

use crate::error::{MorphError, Result};
use crate::metamorphic::{self, MetamorphicTest};
use crate::smoke::{self, SmokeTest};
use crate::testdata::{BaselineTable, DataDescription};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default tolerance of `APPROXIMATE` score comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Configuration shared by the data and code passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Root directory of generated test modules.
    pub testcase_path: PathBuf,
    /// Directory of generated datasets. Generated modules reference it
    /// verbatim, so a relative path resolves against the directory the
    /// tests run from.
    pub testdata_path: PathBuf,
    /// Iterations per test (≥ 1).
    pub iterations: usize,
    /// Smoke tests by name; `None` selects all built-ins.
    pub smoke_tests: Option<Vec<String>>,
    /// Metamorphic tests by name; `None` selects all built-ins.
    pub metamorphic_tests: Option<Vec<String>>,
    /// Baseline table override; `None` uses the default table.
    pub baselines: Option<Vec<DataDescription>>,
    /// Absolute tolerance of `APPROXIMATE` comparisons.
    pub tolerance: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            testcase_path: PathBuf::from("generated/tests"),
            testdata_path: PathBuf::from("generated/data"),
            iterations: 1,
            smoke_tests: None,
            metamorphic_tests: None,
            baselines: None,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::Yaml`] for malformed YAML or unknown keys,
    /// otherwise the errors of [`GeneratorConfig::validate`].
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::Io`] if the file cannot be read, otherwise the
    /// errors of [`GeneratorConfig::from_yaml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| MorphError::io("reading generator configuration", path, e))?;
        Self::from_yaml_str(&text)
    }

    /// Set the test module root.
    #[must_use]
    pub fn with_testcase_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.testcase_path = path.into();
        self
    }

    /// Set the dataset directory.
    #[must_use]
    pub fn with_testdata_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.testdata_path = path.into();
        self
    }

    /// Set the iteration count.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Restrict smoke tests to `names`.
    #[must_use]
    pub fn with_smoke_tests(mut self, names: Vec<String>) -> Self {
        self.smoke_tests = Some(names);
        self
    }

    /// Restrict metamorphic tests to `names`.
    #[must_use]
    pub fn with_metamorphic_tests(mut self, names: Vec<String>) -> Self {
        self.metamorphic_tests = Some(names);
        self
    }

    /// Replace the baseline table.
    #[must_use]
    pub fn with_baselines(mut self, baselines: Vec<DataDescription>) -> Self {
        self.baselines = Some(baselines);
        self
    }

    /// Set the `APPROXIMATE` tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check value domains and that every selected name exists.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidParameter`] or
    /// [`MorphError::UnknownToken`] on the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(MorphError::invalid_parameter("iterations", 0, ">= 1"));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(MorphError::invalid_parameter(
                "tolerance",
                self.tolerance,
                "finite and >= 0",
            ));
        }
        self.smoke_selection()?;
        self.metamorphic_selection()?;
        self.baseline_table()?;
        Ok(())
    }

    /// Selected smoke tests in the configured order.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::UnknownToken`] for unknown names.
    pub fn smoke_selection(&self) -> Result<Vec<Box<dyn SmokeTest>>> {
        match &self.smoke_tests {
            Some(names) => smoke::select(names),
            None => Ok(smoke::all()),
        }
    }

    /// Selected metamorphic tests in the configured order.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::UnknownToken`] for unknown names.
    pub fn metamorphic_selection(&self) -> Result<Vec<Box<dyn MetamorphicTest>>> {
        match &self.metamorphic_tests {
            Some(names) => metamorphic::select(names),
            None => Ok(metamorphic::all()),
        }
    }

    /// The configured baseline table.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`BaselineTable::new`].
    pub fn baseline_table(&self) -> Result<BaselineTable> {
        match &self.baselines {
            Some(entries) => BaselineTable::new(entries.clone()),
            None => Ok(BaselineTable::default()),
        }
    }
}
