//! Code pass: one generated test module per catalog algorithm.
//!
//! [`TestsuiteGenerator::generate_tests`] runs the data pass once, then
//! renders each algorithm through the [`TestcaseGenerator`] registered for
//! its framework. Generated code references datasets by the names in
//! [`crate::naming`], never by reading them.
//!
//! # Example
//!
//! ```no_run
//! use morphtest::config::GeneratorConfig;
//! use morphtest::testgen::TestsuiteGenerator;
//! use morphtest::{catalog, metamorphic, smoke};
//! use std::path::Path;
//!
//! let algorithms = catalog::load(Path::new("algorithms.yml"))?;
//! let generator = TestsuiteGenerator::new(GeneratorConfig::new().with_iterations(2))?;
//! let written = generator.generate_tests(&algorithms, &smoke::all(), &metamorphic::all())?;
//! println!("{} test modules", written.len());
//! # Ok::<(), morphtest::MorphError>(())
//! ```

mod context;
mod frameworks;
mod registry;

pub use context::{Evaluation, MorphCase, MorphRun, SmokeCase, SmokeRun, SuiteContext};
pub use frameworks::{BuiltinGenerator, Framework};
pub use registry::GeneratorRegistry;

use crate::catalog::Algorithm;
use crate::config::GeneratorConfig;
use crate::error::{MorphError, Result};
use crate::metamorphic::MetamorphicTest;
use crate::smoke::SmokeTest;
use crate::testdata::TestdataGenerator;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Renders test modules for one framework.
pub trait TestcaseGenerator: Send + Sync {
    /// Framework identifier this generator serves.
    fn framework(&self) -> &str;

    /// Output path of the module for `algorithm`, relative to the test
    /// case root.
    fn file_path(&self, algorithm: &Algorithm) -> PathBuf;

    /// Render the module source.
    fn generate_source(&self, suite: &SuiteContext<'_>) -> Result<String>;
}

/// Drives the data pass and the code pass.
#[derive(Debug)]
pub struct TestsuiteGenerator {
    config: GeneratorConfig,
    registry: GeneratorRegistry,
}

impl TestsuiteGenerator {
    /// Create a generator with the built-in framework registry.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of `config` or a template error.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry: GeneratorRegistry::with_builtin()?,
        })
    }

    /// Replace the framework registry.
    #[must_use]
    pub fn with_registry(mut self, registry: GeneratorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Mutable access to the registry, e.g. to add a framework.
    pub fn registry_mut(&mut self) -> &mut GeneratorRegistry {
        &mut self.registry
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Number of dataset files [`TestsuiteGenerator::generate_tests`]
    /// writes for the given tests.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of the configured baseline table.
    pub fn dataset_count(
        &self,
        smoke_tests: &[Box<dyn SmokeTest>],
        metamorphic_tests: &[Box<dyn MetamorphicTest>],
    ) -> Result<usize> {
        Ok(self.testdata(smoke_tests, metamorphic_tests)?.file_count())
    }

    fn testdata<'t>(
        &self,
        smoke_tests: &'t [Box<dyn SmokeTest>],
        metamorphic_tests: &'t [Box<dyn MetamorphicTest>],
    ) -> Result<TestdataGenerator<'t>> {
        Ok(TestdataGenerator::new(smoke_tests, metamorphic_tests)
            .with_iterations(self.config.iterations)
            .with_baselines(self.config.baseline_table()?))
    }

    /// Write all datasets and one test module per algorithm; return the
    /// module paths in catalog order.
    ///
    /// Every algorithm's framework and module path is resolved before
    /// anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::UnknownFramework`] for an unregistered
    /// framework and [`MorphError::Catalog`] when a module path leaves the
    /// test case root or two algorithms map to the same module. Otherwise
    /// returns the first data pass, render or write failure. Nothing after
    /// the failure is generated.
    pub fn generate_tests(
        &self,
        algorithms: &[Algorithm],
        smoke_tests: &[Box<dyn SmokeTest>],
        metamorphic_tests: &[Box<dyn MetamorphicTest>],
    ) -> Result<Vec<PathBuf>> {
        let generators = algorithms
            .iter()
            .map(|algorithm| self.registry.get(algorithm.framework()))
            .collect::<Result<Vec<_>>>()?;
        let modules = module_paths(algorithms, &generators)?;

        let baselines = self
            .testdata(smoke_tests, metamorphic_tests)?
            .generate_testdata(&self.config.testdata_path)?;

        info!(
            algorithms = algorithms.len(),
            path = %self.config.testcase_path.display(),
            "generating test cases"
        );
        let mut written = Vec::with_capacity(algorithms.len());
        for ((algorithm, generator), module) in algorithms.iter().zip(generators).zip(modules) {
            info!(
                algorithm = algorithm.name(),
                framework = generator.framework(),
                "generating test module"
            );
            let suite = SuiteContext::new(
                algorithm,
                &self.config,
                smoke_tests,
                metamorphic_tests,
                &baselines,
            );
            let source = generator.generate_source(&suite)?;
            let path = self.config.testcase_path.join(module);
            write_source(&path, &source)?;
            debug!(path = %path.display(), bytes = source.len(), "wrote test module");
            written.push(path);
        }
        info!(modules = written.len(), "test cases complete");
        Ok(written)
    }
}

/// Module path of every algorithm, relative to the test case root.
///
/// Paths must consist of plain components only and be unique; records are
/// reported one-based, as in the catalog.
fn module_paths(
    algorithms: &[Algorithm],
    generators: &[&dyn TestcaseGenerator],
) -> Result<Vec<PathBuf>> {
    let mut seen: HashMap<PathBuf, usize> = HashMap::with_capacity(algorithms.len());
    let mut paths = Vec::with_capacity(algorithms.len());
    for (idx, (algorithm, generator)) in algorithms.iter().zip(generators).enumerate() {
        let record = idx + 1;
        let path = generator.file_path(algorithm);
        let contained = path.components().next().is_some()
            && path.components().all(|c| matches!(c, Component::Normal(_)));
        if !contained {
            return Err(MorphError::catalog(
                record,
                format!(
                    "test module path {} of {} is not inside the test case root",
                    path.display(),
                    algorithm.name()
                ),
            ));
        }
        if let Some(first) = seen.insert(path.clone(), record) {
            return Err(MorphError::catalog(
                record,
                format!(
                    "{} maps to test module {}, already used by record {first} ({})",
                    algorithm.name(),
                    path.display(),
                    algorithms[first - 1].name()
                ),
            ));
        }
        paths.push(path);
    }
    Ok(paths)
}

fn write_source(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| MorphError::io("creating test case directory", parent, e))?;
    }
    std::fs::write(path, source).map_err(|e| MorphError::io("writing test module", path, e))
}
