//! Test data pass: writes every dataset the generated test modules read.
//!
//! For each iteration `1..=iterations` the pass writes, in this order:
//!
//! 1. both splits of every smoke test,
//! 2. every baseline of the [`BaselineTable`] (seed = iteration),
//! 3. every metamorphic test applied to every baseline (seed = iteration).
//!
//! A run therefore writes `iterations × (2·S + B + B·M)` files. Names come
//! from [`crate::naming`]; the code pass uses the same functions and the
//! returned [`DataDescription`] list, so it never needs the datasets.

mod baseline;

pub use baseline::{BaselineTable, DataDescription};

use crate::data::{arff, Dataset};
use crate::error::{MorphError, Result};
use crate::metamorphic::MetamorphicTest;
use crate::naming;
use crate::smoke::{DataSplit, SmokeTest};
use std::path::Path;
use tracing::{debug, info};

/// Drives the data pass over a fixed set of smoke and metamorphic tests.
#[derive(Debug)]
pub struct TestdataGenerator<'a> {
    smoke_tests: &'a [Box<dyn SmokeTest>],
    metamorphic_tests: &'a [Box<dyn MetamorphicTest>],
    iterations: usize,
    baselines: BaselineTable,
}

impl<'a> TestdataGenerator<'a> {
    /// Create a generator with one iteration and the default baselines.
    #[must_use]
    pub fn new(
        smoke_tests: &'a [Box<dyn SmokeTest>],
        metamorphic_tests: &'a [Box<dyn MetamorphicTest>],
    ) -> Self {
        Self {
            smoke_tests,
            metamorphic_tests,
            iterations: 1,
            baselines: BaselineTable::default(),
        }
    }

    /// Set the number of iterations.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Replace the baseline table.
    #[must_use]
    pub fn with_baselines(mut self, baselines: BaselineTable) -> Self {
        self.baselines = baselines;
        self
    }

    /// Baselines the pass builds.
    #[must_use]
    pub fn baselines(&self) -> &BaselineTable {
        &self.baselines
    }

    /// Number of files a run writes.
    #[must_use]
    pub fn file_count(&self) -> usize {
        let per_iteration = 2 * self.smoke_tests.len()
            + self.baselines.len()
            + self.baselines.len() * self.metamorphic_tests.len();
        self.iterations * per_iteration
    }

    /// Write all datasets below `output` and return the baseline
    /// descriptions the code pass references.
    ///
    /// # Errors
    ///
    /// Returns the first recipe, morph or write failure. Files written
    /// before the failure are left in place.
    pub fn generate_testdata(&self, output: &Path) -> Result<Vec<DataDescription>> {
        std::fs::create_dir_all(output)
            .map_err(|e| MorphError::io("creating test data directory", output, e))?;
        info!(
            path = %output.display(),
            iterations = self.iterations,
            files = self.file_count(),
            "generating test data"
        );

        for iteration in 1..=self.iterations {
            self.write_smoke_data(output, iteration)?;
            let baselines = self.write_baselines(output, iteration)?;
            self.write_morphed_data(output, iteration, &baselines)?;
        }

        info!(path = %output.display(), "test data complete");
        Ok(self.baselines.entries().to_vec())
    }

    fn write_smoke_data(&self, output: &Path, iteration: usize) -> Result<()> {
        for test in self.smoke_tests {
            for split in DataSplit::both() {
                let data = test.create_data(iteration, split)?;
                let file = naming::smoke_file(test.name(), iteration, split);
                let context = format!(
                    "writing {split} data of smoke test {} (iteration {iteration})",
                    test.name()
                );
                write_dataset(&data, output, &file, &context)?;
            }
        }
        Ok(())
    }

    fn write_baselines<'d>(
        &'d self,
        output: &Path,
        iteration: usize,
    ) -> Result<Vec<(&'d str, Dataset)>> {
        let mut built = Vec::with_capacity(self.baselines.len());
        for description in self.baselines.entries() {
            let data = description.build(iteration)?;
            let file = naming::baseline_file(&description.name, iteration);
            let context = format!(
                "writing baseline {} (iteration {iteration})",
                description.name
            );
            write_dataset(&data, output, &file, &context)?;
            built.push((description.name.as_str(), data));
        }
        Ok(built)
    }

    fn write_morphed_data(
        &self,
        output: &Path,
        iteration: usize,
        baselines: &[(&str, Dataset)],
    ) -> Result<()> {
        for test in self.metamorphic_tests {
            for (name, data) in baselines {
                let morphed = test.morph_data(data, iteration as u64)?;
                let file = naming::morph_file(name, iteration, test.name());
                let context = format!(
                    "writing {} of baseline {name} (iteration {iteration})",
                    test.name()
                );
                write_dataset(&morphed, output, &file, &context)?;
            }
        }
        Ok(())
    }
}

fn write_dataset(data: &Dataset, dir: &Path, file: &str, context: &str) -> Result<()> {
    let path = dir.join(file);
    arff::write(data, &path, context)?;
    debug!(file, instances = data.num_instances(), "wrote dataset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{metamorphic, smoke};
    use tempfile::TempDir;

    fn count_files(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_generates_expected_file_set() {
        let smoke_tests = smoke::select(&["AllZeroes", "OneClass"]).unwrap();
        let morphs = metamorphic::select(&["ScrambleInstances"]).unwrap();
        let generator = TestdataGenerator::new(&smoke_tests, &morphs).with_iterations(2);
        let dir = TempDir::new().unwrap();

        let descriptions = generator.generate_testdata(dir.path()).unwrap();

        assert_eq!(descriptions.len(), 2);
        assert_eq!(generator.file_count(), 2 * (4 + 2 + 2));
        assert_eq!(count_files(dir.path()), generator.file_count());
        for file in [
            "smoketest_AllZeroes_1_training.arff",
            "smoketest_OneClass_2_test.arff",
            "UniformRandom_1.arff",
            "UniformInformative_2.arff",
            "UniformInformative_2_ScrambleInstances.arff",
        ] {
            assert!(dir.path().join(file).is_file(), "missing {file}");
        }
    }

    #[test]
    fn test_zero_tests_still_writes_baselines() {
        let generator = TestdataGenerator::new(&[], &[]).with_iterations(3);
        let dir = TempDir::new().unwrap();
        let descriptions = generator.generate_testdata(dir.path()).unwrap();
        assert_eq!(descriptions.len(), 2);
        assert_eq!(count_files(dir.path()), 6);
    }

    #[test]
    fn test_morphed_relation_records_provenance() {
        let morphs = metamorphic::select(&["InvertClass"]).unwrap();
        let dir = TempDir::new().unwrap();
        TestdataGenerator::new(&[], &morphs)
            .generate_testdata(dir.path())
            .unwrap();
        let text =
            std::fs::read_to_string(dir.path().join("UniformRandom_1_InvertClass.arff")).unwrap();
        assert!(text.starts_with("@relation UniformRandom_1_InvertClass\n"));
    }

    #[test]
    fn test_creates_nested_output_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        TestdataGenerator::new(&[], &[])
            .generate_testdata(&nested)
            .unwrap();
        // idempotent
        TestdataGenerator::new(&[], &[])
            .generate_testdata(&nested)
            .unwrap();
        assert_eq!(count_files(&nested), 2);
    }

    #[test]
    fn test_write_failure_carries_context() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();
        let err = TestdataGenerator::new(&[], &[])
            .generate_testdata(&blocker)
            .unwrap_err();
        assert!(matches!(err, MorphError::Io { .. }));
    }

    #[test]
    fn test_morph_precondition_failure_aborts() {
        let spec = crate::data::SyntheticSpec::new(3, 1, 12).with_classes(3);
        let table = BaselineTable::new(vec![DataDescription::new("ThreeClass", spec)]).unwrap();
        let morphs = metamorphic::select(&["InvertClass"]).unwrap();
        let dir = TempDir::new().unwrap();
        let err = TestdataGenerator::new(&[], &morphs)
            .with_baselines(table)
            .generate_testdata(dir.path())
            .unwrap_err();
        assert!(matches!(err, MorphError::Dataset(_)));
    }
}
