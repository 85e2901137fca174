use crate::catalog::Algorithm;
use crate::config::GeneratorConfig;
use crate::metamorphic::{effective_relation, MetamorphicTest};
use crate::naming;
use crate::relation::{PredictionType, RelationType, TransformKind};
use crate::smoke::{DataSplit, SmokeTest};
use crate::testdata::DataDescription;
use serde::Serialize;

/// How generated code pairs original and morphed rows before comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Evaluation {
    /// Row `i` of the morphed data corresponds to row `i` of the original.
    Paired,
    /// Rows were permuted; pair them by feature values.
    Reassociated,
    /// Row correspondence is lost but the feature space is unchanged;
    /// both models predict the original rows.
    OriginalRows,
}

impl Evaluation {
    /// Pairing strategy for a metamorphic test.
    #[must_use]
    pub fn of(test: &dyn MetamorphicTest) -> Self {
        match (test.prediction_type(), test.kind()) {
            (PredictionType::OrderedData, _) => Self::Reassociated,
            (_, TransformKind::Duplication) => Self::OriginalRows,
            _ => Self::Paired,
        }
    }
}

/// Data files of one smoke test iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmokeRun {
    /// One-based iteration.
    pub iteration: usize,
    /// File the classifier is trained on.
    pub training: String,
    /// File the trained classifier predicts.
    pub test: String,
}

/// A smoke test as seen by a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmokeCase {
    /// Smoke test name.
    pub name: String,
    /// One-line description of the edge case.
    pub description: String,
    /// One run per iteration, ascending.
    pub runs: Vec<SmokeRun>,
}

/// Data files of one (iteration, baseline) pair of a metamorphic test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MorphRun {
    /// One-based iteration.
    pub iteration: usize,
    /// Baseline name.
    pub baseline: String,
    /// Baseline data file.
    pub original: String,
    /// Morphed data file.
    pub morphed: String,
}

/// A metamorphic test as seen by a template, with the relation already
/// resolved against the algorithm's overrides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MorphCase {
    /// Metamorphic test name.
    pub name: String,
    /// Upper-case property the algorithm may override.
    pub property: String,
    /// Effective relation for this algorithm.
    pub relation: RelationType,
    /// Compared output.
    pub prediction: PredictionType,
    /// Category of change.
    pub kind: TransformKind,
    /// Row pairing used before comparing.
    pub evaluation: Evaluation,
    /// Runs, iteration-major.
    pub runs: Vec<MorphRun>,
}

/// Everything a code generator needs to render one test module.
///
/// Iteration runs are listed in ascending order; within an iteration,
/// metamorphic runs follow the baseline table order.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteContext<'a> {
    /// Algorithm under test.
    pub algorithm: &'a Algorithm,
    /// Last segment of the implementation reference.
    pub implementation: &'a str,
    /// Dataset directory as referenced from generated code.
    pub datapath: String,
    /// Iterations per test.
    pub iterations: usize,
    /// Absolute tolerance of `APPROXIMATE` comparisons.
    pub tolerance: f64,
    /// Baseline names in table order.
    pub baselines: Vec<String>,
    /// Smoke tests in selection order.
    pub smoke_tests: Vec<SmokeCase>,
    /// Metamorphic tests in selection order.
    pub metamorphic_tests: Vec<MorphCase>,
}

impl<'a> SuiteContext<'a> {
    /// Build the context of `algorithm`.
    #[must_use]
    pub fn new(
        algorithm: &'a Algorithm,
        config: &GeneratorConfig,
        smoke_tests: &[Box<dyn SmokeTest>],
        metamorphic_tests: &[Box<dyn MetamorphicTest>],
        baselines: &[DataDescription],
    ) -> Self {
        let iterations = 1..=config.iterations;

        let smoke_tests = smoke_tests
            .iter()
            .map(|test| SmokeCase {
                name: test.name().to_string(),
                description: test.description().to_string(),
                runs: iterations
                    .clone()
                    .map(|iteration| SmokeRun {
                        iteration,
                        training: naming::smoke_file(test.name(), iteration, DataSplit::Training),
                        test: naming::smoke_file(test.name(), iteration, DataSplit::Test),
                    })
                    .collect(),
            })
            .collect();

        let metamorphic_tests = metamorphic_tests
            .iter()
            .map(|test| MorphCase {
                name: test.name().to_string(),
                property: test.property().to_string(),
                relation: effective_relation(test.as_ref(), algorithm),
                prediction: test.prediction_type(),
                kind: test.kind(),
                evaluation: Evaluation::of(test.as_ref()),
                runs: iterations
                    .clone()
                    .flat_map(|iteration| {
                        baselines.iter().map(move |baseline| MorphRun {
                            iteration,
                            baseline: baseline.name.clone(),
                            original: naming::baseline_file(&baseline.name, iteration),
                            morphed: naming::morph_file(&baseline.name, iteration, test.name()),
                        })
                    })
                    .collect(),
            })
            .collect();

        Self {
            algorithm,
            implementation: algorithm.simple_class_name(),
            datapath: config.testdata_path.to_string_lossy().replace('\\', "/"),
            iterations: config.iterations,
            tolerance: config.tolerance,
            baselines: baselines.iter().map(|b| b.name.clone()).collect(),
            smoke_tests,
            metamorphic_tests,
        }
    }

    /// Every data file the rendered module will read, in context order.
    #[must_use]
    pub fn referenced_files(&self) -> Vec<&str> {
        let smoke = self
            .smoke_tests
            .iter()
            .flat_map(|case| &case.runs)
            .flat_map(|run| [run.training.as_str(), run.test.as_str()]);
        let morph = self
            .metamorphic_tests
            .iter()
            .flat_map(|case| &case.runs)
            .flat_map(|run| [run.original.as_str(), run.morphed.as_str()]);
        smoke.chain(morph).collect()
    }
}
