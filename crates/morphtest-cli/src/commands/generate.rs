//! Generate command implementation

use super::{resolve_config, DataArgs};
use crate::error::{require_file, Result};
use crate::output;
use morphtest::testgen::TestsuiteGenerator;
use std::path::Path;

/// Run the generate command
pub(crate) fn run(
    catalog: &Path,
    testcases: Option<&Path>,
    args: &DataArgs,
    json: bool,
) -> Result<()> {
    require_file(catalog)?;
    let algorithms = morphtest::catalog::load(catalog)?;

    let mut config = resolve_config(args)?;
    if let Some(dir) = testcases {
        config = config.with_testcase_path(dir);
    }
    let smoke_tests = config.smoke_selection()?;
    let metamorphic_tests = config.metamorphic_selection()?;

    let generator = TestsuiteGenerator::new(config)?;
    let datasets = generator.dataset_count(&smoke_tests, &metamorphic_tests)?;
    let written = generator.generate_tests(&algorithms, &smoke_tests, &metamorphic_tests)?;
    let config = generator.config();

    if json {
        let report = serde_json::json!({
            "modules": written,
            "testcase_path": config.testcase_path,
            "testdata_path": config.testdata_path,
            "datasets": datasets,
            "iterations": config.iterations,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::section("Test Suite");
    output::kv("Algorithms", algorithms.len());
    output::kv("Iterations", config.iterations);
    output::kv("Smoke tests", smoke_tests.len());
    output::kv("Metamorphic tests", metamorphic_tests.len());
    output::kv("Datasets", format!("{datasets} in {}", config.testdata_path.display()));
    output::section("Modules");
    for path in &written {
        println!("  {}", path.display());
    }
    println!();
    output::success(&format!("{} test modules written", written.len()));
    Ok(())
}
