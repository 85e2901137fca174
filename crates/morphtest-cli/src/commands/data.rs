//! Data command implementation

use super::{resolve_config, DataArgs};
use crate::error::Result;
use crate::output;
use morphtest::testdata::TestdataGenerator;

/// Run the data command
pub(crate) fn run(args: &DataArgs, json: bool) -> Result<()> {
    let config = resolve_config(args)?;
    let smoke_tests = config.smoke_selection()?;
    let metamorphic_tests = config.metamorphic_selection()?;
    let generator = TestdataGenerator::new(&smoke_tests, &metamorphic_tests)
        .with_iterations(config.iterations)
        .with_baselines(config.baseline_table()?);

    let baselines = generator.generate_testdata(&config.testdata_path)?;

    if json {
        let report = serde_json::json!({
            "testdata_path": config.testdata_path,
            "datasets": generator.file_count(),
            "iterations": config.iterations,
            "baselines": baselines,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::section("Test Data");
    output::kv("Directory", config.testdata_path.display());
    output::kv("Iterations", config.iterations);
    output::kv("Datasets", generator.file_count());
    output::section("Baselines");
    for baseline in &baselines {
        let spec = &baseline.spec;
        output::item(
            &baseline.name,
            &format!(
                "{} features ({} informative), {} instances, {} classes",
                spec.features, spec.informative, spec.instances, spec.classes
            ),
        );
    }
    println!();
    output::success("test data written");
    Ok(())
}
