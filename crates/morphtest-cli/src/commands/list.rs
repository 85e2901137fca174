//! List command implementation

use crate::error::Result;
use crate::output;
use morphtest::testgen::GeneratorRegistry;
use morphtest::{metamorphic, smoke};

/// Run the list command
pub(crate) fn run(json: bool) -> Result<()> {
    let smoke_tests = smoke::all();
    let metamorphic_tests = metamorphic::all();
    let registry = GeneratorRegistry::with_builtin()?;

    if json {
        let report = serde_json::json!({
            "smoke_tests": smoke_tests
                .iter()
                .map(|t| serde_json::json!({ "name": t.name(), "description": t.description() }))
                .collect::<Vec<_>>(),
            "metamorphic_tests": metamorphic_tests
                .iter()
                .map(|t| serde_json::json!({
                    "name": t.name(),
                    "property": t.property(),
                    "relation": t.relation(),
                    "prediction": t.prediction_type(),
                    "kind": t.kind(),
                }))
                .collect::<Vec<_>>(),
            "frameworks": registry.frameworks().collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::section("Smoke Tests");
    for test in &smoke_tests {
        output::item(test.name(), test.description());
    }

    output::section("Metamorphic Tests");
    for test in &metamorphic_tests {
        output::item(
            test.name(),
            &format!(
                "{} on {} (property {})",
                test.relation(),
                test.prediction_type().token(),
                test.property()
            ),
        );
    }

    output::section("Frameworks");
    for framework in registry.frameworks() {
        output::item(framework, "");
    }
    Ok(())
}
