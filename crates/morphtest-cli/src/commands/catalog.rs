//! Catalog command implementation

use crate::error::{require_file, Result};
use crate::output;
use colored::Colorize;
use morphtest::testgen::GeneratorRegistry;
use std::path::Path;

/// Run the catalog command
pub(crate) fn run(path: &Path, json: bool) -> Result<()> {
    require_file(path)?;
    let algorithms = morphtest::catalog::load(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&algorithms)?);
        return Ok(());
    }

    let registry = GeneratorRegistry::with_builtin()?;
    output::section(&format!("Catalog: {}", path.display()));
    output::kv("Algorithms", algorithms.len());

    for algorithm in &algorithms {
        println!();
        println!("  {}", algorithm.name().cyan().bold());
        output::kv("Class", algorithm.class());
        let framework = if registry.get(algorithm.framework()).is_ok() {
            algorithm.framework().normal()
        } else {
            format!("{} (no built-in generator)", algorithm.framework()).yellow()
        };
        output::kv("Framework", framework);
        output::kv("Features", algorithm.features());
        output::kv("Parameters", algorithm.parameters().len());
        if !algorithm.properties().is_empty() {
            let overrides: Vec<String> = algorithm
                .properties()
                .iter()
                .map(|(property, relation)| format!("{property}={relation}"))
                .collect();
            output::kv("Overrides", overrides.join(", "));
        }
    }
    Ok(())
}
