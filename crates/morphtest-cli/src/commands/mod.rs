//! Subcommand implementations

pub(crate) mod catalog;
pub(crate) mod data;
pub(crate) mod generate;
pub(crate) mod list;

use crate::error::{require_file, Result};
use clap::Args;
use morphtest::config::GeneratorConfig;
use std::path::PathBuf;
use tracing::debug;

/// Options shared by the commands that write datasets.
#[derive(Args, Debug, Default)]
pub(crate) struct DataArgs {
    /// Generator configuration file (YAML)
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Iterations per test
    #[arg(long)]
    pub(crate) iterations: Option<usize>,

    /// Dataset output directory
    #[arg(long, value_name = "DIR")]
    pub(crate) testdata: Option<PathBuf>,

    /// Smoke tests to generate, comma separated ("" selects none)
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub(crate) smoke: Option<Vec<String>>,

    /// Metamorphic tests to generate, comma separated ("" selects none)
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub(crate) metamorphic: Option<Vec<String>>,
}

fn selection(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration file (or defaults) with command-line overrides applied.
pub(crate) fn resolve_config(args: &DataArgs) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            require_file(path)?;
            GeneratorConfig::load(path)?
        }
        None => GeneratorConfig::default(),
    };
    if let Some(iterations) = args.iterations {
        config = config.with_iterations(iterations);
    }
    if let Some(dir) = &args.testdata {
        config = config.with_testdata_path(dir);
    }
    if let Some(names) = &args.smoke {
        config = config.with_smoke_tests(selection(names));
    }
    if let Some(names) = &args.metamorphic {
        config = config.with_metamorphic_tests(selection(names));
    }
    config.validate()?;
    debug!(
        iterations = config.iterations,
        testdata = %config.testdata_path.display(),
        "resolved configuration"
    );
    Ok(config)
}
