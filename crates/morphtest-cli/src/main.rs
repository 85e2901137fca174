//! morphtest - metamorphic test suite generator CLI
//!
//! Usage:
//!   morphtest generate --catalog algorithms.yml            # Data + test modules
//!   morphtest generate --catalog algorithms.yml --iterations 3 --smoke AllZeroes,OneClass
//!   morphtest data --testdata ./data                       # Datasets only
//!   morphtest list                                         # Available tests and frameworks
//!   morphtest catalog algorithms.yml                       # Validate a catalog

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

use commands::DataArgs;

/// morphtest - Metamorphic Test Suite Generator
///
/// Writes reproducible datasets and one test module per catalog algorithm.
#[derive(Parser)]
#[command(name = "morphtest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate datasets and test modules for a catalog
    Generate {
        /// Algorithm catalog (YAML stream)
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Root directory of generated test modules
        #[arg(long, value_name = "DIR")]
        testcases: Option<PathBuf>,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Generate datasets only
    Data {
        #[command(flatten)]
        data: DataArgs,
    },

    /// List smoke tests, metamorphic tests and frameworks
    List,

    /// Validate and summarize a catalog
    Catalog {
        /// Algorithm catalog (YAML stream)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Generate {
            catalog,
            testcases,
            data,
        } => commands::generate::run(&catalog, testcases.as_deref(), &data, cli.json),
        Commands::Data { data } => commands::data::run(&data, cli.json),
        Commands::List => commands::list::run(cli.json),
        Commands::Catalog { file } => commands::catalog::run(&file, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "morphtest",
            "generate",
            "--catalog",
            "a.yml",
            "--iterations",
            "3",
            "--smoke",
            "AllZeroes,OneClass",
        ])
        .unwrap();
        let Commands::Generate { catalog, data, .. } = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(catalog, PathBuf::from("a.yml"));
        assert_eq!(data.iterations, Some(3));
        assert_eq!(
            data.smoke,
            Some(vec!["AllZeroes".to_string(), "OneClass".to_string()])
        );
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["morphtest", "-v", "-q", "list"]).is_err());
    }
}
