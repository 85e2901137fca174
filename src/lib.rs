//! morphtest: metamorphic and smoke test suite generation for classifiers.
//!
//! Given a catalog of classification algorithms, morphtest writes
//! seed-reproducible datasets and one test module per algorithm. Each
//! module trains the classifier on an original dataset and on a
//! transformed variant, then asserts the declared relation between the
//! two outputs. morphtest never runs a classifier itself.
//!
//! # Quick Start
//!
//! ```
//! use morphtest::catalog;
//! use morphtest::config::GeneratorConfig;
//! use morphtest::testgen::TestsuiteGenerator;
//! use morphtest::{metamorphic, smoke};
//!
//! let out = tempfile::tempdir().unwrap();
//! let algorithms = catalog::parse_str(
//!     "name: NaiveBayes\ntype: classification\nframework: weka\n\
//!      package: weka.classifiers.bayes\nclass: weka.classifiers.bayes.NaiveBayes\n\
//!      features: numeric\n",
//! ).unwrap();
//!
//! let config = GeneratorConfig::new()
//!     .with_testcase_path(out.path().join("tests"))
//!     .with_testdata_path(out.path().join("data"));
//! let generator = TestsuiteGenerator::new(config).unwrap();
//! let written = generator
//!     .generate_tests(&algorithms, &smoke::all(), &metamorphic::all())
//!     .unwrap();
//! assert!(written[0].ends_with("weka/classifiers/bayes/NaiveBayesTest.java"));
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Algorithm catalog (validating YAML stream parser)
//! - [`relation`]: Expected relations, prediction types, transform kinds
//! - [`data`]: Dataset model, ARFF output, synthetic data generator
//! - [`smoke`]: Edge-case smoke test recipes
//! - [`metamorphic`]: Seeded metamorphic transformations
//! - [`naming`]: Persisted file names shared by both passes
//! - [`testdata`]: Data pass and baseline table
//! - [`testgen`]: Code pass, framework registry, built-in generators
//! - [`config`]: Generator configuration

pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod metamorphic;
pub mod naming;
pub mod relation;
pub mod smoke;
pub mod testdata;
pub mod testgen;

pub use error::{MorphError, Result};
