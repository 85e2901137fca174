//! CLI Integration Tests for morphtest-cli

#![allow(clippy::unwrap_used)] // Tests can use unwrap

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

/// Create a morphtest command
fn morphtest() -> Command {
    Command::cargo_bin("morphtest").expect("Failed to find morphtest binary")
}

const CATALOG: &str = "\
name: NaiveBayes
type: classification
framework: weka
package: weka.classifiers.bayes
class: weka.classifiers.bayes.NaiveBayes
features: numeric
properties:
  scale: skip
---
name: RandomForest
type: classification
framework: sklearn
package: sklearn.ensemble
class: sklearn.ensemble.RandomForestClassifier
features: numeric
parameters:
  n_estimators:
    type: integer
    default: 10
";

fn write_catalog(dir: &Path, text: &str) -> std::path::PathBuf {
    let path = dir.join("algorithms.yml");
    std::fs::write(&path, text).unwrap();
    path
}

fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

// ============================================================================
// Help / list
// ============================================================================

#[test]
fn test_help_lists_commands() {
    morphtest()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("catalog"));
}

#[test]
fn test_list_shows_builtins() {
    morphtest()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("AllZeroes"))
        .stdout(predicate::str::contains("ScrambleInstances"))
        .stdout(predicate::str::contains("sklearn"));
}

#[test]
fn test_list_json() {
    let output = morphtest().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["frameworks"].as_array().unwrap().len(), 3);
    assert_eq!(report["metamorphic_tests"][0]["name"], "ScrambleInstances");
    assert_eq!(report["metamorphic_tests"][0]["prediction"], "ORDERED_DATA");
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_catalog_summary() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(dir.path(), CATALOG);
    morphtest()
        .arg("catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("NaiveBayes"))
        .stdout(predicate::str::contains("SCALE=SKIP"));
}

#[test]
fn test_catalog_missing_file() {
    morphtest()
        .args(["catalog", "/nonexistent/algorithms.yml"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_malformed_catalog_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(
        dir.path(),
        "name: A\ntype: c\nframework: weka\npackage: p\nclass: p.A\nfeatures: numeric\ncolour: red\n",
    );
    morphtest()
        .arg("catalog")
        .arg(&catalog)
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("record 1"));
}

// ============================================================================
// Generate / data
// ============================================================================

#[test]
fn test_generate_writes_modules_and_data() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(dir.path(), CATALOG);
    let tests = dir.path().join("tests");
    let data = dir.path().join("data");

    morphtest()
        .arg("generate")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--testcases")
        .arg(&tests)
        .arg("--testdata")
        .arg(&data)
        .args(["--iterations", "2", "--smoke", "AllZeroes", "--metamorphic", "InvertClass"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 test modules written"));

    assert!(tests.join("weka/classifiers/bayes/NaiveBayesTest.java").is_file());
    assert!(tests.join("test_randomforest.py").is_file());
    // 2 iterations × (2 smoke files + 2 baselines + 2 morphs)
    assert_eq!(file_count(&data), 12);
}

#[test]
fn test_generate_unknown_framework() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(
        dir.path(),
        "name: A\ntype: c\nframework: mystery\npackage: p\nclass: p.A\nfeatures: numeric\n",
    );
    morphtest()
        .arg("generate")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--testdata")
        .arg(dir.path().join("data"))
        .arg("--testcases")
        .arg(dir.path().join("tests"))
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("mystery"));
}

#[test]
fn test_generate_colliding_modules() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(
        dir.path(),
        "name: Naive Bayes\ntype: c\nframework: sklearn\npackage: sklearn.a\n\
         class: sklearn.a.GaussianNB\nfeatures: numeric\n---\n\
         name: NaiveBayes\ntype: c\nframework: sklearn\npackage: sklearn.b\n\
         class: sklearn.b.BernoulliNB\nfeatures: numeric\n",
    );
    morphtest()
        .arg("generate")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--testdata")
        .arg(dir.path().join("data"))
        .arg("--testcases")
        .arg(dir.path().join("tests"))
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("test_naivebayes.py"));
    assert!(!dir.path().join("tests").exists());
}

#[test]
fn test_generate_json_reports_dataset_count() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(dir.path(), CATALOG);
    let data = dir.path().join("data");
    let output = morphtest()
        .args(["generate", "--json", "--catalog"])
        .arg(&catalog)
        .arg("--testcases")
        .arg(dir.path().join("tests"))
        .arg("--testdata")
        .arg(&data)
        .args(["--smoke", "Uniform", "--metamorphic", "ScaleFeatures"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["datasets"], 6);
    assert_eq!(file_count(&data), 6);
}

#[test]
fn test_generate_unknown_smoke_test() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(dir.path(), CATALOG);
    morphtest()
        .arg("generate")
        .arg("--catalog")
        .arg(&catalog)
        .args(["--smoke", "NoSuchTest"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("NoSuchTest"));
}

#[test]
fn test_data_with_config_file() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    let config = dir.path().join("config.yml");
    std::fs::write(
        &config,
        format!(
            "testdata_path: {}\niterations: 1\nsmoke_tests: []\nmetamorphic_tests: []\n",
            data.display()
        ),
    )
    .unwrap();

    let output = morphtest()
        .args(["data", "--json", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["datasets"], 2);
    assert_eq!(report["baselines"][0]["name"], "UniformRandom");
    assert_eq!(file_count(&data), 2);
}

#[test]
fn test_zero_iterations_rejected() {
    morphtest()
        .args(["data", "--iterations", "0"])
        .assert()
        .failure()
        .code(5);
}
