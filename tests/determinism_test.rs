//! Reproducibility tests.
//!
//! Seeds are derived from the iteration number only, so two runs with the
//! same configuration must write byte-identical datasets and modules.

use morphtest::catalog::parse_str;
use morphtest::config::GeneratorConfig;
use morphtest::testgen::TestsuiteGenerator;
use morphtest::{metamorphic, smoke};
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

const CATALOG: &str = "\
name: J48
type: classification
framework: weka
package: weka.classifiers.trees
class: weka.classifiers.trees.J48
features: numeric
parameters:
  C:
    type: double
    default: 0.25
";

fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let relative = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
                files.insert(relative, std::fs::read(&path).unwrap());
            }
        }
    }
    files
}

fn run(dir: &TempDir) {
    let config = GeneratorConfig::new()
        .with_iterations(2)
        .with_testcase_path(dir.path().join("tests"))
        .with_testdata_path(dir.path().join("data"));
    let catalog = parse_str(CATALOG).unwrap();
    TestsuiteGenerator::new(config)
        .unwrap()
        .generate_tests(&catalog, &smoke::all(), &metamorphic::all())
        .unwrap();
}

#[test]
fn test_datasets_are_byte_identical_across_runs() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    run(&first);
    run(&second);

    let a = snapshot(&first.path().join("data"));
    let b = snapshot(&second.path().join("data"));
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn test_rerun_in_place_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    run(&dir);
    let before = snapshot(dir.path());
    run(&dir);
    assert_eq!(before, snapshot(dir.path()));
}

#[test]
fn test_iterations_differ() {
    let dir = TempDir::new().unwrap();
    run(&dir);
    let data = dir.path().join("data");
    let first = std::fs::read_to_string(data.join("UniformRandom_1.arff")).unwrap();
    let second = std::fs::read_to_string(data.join("UniformRandom_2.arff")).unwrap();
    let body = |text: &str| text.split("@data").nth(1).unwrap_or_default().to_string();
    assert_ne!(body(&first), body(&second));
}
