//! Runs the shipped fixture suites end to end through the engine.

use std::path::PathBuf;

use mingwex_rs_harness::{FixtureSet, TestRunner};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn run_suite(name: &str) {
    let set = FixtureSet::from_file(&fixture_path(name)).expect("fixture loads");
    let results = TestRunner::new("shipped").run(&set);
    let failures: Vec<String> = results
        .iter()
        .filter(|r| !r.passed)
        .map(|r| {
            format!(
                "{}: {}",
                r.case_name,
                r.diff.as_deref().unwrap_or("no diff")
            )
        })
        .collect();
    assert!(failures.is_empty(), "{name} failures:\n{}", failures.join("\n"));
}

#[test]
fn integer_suite_passes() {
    run_suite("integer.json");
}

#[test]
fn float_suite_passes() {
    run_suite("float.json");
}

#[test]
fn edge_suite_passes() {
    run_suite("edge.json");
}
