//! Test execution engine.

use thiserror::Error;

use mingwex_rs_core::stdio::{PFormatArg, snprintf, sprintf};

use crate::fixtures::{ArgSpec, FixtureCase, FixtureSet};
use crate::verify::{Expectation, VerificationResult};

/// Harness-level failures (I/O and fixture decoding, not case failures).
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("fixture I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("fixture decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// What one case produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOutcome {
    /// Rendered bytes (lossy UTF-8), or `error: <message>` on failure.
    pub output: String,
    /// Engine return count; -1 for errors (the C boundary convention).
    pub count: i64,
}

/// Execute a single fixture case against the engine.
pub fn execute_case(case: &FixtureCase) -> CaseOutcome {
    let args: Vec<PFormatArg<'_>> = case.args.iter().map(arg_of).collect();
    let fmt = case.format.as_bytes();

    let result = match case.limit {
        None => {
            let mut out = Vec::new();
            sprintf(&mut out, fmt, &args).map(|n| (out, n))
        }
        Some(cap) => {
            let mut buf = vec![0u8; cap];
            snprintf(&mut buf, fmt, &args).map(|n| {
                buf.truncate(n.min(cap));
                (buf, n)
            })
        }
    };

    match result {
        Ok((bytes, n)) => CaseOutcome {
            output: String::from_utf8_lossy(&bytes).into_owned(),
            count: n as i64,
        },
        Err(err) => CaseOutcome {
            output: format!("error: {err}"),
            count: -1,
        },
    }
}

fn arg_of(spec: &ArgSpec) -> PFormatArg<'_> {
    match spec {
        ArgSpec::Int(v) => PFormatArg::Int(*v),
        ArgSpec::Uint(v) => PFormatArg::Uint(*v),
        ArgSpec::Float(v) => PFormatArg::Float(*v),
        ArgSpec::Char(c) if c.is_ascii() => PFormatArg::Char(*c as u8),
        ArgSpec::Char(c) => PFormatArg::WideChar(*c),
        ArgSpec::Str(s) => PFormatArg::Str(Some(s.as_bytes())),
        ArgSpec::NullStr => PFormatArg::Str(None),
        ArgSpec::Ptr(p) => PFormatArg::Ptr(*p as usize),
    }
}

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
}

impl TestRunner {
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
        }
    }

    /// Run all fixtures in a set and return results.
    ///
    /// An omitted `expected_count` defaults to the expected output's
    /// length, which is the common untruncated case.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .map(|case| {
                let outcome = execute_case(case);
                let expectation = Expectation {
                    output: &case.expected,
                    count: case
                        .expected_count
                        .unwrap_or(case.expected.len() as i64),
                };
                VerificationResult::judge(
                    case.name.clone(),
                    case.spec_section.clone(),
                    expectation,
                    outcome.output,
                    outcome.count,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_case_set(case: FixtureCase) -> FixtureSet {
        FixtureSet {
            version: "v1".into(),
            family: "pformat/test".into(),
            cases: vec![case],
        }
    }

    #[test]
    fn passing_case() {
        let set = one_case_set(FixtureCase {
            name: "width".into(),
            spec_section: "C11 7.21.6.1".into(),
            format: "%5d".into(),
            args: vec![ArgSpec::Int(42)],
            expected: "   42".into(),
            expected_count: None,
            limit: None,
        });
        let results = TestRunner::new("smoke").run(&set);
        assert_eq!(results.len(), 1);
        assert!(results[0].passed, "{:?}", results[0].diff);
    }

    #[test]
    fn truncating_case_checks_tally_separately() {
        let set = one_case_set(FixtureCase {
            name: "snprintf".into(),
            spec_section: "C11 7.21.6.5".into(),
            format: "%s".into(),
            args: vec![ArgSpec::Str("hello".into())],
            expected: "hel".into(),
            expected_count: Some(5),
            limit: Some(3),
        });
        let results = TestRunner::new("smoke").run(&set);
        assert!(results[0].passed, "{:?}", results[0].diff);
    }

    #[test]
    fn failing_case_carries_a_diff() {
        let set = one_case_set(FixtureCase {
            name: "wrong".into(),
            spec_section: "C11 7.21.6.1".into(),
            format: "%d".into(),
            args: vec![ArgSpec::Int(1)],
            expected: "2".into(),
            expected_count: None,
            limit: None,
        });
        let results = TestRunner::new("smoke").run(&set);
        assert!(!results[0].passed);
        assert!(results[0].diff.is_some());
    }

    #[test]
    fn error_case_matches_on_substring() {
        let set = one_case_set(FixtureCase {
            name: "null-string".into(),
            spec_section: "engine error taxonomy".into(),
            format: "%s".into(),
            args: vec![ArgSpec::NullStr],
            expected: "error: null string".into(),
            expected_count: Some(-1),
            limit: None,
        });
        let results = TestRunner::new("smoke").run(&set);
        assert!(results[0].passed, "{:?}", results[0].diff);
    }
}
