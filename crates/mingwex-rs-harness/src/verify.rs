//! Case verification: output and return-count judgment.
//!
//! A fixture case pins two things at once: the rendered bytes and the
//! engine's return count. The two can disagree independently (a bounded
//! sink truncates the output while the count reports the full length), so
//! both are carried and compared explicitly.

use serde::{Deserialize, Serialize};

use crate::diff::render_diff;

/// What a fixture case expects back from the engine.
#[derive(Debug, Clone, Copy)]
pub struct Expectation<'a> {
    /// Expected rendered output. An `error:` prefix switches to substring
    /// matching against the engine's error message.
    pub output: &'a str,
    /// Expected return count (the running tally, or -1 for errors).
    pub count: i64,
}

/// Verdict for a single fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Name of the test case.
    pub case_name: String,
    /// C/POSIX spec section reference.
    pub spec_section: String,
    /// Whether both output and count matched.
    pub passed: bool,
    /// Expected output.
    pub expected: String,
    /// Actual output from the engine.
    pub actual: String,
    /// Expected return count.
    pub expected_count: i64,
    /// Actual return count.
    pub actual_count: i64,
    /// Diff if the case failed.
    pub diff: Option<String>,
}

impl VerificationResult {
    /// Judge an engine outcome against its expectation.
    ///
    /// Output comparison is byte-for-byte, except that an expected output
    /// starting with `error:` matches on substring so fixtures do not pin
    /// exact message wording. The count is compared separately; matching
    /// output with a wrong count still fails.
    pub fn judge(
        case_name: impl Into<String>,
        spec_section: impl Into<String>,
        expectation: Expectation<'_>,
        actual: String,
        actual_count: i64,
    ) -> Self {
        let output_ok = match expectation.output.strip_prefix("error:") {
            Some(wanted) => actual.starts_with("error:") && actual.contains(wanted.trim()),
            None => actual == expectation.output,
        };
        let passed = output_ok && actual_count == expectation.count;
        let diff = if passed {
            None
        } else {
            Some(render_diff(
                &format!("{} (count {})", expectation.output, expectation.count),
                &format!("{actual} (count {actual_count})"),
            ))
        };
        Self {
            case_name: case_name.into(),
            spec_section: spec_section.into(),
            passed,
            expected: expectation.output.to_string(),
            actual,
            expected_count: expectation.count,
            actual_count,
            diff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judge(expected: &str, count: i64, actual: &str, actual_count: i64) -> VerificationResult {
        VerificationResult::judge(
            "case",
            "C11 7.21.6.1",
            Expectation {
                output: expected,
                count,
            },
            actual.to_string(),
            actual_count,
        )
    }

    #[test]
    fn matching_output_and_count_passes() {
        let r = judge("   42", 5, "   42", 5);
        assert!(r.passed);
        assert!(r.diff.is_none());
    }

    #[test]
    fn count_mismatch_fails_even_with_matching_output() {
        // The snprintf contract: truncated output, full-length count.
        let r = judge("hel", 5, "hel", 3);
        assert!(!r.passed);
        assert_eq!(r.expected_count, 5);
        assert_eq!(r.actual_count, 3);
        assert!(r.diff.is_some());
    }

    #[test]
    fn output_mismatch_carries_a_diff() {
        let r = judge("2", 1, "1", 1);
        assert!(!r.passed);
        let diff = r.diff.unwrap();
        assert!(diff.contains("-2 (count 1)"));
        assert!(diff.contains("+1 (count 1)"));
    }

    #[test]
    fn error_expectation_matches_on_substring() {
        let r = judge(
            "error: null string",
            -1,
            "error: null string argument for %s conversion",
            -1,
        );
        assert!(r.passed, "{:?}", r.diff);
        // A successful render never satisfies an error expectation.
        let r = judge("error: null string", -1, "hello", 5);
        assert!(!r.passed);
    }
}
