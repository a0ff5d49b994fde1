//! Report generation for conformance results.

use serde::{Deserialize, Serialize};

use crate::verify::VerificationResult;

/// Aggregated conformance report for one verification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Report title.
    pub title: String,
    /// Campaign name.
    pub campaign: String,
    /// Total cases run.
    pub total: usize,
    /// Cases where output and count both matched.
    pub passed: usize,
    /// Cases with an output or count mismatch.
    pub failed: usize,
    /// Individual verdicts.
    pub results: Vec<VerificationResult>,
}

impl ConformanceReport {
    /// Aggregate individual verdicts into a report.
    #[must_use]
    pub fn from_results(
        title: impl Into<String>,
        campaign: impl Into<String>,
        results: Vec<VerificationResult>,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            title: title.into(),
            campaign: campaign.into(),
            total,
            passed,
            failed: total - passed,
            results,
        }
    }

    /// Returns true if every case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Campaign: {}\n", self.campaign));
        out.push_str(&format!("- Total: {}\n", self.total));
        out.push_str(&format!("- Passed: {}\n", self.passed));
        out.push_str(&format!("- Failed: {}\n\n", self.failed));

        out.push_str("| Case | Spec | Count | Status |\n");
        out.push_str("|------|------|-------|--------|\n");
        for r in &self.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                r.case_name, r.spec_section, r.actual_count, status
            ));
        }

        let failures: Vec<_> = self.results.iter().filter(|r| !r.passed).collect();
        if !failures.is_empty() {
            out.push_str("\n## Failures\n");
            for r in failures {
                out.push_str(&format!("\n### {}\n\n", r.case_name));
                if let Some(diff) = &r.diff {
                    out.push_str(&format!("```\n{diff}\n```\n"));
                }
            }
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}
