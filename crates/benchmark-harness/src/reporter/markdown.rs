//! Markdown reporter for benchmark results.

use anyhow::Result;
use std::fmt::Write;

use crate::runner::BenchmarkResults;

/// Markdown format reporter.
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Format benchmark results as a Markdown report.
    pub fn format(results: &BenchmarkResults) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "# Benchmark Results: {}", results.suite_name)?;
        writeln!(output)?;
        writeln!(output, "- **Started**: {}", results.started_at)?;
        writeln!(output, "- **Duration**: {}ms", results.total_duration_ms)?;
        writeln!(
            output,
            "- **Score**: {:.1} ({}/{} assertions passed)",
            results.score.total_score, results.score.total_passed, results.score.total_tests
        )?;
        writeln!(
            output,
            "- **Status**: {}",
            if results.passed { "PASSED ✓" } else { "FAILED ✗" }
        )?;
        writeln!(output)?;

        writeln!(output, "## Cases")?;
        writeln!(output)?;
        writeln!(output, "| Case | Tests | Passed | Failed | Score | Weighted |")?;
        writeln!(output, "|------|------:|-------:|-------:|------:|---------:|")?;
        for case in &results.score.per_case {
            let weighted = case
                .weighted_score
                .map(|w| format!("{:.1}", w))
                .unwrap_or_else(|| "—".to_string());
            writeln!(
                output,
                "| {} | {} | {} | {} | {:.1} | {} |",
                case.name, case.total_tests, case.passed, case.failed, case.score, weighted
            )?;
        }
        writeln!(output)?;

        for case in &results.case_results {
            let needs_detail =
                !case.verification.applied || case.suite.failed > 0;
            if !needs_detail {
                continue;
            }

            writeln!(output, "### {} ✗", case.case_name)?;
            writeln!(output)?;

            if !case.verification.applied {
                writeln!(output, "Changeset effect not verified:")?;
                writeln!(output)?;
                for reason in &case.verification.reasons {
                    writeln!(output, "- {}", reason)?;
                }
                writeln!(output)?;
            }

            let failed: Vec<_> = case.suite.results.iter().filter(|r| !r.passed()).collect();
            if !failed.is_empty() {
                writeln!(output, "Failed assertions:")?;
                writeln!(output)?;
                for result in failed {
                    writeln!(
                        output,
                        "- `{}`: {}",
                        result.test_name,
                        result.message.as_deref().unwrap_or("(no message)")
                    )?;
                }
                writeln!(output)?;
            }
        }

        if !results.failures.is_empty() {
            writeln!(output, "## Failures")?;
            writeln!(output)?;
            for failure in &results.failures {
                writeln!(output, "- {}", failure)?;
            }
            writeln!(output)?;
        }

        Ok(output)
    }
}
