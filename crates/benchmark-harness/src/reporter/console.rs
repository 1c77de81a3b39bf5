//! Console reporter for benchmark results.
//!
//! Human-readable output with ASCII tables and status indicators.

use anyhow::Result;
use std::fmt::Write;

use crate::runner::{BenchmarkResults, CaseResult};

/// Console format reporter.
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Format benchmark results for console output.
    pub fn format(results: &BenchmarkResults) -> Result<String> {
        let mut output = String::new();

        writeln!(output)?;
        writeln!(output, "╔══════════════════════════════════════════════════════════════╗")?;
        writeln!(output, "║                    BENCHMARK RESULTS                          ║")?;
        writeln!(output, "╚══════════════════════════════════════════════════════════════╝")?;
        writeln!(output)?;

        writeln!(output, "Suite:     {}", results.suite_name)?;
        writeln!(output, "Started:   {}", results.started_at)?;
        writeln!(output, "Duration:  {}ms", results.total_duration_ms)?;
        writeln!(
            output,
            "Score:     {:.1} ({}/{} assertions passed)",
            results.score.total_score, results.score.total_passed, results.score.total_tests
        )?;
        writeln!(output)?;

        writeln!(output, "  ┌──────────────────────────┬───────┬────────┬────────┬─────────┐")?;
        writeln!(output, "  │ Case                     │ Tests │ Passed │ Failed │  Score  │")?;
        writeln!(output, "  ├──────────────────────────┼───────┼────────┼────────┼─────────┤")?;
        for case in &results.score.per_case {
            writeln!(
                output,
                "  │ {:<24} │ {:>5} │ {:>6} │ {:>6} │ {:>7.1} │",
                truncate(&case.name, 24),
                case.total_tests,
                case.passed,
                case.failed,
                case.score
            )?;
        }
        writeln!(output, "  └──────────────────────────┴───────┴────────┴────────┴─────────┘")?;
        writeln!(output)?;

        for case in &results.case_results {
            Self::format_case(&mut output, case)?;
        }

        writeln!(output)?;
        writeln!(output, "────────────────────────────────────────────────────────────────")?;
        let status = if results.passed { "PASSED" } else { "FAILED" };
        let status_symbol = if results.passed { "✓" } else { "✗" };
        writeln!(output, "Overall Status: {} {}", status_symbol, status)?;

        if !results.failures.is_empty() {
            writeln!(output)?;
            writeln!(output, "Failures:")?;
            for failure in &results.failures {
                writeln!(output, "  • {}", failure)?;
            }
        }

        writeln!(output)?;
        Ok(output)
    }

    fn format_case(output: &mut String, case: &CaseResult) -> Result<()> {
        let status = if case.passed { "✓" } else { "✗" };

        writeln!(output, "────────────────────────────────────────────────────────────────")?;
        writeln!(output, "Case: {} {}", case.case_name, status)?;
        writeln!(output, "────────────────────────────────────────────────────────────────")?;
        writeln!(output)?;

        if case.verification.applied {
            writeln!(output, "  Changeset:  ✓ effect verified")?;
        } else {
            writeln!(output, "  Changeset:  ✗ effect not verified")?;
            for reason in &case.verification.reasons {
                writeln!(output, "    • {}", reason)?;
            }
        }

        writeln!(
            output,
            "  Assertions: {} passed, {} failed ({}ms)",
            case.suite.passed, case.suite.failed, case.duration_ms
        )?;

        if let Some(weighted) = case.suite.weighted_score {
            writeln!(
                output,
                "  Scores:     static {:.1}, judge {:.1} (weight {:.2}), weighted {:.1}",
                case.suite.static_test_score.unwrap_or(0.0),
                case.suite.llm_judge_score.unwrap_or(0.0),
                case.suite.llm_judge_weight.unwrap_or(0.0),
                weighted
            )?;
        }

        let failed: Vec<_> = case.suite.results.iter().filter(|r| !r.passed()).collect();
        if !failed.is_empty() {
            writeln!(output)?;
            writeln!(output, "  Failed assertions:")?;
            for result in failed {
                writeln!(
                    output,
                    "    ✗ {}: {}",
                    result.test_name,
                    result.message.as_deref().unwrap_or("(no message)")
                )?;
            }
        }

        writeln!(output)?;
        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
