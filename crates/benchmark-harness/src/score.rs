//! Score aggregation across benchmark cases.
//!
//! A pure fold over an explicit list of suite results; no shared counters.
//! The overall score is the raw pass rate across every assertion in every
//! case. Suites that carry a judge-weight annotation additionally surface a
//! weighted blend that is surfaced next to the raw score, never in place
//! of it.

use serde::{Deserialize, Serialize};
use shared_types::TestSuiteResult;

/// Aggregated scores for one benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    /// Overall pass rate in percent; 0 when no tests ran.
    pub total_score: f64,
    pub total_tests: usize,
    pub total_passed: usize,
    pub total_failed: usize,
    pub per_case: Vec<CaseScore>,
}

/// Per-case entry in the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseScore {
    pub name: String,
    pub score: f64,
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_score: Option<f64>,
}

/// Blend a static score with a judge score.
///
/// `weight` is the judge's share of the blend.
pub fn blend(static_score: f64, llm_judge_score: f64, weight: f64) -> f64 {
    static_score * (1.0 - weight) + llm_judge_score * weight
}

/// Fold named suite results into a score summary.
pub fn aggregate<'a, I>(suites: I) -> ScoreSummary
where
    I: IntoIterator<Item = (&'a str, &'a TestSuiteResult)>,
{
    let mut total_tests = 0;
    let mut total_passed = 0;
    let mut total_failed = 0;
    let mut per_case = Vec::new();

    for (name, suite) in suites {
        total_tests += suite.total_tests;
        total_passed += suite.passed;
        total_failed += suite.failed;

        let weighted_score = match (
            suite.static_test_score,
            suite.llm_judge_score,
            suite.llm_judge_weight,
        ) {
            (Some(static_score), Some(judge_score), Some(weight)) => {
                Some(blend(static_score, judge_score, weight))
            }
            _ => suite.weighted_score,
        };

        per_case.push(CaseScore {
            name: name.to_string(),
            score: suite.pass_rate(),
            total_tests: suite.total_tests,
            passed: suite.passed,
            failed: suite.failed,
            weighted_score,
        });
    }

    let total_score = if total_tests == 0 {
        0.0
    } else {
        total_passed as f64 / total_tests as f64 * 100.0
    };

    ScoreSummary {
        total_score,
        total_tests,
        total_passed,
        total_failed,
        per_case,
    }
}
