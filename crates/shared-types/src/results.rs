//! Result model shared between the assertion engine and its callers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a single assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestStatus {
    Passed,
    Failed,
}

/// Result of one evaluated assertion. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub test_name: String,
    pub status: TestStatus,
    /// Human-readable expectation/actual summary, populated only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    pub execution_time_ms: u64,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }
}

/// Aggregated outcome of one benchmark case's assertion list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuiteResult {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<TestResult>,
    /// Blend of static and judge scores; present only when a semantic judge
    /// contributed to this suite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_test_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_judge_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_judge_weight: Option<f64>,
}

impl TestSuiteResult {
    /// Aggregate a list of individual results into a suite result.
    pub fn from_results(results: Vec<TestResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed()).count();
        let failed = results.len() - passed;
        Self {
            total_tests: results.len(),
            passed,
            failed,
            results,
            weighted_score: None,
            static_test_score: None,
            llm_judge_score: None,
            llm_judge_weight: None,
        }
    }

    /// One-entry failed suite for a case that could not be evaluated at all
    /// (document fetch or changeset application failed upstream).
    ///
    /// The case still appears in the final report rather than being silently
    /// dropped.
    pub fn validation_failure(message: impl Into<String>) -> Self {
        Self::from_results(vec![TestResult {
            test_name: "validation_error".to_string(),
            status: TestStatus::Failed,
            message: Some(message.into()),
            actual: None,
            expected: None,
            execution_time_ms: 0,
        }])
    }

    /// Pass rate as a percentage; 0 for an empty suite.
    pub fn pass_rate(&self) -> f64 {
        if self.total_tests == 0 {
            0.0
        } else {
            self.passed as f64 / self.total_tests as f64 * 100.0
        }
    }
}

/// Result of reconciling a changeset's claimed intent against an observed
/// before/after document pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub applied: bool,
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl VerificationOutcome {
    /// Outcome for an intent that is fully observable in the diff.
    pub fn clean() -> Self {
        Self {
            applied: true,
            reasons: Vec::new(),
        }
    }
}
