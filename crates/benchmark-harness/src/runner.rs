//! Benchmark execution orchestration.
//!
//! Two layers:
//!
//! - [`ProtocolRunner`] evaluates one case's assertion list against a
//!   document, isolating every entry: an evaluator error (missing slide or
//!   shape), an unrecognized test kind, or a judge failure becomes a failed
//!   result, and never prevents evaluation of the remaining entries.
//! - [`BenchmarkRunner`] drives a whole run: it fetches each case from a
//!   [`CaseProvider`], verifies the changeset effect, runs the protocol, and
//!   aggregates scores. Cases evaluate concurrently under a semaphore.
//!
//! A case whose fetch fails still appears in the report as a one-entry
//! failed suite; completeness of the report is a hard requirement for
//! benchmark trust.
//!
//! # Example
//!
//! ```no_run
//! use benchmark_harness::{Config, runner::BenchmarkRunner};
//! # use benchmark_harness::runner::CaseProvider;
//!
//! # async fn example(provider: &impl CaseProvider) -> anyhow::Result<()> {
//! let config = Config::from_file("benchmark.toml")?;
//! let runner = BenchmarkRunner::new(config);
//! let results = runner.run(provider).await;
//!
//! for case in &results.case_results {
//!     println!("{}: {}/{} passed", case.case_name, case.suite.passed, case.suite.total_tests);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use shared_types::{
    Changeset, Document, TestResult, TestStatus, TestSuiteResult, VerificationOutcome,
};
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use crate::assertions;
use crate::config::Config;
use crate::judge::SemanticJudge;
use crate::protocol::{ProtocolEntry, Test, TestProtocol};
use crate::score::{self, blend, ScoreSummary};
use crate::verify::ChangesetVerifier;

/// Evaluates one assertion list against one document.
#[derive(Default)]
pub struct ProtocolRunner {
    judge: Option<Box<dyn SemanticJudge>>,
    llm_judge_weight: Option<f64>,
}

impl ProtocolRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a semantic judge for `llm_judge` tests.
    pub fn with_judge(mut self, judge: Box<dyn SemanticJudge>) -> Self {
        self.judge = Some(judge);
        self
    }

    /// Enable the static/judge score blend with the judge's share.
    pub fn with_llm_judge_weight(mut self, weight: f64) -> Self {
        self.llm_judge_weight = Some(weight);
        self
    }

    /// Run every protocol entry against the document.
    ///
    /// Entries evaluate independently; one failure or error never aborts the
    /// batch.
    #[instrument(skip_all, fields(tests = protocol.len()))]
    pub fn run(&self, doc: &Document, protocol: &TestProtocol) -> TestSuiteResult {
        let results: Vec<TestResult> = protocol
            .entries
            .iter()
            .map(|entry| self.run_entry(doc, entry))
            .collect();

        let mut suite = TestSuiteResult::from_results(results);
        debug!(
            total = suite.total_tests,
            passed = suite.passed,
            failed = suite.failed,
            "protocol evaluated"
        );

        if let Some(weight) = self.llm_judge_weight {
            if protocol.has_judge_tests() {
                self.annotate_judge_scores(&mut suite, protocol, weight);
            }
        }
        suite
    }

    fn run_entry(&self, doc: &Document, entry: &ProtocolEntry) -> TestResult {
        let start = Instant::now();
        match entry {
            ProtocolEntry::Test(test) => {
                match assertions::evaluate(doc, test, self.judge.as_deref(), start) {
                    Ok(result) => result,
                    // Missing slide/shape references surface as ordinary
                    // failures under the test's declared name.
                    Err(err) => TestResult {
                        test_name: test.name().to_string(),
                        status: TestStatus::Failed,
                        message: Some(err.to_string()),
                        actual: None,
                        expected: None,
                        execution_time_ms: start.elapsed().as_millis() as u64,
                    },
                }
            }
            ProtocolEntry::Unsupported { name, detail } => TestResult {
                test_name: name.clone(),
                status: TestStatus::Failed,
                message: Some(format!("Unrecognized or malformed test '{name}': {detail}")),
                actual: None,
                expected: None,
                execution_time_ms: start.elapsed().as_millis() as u64,
            },
        }
    }

    /// Split results into static and judge partitions and annotate the suite
    /// with both partial scores plus their blend.
    fn annotate_judge_scores(
        &self,
        suite: &mut TestSuiteResult,
        protocol: &TestProtocol,
        weight: f64,
    ) {
        let mut static_total = 0usize;
        let mut static_passed = 0usize;
        let mut judge_total = 0usize;
        let mut judge_passed = 0usize;

        for (entry, result) in protocol.entries.iter().zip(&suite.results) {
            let is_judge = matches!(entry, ProtocolEntry::Test(Test::LlmJudge(_)));
            if is_judge {
                judge_total += 1;
                judge_passed += usize::from(result.passed());
            } else {
                static_total += 1;
                static_passed += usize::from(result.passed());
            }
        }

        let rate = |passed: usize, total: usize| {
            if total == 0 {
                0.0
            } else {
                passed as f64 / total as f64 * 100.0
            }
        };
        let static_score = rate(static_passed, static_total);
        let judge_score = rate(judge_passed, judge_total);

        suite.static_test_score = Some(static_score);
        suite.llm_judge_score = Some(judge_score);
        suite.llm_judge_weight = Some(weight);
        suite.weighted_score = Some(blend(static_score, judge_score, weight));
    }
}

/// Everything one benchmark case needs: the before/after documents the
/// editing service produced, the changeset the agent submitted, and the
/// case's declared assertion list.
#[derive(Debug, Clone)]
pub struct CaseInput {
    pub original: Document,
    pub updated: Document,
    pub changeset: Changeset,
    pub protocol: TestProtocol,
}

/// External source of benchmark cases (document fetch and changeset
/// application live behind this boundary).
pub trait CaseProvider: Send + Sync {
    /// Names of the cases in this run, in report order.
    fn case_names(&self) -> Vec<String>;

    /// Fetch one case's inputs. An error here is fatal to the single case
    /// only; the runner turns it into a one-entry failed suite.
    fn fetch(&self, name: &str) -> anyhow::Result<CaseInput>;
}

/// Outcome of a single benchmark case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    pub case_name: String,
    pub verification: VerificationOutcome,
    pub suite: TestSuiteResult,
    pub duration_ms: u64,
    pub passed: bool,
}

/// Results from a complete benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResults {
    /// Name of the benchmark suite.
    pub suite_name: String,
    /// Results for each case, in provider order.
    pub case_results: Vec<CaseResult>,
    /// Aggregated scores.
    pub score: ScoreSummary,
    /// Total duration of the run.
    pub total_duration_ms: u64,
    /// Whether every case passed and the score threshold was met.
    pub passed: bool,
    /// Failure summaries, one per problem.
    pub failures: Vec<String>,
    /// Timestamp when the run started.
    pub started_at: String,
}

/// The benchmark runner.
pub struct BenchmarkRunner {
    config: Config,
    protocol_runner: ProtocolRunner,
    verifier: ChangesetVerifier,
}

impl BenchmarkRunner {
    /// Create a runner from a run configuration.
    pub fn new(config: Config) -> Self {
        let verifier = ChangesetVerifier::new()
            .with_scope(config.verification.scope())
            .with_tolerance(config.verification.position_tolerance);
        let mut protocol_runner = ProtocolRunner::new();
        if let Some(weight) = config.benchmark.llm_judge_weight {
            protocol_runner = protocol_runner.with_llm_judge_weight(weight);
        }
        Self {
            config,
            protocol_runner,
            verifier,
        }
    }

    /// Attach a semantic judge for `llm_judge` tests.
    pub fn with_judge(mut self, judge: Box<dyn SemanticJudge>) -> Self {
        self.protocol_runner = self.protocol_runner.with_judge(judge);
        self
    }

    /// Run every case the provider knows about.
    #[instrument(skip(self, provider), fields(suite = %self.config.benchmark.name))]
    pub async fn run<P: CaseProvider>(&self, provider: &P) -> BenchmarkResults {
        let start_time = Instant::now();
        let started_at = chrono::Utc::now().to_rfc3339();
        let names = provider.case_names();

        info!(
            "Starting benchmark suite '{}' with {} cases",
            self.config.benchmark.name,
            names.len()
        );

        let parallel = self.config.benchmark.parallel_cases.max(1) as usize;
        let semaphore = Arc::new(Semaphore::new(parallel));

        let case_futures: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let sem = semaphore.clone();
                async move {
                    let _permit = sem.acquire().await.unwrap();
                    (index, self.run_case(provider, name))
                }
            })
            .collect();

        let mut indexed: Vec<(usize, CaseResult)> = stream::iter(case_futures)
            .buffer_unordered(parallel)
            .collect()
            .await;
        // Completion order is nondeterministic; the report is not.
        indexed.sort_by_key(|(index, _)| *index);
        let case_results: Vec<CaseResult> = indexed.into_iter().map(|(_, r)| r).collect();

        let score = score::aggregate(
            case_results
                .iter()
                .map(|c| (c.case_name.as_str(), &c.suite)),
        );

        let mut failures = Vec::new();
        for case in &case_results {
            if !case.verification.applied {
                let detail = if case.verification.reasons.is_empty() {
                    "no observable effect".to_string()
                } else {
                    case.verification.reasons.join("; ")
                };
                failures.push(format!(
                    "{}: changeset effect not verified ({})",
                    case.case_name, detail
                ));
            }
            if case.suite.failed > 0 {
                failures.push(format!(
                    "{}: {}/{} assertions failed",
                    case.case_name, case.suite.failed, case.suite.total_tests
                ));
            }
        }

        let mut passed = case_results.iter().all(|c| c.passed);
        if let Some(min_score) = self.config.thresholds.min_score {
            if score.total_score < min_score {
                passed = false;
                failures.push(format!(
                    "overall score {:.1} below threshold {:.1}",
                    score.total_score, min_score
                ));
            }
        }

        let results = BenchmarkResults {
            suite_name: self.config.benchmark.name.clone(),
            case_results,
            score,
            total_duration_ms: start_time.elapsed().as_millis() as u64,
            passed,
            failures,
            started_at,
        };

        if results.passed {
            info!(
                "Benchmark suite '{}' completed: score {:.1} in {}ms",
                self.config.benchmark.name, results.score.total_score, results.total_duration_ms
            );
        } else {
            warn!(
                "Benchmark suite '{}' completed with {} failures",
                self.config.benchmark.name,
                results.failures.len()
            );
        }

        results
    }

    /// Evaluate a single case. Never fails; problems become failed suites.
    #[instrument(skip(self, provider), fields(case = %name))]
    fn run_case<P: CaseProvider>(&self, provider: &P, name: &str) -> CaseResult {
        let start = Instant::now();

        match provider.fetch(name) {
            Ok(input) => {
                let verification =
                    self.verifier
                        .verify(&input.original, &input.updated, &input.changeset);
                if !verification.applied {
                    warn!(reasons = ?verification.reasons, "changeset not verifiably applied");
                }

                let suite = self.protocol_runner.run(&input.updated, &input.protocol);
                let passed = verification.applied && suite.failed == 0;

                CaseResult {
                    case_name: name.to_string(),
                    verification,
                    suite,
                    duration_ms: start.elapsed().as_millis() as u64,
                    passed,
                }
            }
            Err(err) => {
                warn!(error = %err, "case could not be loaded");
                CaseResult {
                    case_name: name.to_string(),
                    verification: VerificationOutcome {
                        applied: false,
                        reasons: vec![format!("case could not be evaluated: {err:#}")],
                    },
                    suite: TestSuiteResult::validation_failure(format!("{err:#}")),
                    duration_ms: start.elapsed().as_millis() as u64,
                    passed: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc() -> Document {
        serde_json::from_value(json!({
            "slides": [{
                "id": 1,
                "shapes": [
                    { "id": 1, "shapeType": "textbox", "text": "alpha" },
                    { "id": 2, "shapeType": "textbox", "text": "beta" }
                ]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_runner_isolates_missing_shape() {
        let protocol = TestProtocol::from_json(
            r#"[
                { "name": "equals", "slideId": 1, "shapeId": 1, "key": "text", "expected": "alpha" },
                { "name": "equals", "slideId": 1, "shapeId": 99, "key": "text", "expected": "x" },
                { "name": "equals", "slideId": 1, "shapeId": 2, "key": "text", "expected": "beta" }
            ]"#,
        )
        .unwrap();

        let suite = ProtocolRunner::new().run(&doc(), &protocol);

        assert_eq!(suite.total_tests, 3);
        assert_eq!(suite.passed, 2);
        assert_eq!(suite.failed, 1);
        assert_eq!(suite.results[1].test_name, "equals");
        assert!(suite.results[1]
            .message
            .as_deref()
            .unwrap()
            .contains("Shape with id 99"));
        assert_eq!(suite.results[0].status, TestStatus::Passed);
        assert_eq!(suite.results[2].status, TestStatus::Passed);
    }

    #[test]
    fn test_runner_reports_unknown_test_kind() {
        let protocol = TestProtocol::from_json(
            r#"[
                { "name": "frobnicates", "slideId": 1 },
                { "name": "count_slides", "expected": 1 }
            ]"#,
        )
        .unwrap();

        let suite = ProtocolRunner::new().run(&doc(), &protocol);

        assert_eq!(suite.total_tests, 2);
        assert_eq!(suite.failed, 1);
        assert_eq!(suite.results[0].test_name, "frobnicates");
        assert!(suite.results[0]
            .message
            .as_deref()
            .unwrap()
            .contains("frobnicates"));
        assert_eq!(suite.results[1].status, TestStatus::Passed);
    }

    #[test]
    fn test_empty_protocol_yields_empty_suite() {
        let suite = ProtocolRunner::new().run(&doc(), &TestProtocol::default());
        assert_eq!(suite.total_tests, 0);
        assert_eq!(suite.pass_rate(), 0.0);
    }

    #[test]
    fn test_judge_annotation_requires_judge_tests() {
        let protocol = TestProtocol::from_json(
            r#"[{ "name": "count_slides", "expected": 1 }]"#,
        )
        .unwrap();
        let suite = ProtocolRunner::new()
            .with_llm_judge_weight(0.3)
            .run(&doc(), &protocol);
        assert_eq!(suite.weighted_score, None);
    }

    #[test]
    fn test_judge_annotation_blends_scores() {
        // No judge attached: the llm_judge entry fails, static test passes.
        let protocol = TestProtocol::from_json(
            r#"[
                { "name": "count_slides", "expected": 1 },
                { "name": "llm_judge", "slideId": 1, "question": "q", "expectedAnswer": "a" }
            ]"#,
        )
        .unwrap();
        let suite = ProtocolRunner::new()
            .with_llm_judge_weight(0.25)
            .run(&doc(), &protocol);

        assert_eq!(suite.static_test_score, Some(100.0));
        assert_eq!(suite.llm_judge_score, Some(0.0));
        assert_eq!(suite.llm_judge_weight, Some(0.25));
        assert_eq!(suite.weighted_score, Some(75.0));
    }
}
