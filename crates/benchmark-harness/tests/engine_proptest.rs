//! Property-based tests for the evaluation core.
//!
//! Run with: cargo test -p benchmark-harness --test engine_proptest

#[path = "common/fixtures.rs"]
mod fixtures;

use fixtures::slide_doc;
use proptest::prelude::*;
use serde_json::json;
use shared_types::{Document, TestStatus, TestSuiteResult};

use benchmark_harness::path::resolve;
use benchmark_harness::protocol::TestProtocol;
use benchmark_harness::runner::ProtocolRunner;
use benchmark_harness::score::{aggregate, blend};

fn doc_with_values(values: &[i64]) -> Document {
    let shapes: Vec<_> = values
        .iter()
        .enumerate()
        .map(|(i, v)| json!({ "id": i as u32 + 1, "shapeType": "autoShape", "size": { "w": v } }))
        .collect();
    slide_doc(json!(shapes))
}

fn equality_status(doc: &Document, name: &str, n: usize) -> TestStatus {
    let objects: Vec<_> = (1..=n as u32)
        .map(|shape_id| json!({ "slideId": 1, "shapeId": shape_id, "key": "size.w" }))
        .collect();
    let protocol = TestProtocol::from_values(vec![json!({ "name": name, "objects": objects })]);
    ProtocolRunner::new().run(doc, &protocol).results[0].status
}

fn suite_with(passed: usize, failed: usize) -> TestSuiteResult {
    let results = (0..passed + failed)
        .map(|i| shared_types::TestResult {
            test_name: format!("t{i}"),
            status: if i < passed {
                TestStatus::Passed
            } else {
                TestStatus::Failed
            },
            message: None,
            actual: None,
            expected: None,
            execution_time_ms: 0,
        })
        .collect();
    TestSuiteResult::from_results(results)
}

proptest! {
    /// The four equality-set kinds always agree with the set-theoretic
    /// model of the resolved values.
    #[test]
    fn equality_kinds_match_model(values in prop::collection::vec(0i64..4, 2..6)) {
        let doc = doc_with_values(&values);
        let n = values.len();

        let all_equal = values.iter().all(|v| *v == values[0]);
        let any_pair = (0..n).any(|i| ((i + 1)..n).any(|j| values[i] == values[j]));

        let expect = |pass: bool| if pass { TestStatus::Passed } else { TestStatus::Failed };

        prop_assert_eq!(equality_status(&doc, "all_are_equal", n), expect(all_equal));
        prop_assert_eq!(
            equality_status(&doc, "some_are_equal", n),
            expect(any_pair && !all_equal)
        );
        prop_assert_eq!(equality_status(&doc, "none_are_equal", n), expect(!any_pair));
        prop_assert_eq!(
            equality_status(&doc, "some_are_unequal", n),
            expect(!all_equal)
        );
    }

    /// equals / not-equals are exact logical negations on any integer input.
    #[test]
    fn equals_negation_is_exact(actual in -100i64..100, expected in -100i64..100) {
        let doc = slide_doc(json!([
            { "id": 1, "shapeType": "textbox", "size": { "w": actual } }
        ]));
        let protocol = TestProtocol::from_values(vec![
            json!({ "name": "equals", "slideId": 1, "shapeId": 1, "key": "size.w", "expected": expected }),
            json!({ "name": "not equals", "slideId": 1, "shapeId": 1, "key": "size.w", "expected": expected }),
        ]);
        let suite = ProtocolRunner::new().run(&doc, &protocol);
        prop_assert_ne!(suite.results[0].status, suite.results[1].status);
        prop_assert_eq!(
            suite.results[0].status == TestStatus::Passed,
            actual == expected
        );
    }

    /// The aggregate score is the exact pass ratio, bounded to [0, 100].
    #[test]
    fn aggregate_score_is_bounded_pass_ratio(
        counts in prop::collection::vec((0usize..10, 0usize..10), 0..8)
    ) {
        let suites: Vec<(String, TestSuiteResult)> = counts
            .iter()
            .enumerate()
            .map(|(i, (p, f))| (format!("case-{i}"), suite_with(*p, *f)))
            .collect();
        let summary = aggregate(suites.iter().map(|(n, s)| (n.as_str(), s)));

        prop_assert!((0.0..=100.0).contains(&summary.total_score));

        let total: usize = counts.iter().map(|(p, f)| p + f).sum();
        let passed: usize = counts.iter().map(|(p, _)| *p).sum();
        if total == 0 {
            prop_assert_eq!(summary.total_score, 0.0);
        } else {
            let expected = passed as f64 / total as f64 * 100.0;
            prop_assert!((summary.total_score - expected).abs() < 1e-9);
        }
        prop_assert_eq!(summary.per_case.len(), counts.len());
    }

    /// A blend never leaves the interval spanned by its two inputs.
    #[test]
    fn blend_stays_between_inputs(
        static_score in 0.0f64..=100.0,
        judge_score in 0.0f64..=100.0,
        weight in 0.0f64..=1.0
    ) {
        let blended = blend(static_score, judge_score, weight);
        let lo = static_score.min(judge_score);
        let hi = static_score.max(judge_score);
        prop_assert!(blended >= lo - 1e-9 && blended <= hi + 1e-9);
    }

    /// Bracket indexing resolves exactly the addressed element, and nothing
    /// out of bounds.
    #[test]
    fn bracket_index_resolves_addressed_element(
        items in prop::collection::vec(-1000i64..1000, 1..8),
        idx in 0usize..10
    ) {
        let doc = slide_doc(json!([
            { "id": 1, "shapeType": "chart", "series": items }
        ]));
        let shape = &doc.slides[0].shapes[0];
        let resolved = resolve(shape, &format!("series[{idx}]"));

        if idx < items.len() {
            prop_assert_eq!(resolved, Some(json!(items[idx])));
        } else {
            prop_assert_eq!(resolved, None);
        }
    }
}
