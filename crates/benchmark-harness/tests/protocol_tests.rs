//! End-to-end protocol evaluation: the documented behavior of every test
//! kind, driven through JSON protocols exactly as agents submit them.
//!
//! Run with: cargo test -p benchmark-harness --test protocol_tests

#[path = "common/fixtures.rs"]
mod fixtures;

use fixtures::slide_doc;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{Document, TestStatus};

use benchmark_harness::protocol::TestProtocol;
use benchmark_harness::runner::ProtocolRunner;

fn run_one(doc: &Document, test: serde_json::Value) -> shared_types::TestResult {
    let protocol = TestProtocol::from_values(vec![test]);
    let suite = ProtocolRunner::new().run(doc, &protocol);
    suite.results.into_iter().next().unwrap()
}

fn statuses(doc: &Document, tests: Vec<serde_json::Value>) -> Vec<TestStatus> {
    let protocol = TestProtocol::from_values(tests);
    ProtocolRunner::new()
        .run(doc, &protocol)
        .results
        .iter()
        .map(|r| r.status)
        .collect()
}

fn doc_with_widths(widths: &[f64]) -> Document {
    let shapes: Vec<_> = widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            json!({
                "id": i as u32 + 1,
                "shapeType": "autoShape",
                "size": { "w": w }
            })
        })
        .collect();
    slide_doc(json!(shapes))
}

fn equality_tests(n: usize) -> Vec<serde_json::Value> {
    let objects: Vec<_> = (1..=n as u32)
        .map(|shape_id| json!({ "slideId": 1, "shapeId": shape_id, "key": "size.w" }))
        .collect();
    ["all_are_equal", "some_are_equal", "none_are_equal", "some_are_unequal"]
        .iter()
        .map(|name| json!({ "name": name, "objects": objects }))
        .collect()
}

#[test]
fn count_slides_passes_on_exact_count_and_reports_actual() {
    let doc = slide_doc(json!([]));

    let result = run_one(&doc, json!({ "name": "count_slides", "expected": 1 }));
    assert_eq!(result.status, TestStatus::Passed);

    let result = run_one(&doc, json!({ "name": "count_slides", "expected": 4 }));
    assert_eq!(result.status, TestStatus::Failed);
    assert_eq!(result.actual, Some(json!(1)));
    assert_eq!(result.expected, Some(json!(4)));
}

#[test]
fn equals_and_not_equals_are_exact_negations() {
    let doc = slide_doc(json!([
        { "id": 2, "shapeType": "textbox", "text": "hello", "size": { "w": 10.0 } }
    ]));

    for expected in [json!("hello"), json!("other"), json!(10), json!(null)] {
        let eq = run_one(
            &doc,
            json!({ "name": "equals", "slideId": 1, "shapeId": 2, "key": "text", "expected": expected }),
        );
        let ne = run_one(
            &doc,
            json!({ "name": "not equals", "slideId": 1, "shapeId": 2, "key": "text", "expected": expected }),
        );
        assert_ne!(eq.status, ne.status, "expected={expected}");
    }
}

#[test]
fn equals_resolves_bracket_indexed_coordinates() {
    // Pins the path-resolution strategy: [n] indexes into arrays.
    let doc = slide_doc(json!([
        { "id": 1, "shapeType": "image", "pos": { "topLeft": [10.0, 20.0] } }
    ]));

    let result = run_one(
        &doc,
        json!({ "name": "equals", "slideId": 1, "shapeId": 1, "key": "pos.topLeft[1]", "expected": 20.0 }),
    );
    assert_eq!(result.status, TestStatus::Passed);

    let result = run_one(
        &doc,
        json!({ "name": "equals", "slideId": 1, "shapeId": 1, "key": "pos.topLeft[2]", "expected": 20.0 }),
    );
    assert_eq!(result.status, TestStatus::Failed);
}

#[test]
fn equality_set_truth_table_all_equal() {
    let doc = doc_with_widths(&[5.0, 5.0, 5.0]);
    assert_eq!(
        statuses(&doc, equality_tests(3)),
        vec![
            TestStatus::Passed, // all_are_equal
            TestStatus::Failed, // some_are_equal: all equal is not "some"
            TestStatus::Failed, // none_are_equal
            TestStatus::Failed, // some_are_unequal
        ]
    );
}

#[test]
fn equality_set_truth_table_one_duplicate() {
    let doc = doc_with_widths(&[5.0, 5.0, 7.0]);
    assert_eq!(
        statuses(&doc, equality_tests(3)),
        vec![
            TestStatus::Failed,
            TestStatus::Passed,
            TestStatus::Failed,
            TestStatus::Passed,
        ]
    );
}

#[test]
fn equality_set_truth_table_all_distinct() {
    let doc = doc_with_widths(&[5.0, 7.0, 9.0]);
    assert_eq!(
        statuses(&doc, equality_tests(3)),
        vec![
            TestStatus::Failed,
            TestStatus::Failed,
            TestStatus::Passed,
            TestStatus::Passed,
        ]
    );
}

#[test]
fn runner_isolates_a_bad_reference_in_the_middle() {
    let doc = slide_doc(json!([
        { "id": 1, "shapeType": "textbox", "text": "a" },
        { "id": 3, "shapeType": "textbox", "text": "c" }
    ]));

    let protocol = TestProtocol::from_values(vec![
        json!({ "name": "equals", "slideId": 1, "shapeId": 1, "key": "text", "expected": "a" }),
        json!({ "name": "equals", "slideId": 1, "shapeId": 2, "key": "text", "expected": "b" }),
        json!({ "name": "equals", "slideId": 1, "shapeId": 3, "key": "text", "expected": "c" }),
    ]);
    let suite = ProtocolRunner::new().run(&doc, &protocol);

    assert_eq!(suite.total_tests, 3);
    assert_eq!(suite.passed, 2);
    assert_eq!(suite.failed, 1);
    assert_eq!(suite.results[1].status, TestStatus::Failed);
    assert!(suite.results[1]
        .message
        .as_deref()
        .unwrap()
        .contains("Shape with id 2"));
}

#[test]
fn includes_dispatches_on_runtime_shape() {
    let doc = slide_doc(json!([
        { "id": 1, "shapeType": "textbox", "text": "hello world", "tags": [1, 2, 3] }
    ]));

    let result = run_one(
        &doc,
        json!({ "name": "includes", "slideId": 1, "shapeId": 1, "key": "text", "expected": "world" }),
    );
    assert_eq!(result.status, TestStatus::Passed);

    let result = run_one(
        &doc,
        json!({ "name": "includes", "slideId": 1, "shapeId": 1, "key": "tags", "expected": 4 }),
    );
    assert_eq!(result.status, TestStatus::Failed);

    let result = run_one(
        &doc,
        json!({ "name": "not_includes", "slideId": 1, "shapeId": 1, "key": "tags", "expected": 4 }),
    );
    assert_eq!(result.status, TestStatus::Passed);
}

#[test]
fn count_shapes_honors_type_filter() {
    let doc = slide_doc(json!([
        { "id": 1, "shapeType": "autoShape" },
        { "id": 2, "shapeType": "autoShape" },
        { "id": 3, "shapeType": "textbox" },
        { "id": 4, "shapeType": "textbox" },
        { "id": 5, "shapeType": "textbox" }
    ]));

    let result = run_one(
        &doc,
        json!({
            "name": "count_shapes",
            "slideId": 1,
            "filter": { "shapeType": "autoShape" },
            "expected": 2
        }),
    );
    assert_eq!(result.status, TestStatus::Passed);
    assert_eq!(result.actual, Some(json!(2)));
}

#[test]
fn unknown_test_kind_fails_without_aborting_the_batch() {
    let doc = slide_doc(json!([]));
    let protocol = TestProtocol::from_values(vec![
        json!({ "name": "matches_regex", "pattern": ".*" }),
        json!({ "name": "count_slides", "expected": 1 }),
    ]);
    let suite = ProtocolRunner::new().run(&doc, &protocol);

    assert_eq!(suite.total_tests, 2);
    assert_eq!(suite.results[0].test_name, "matches_regex");
    assert_eq!(suite.results[0].status, TestStatus::Failed);
    assert_eq!(suite.results[1].status, TestStatus::Passed);
}

#[test]
fn custom_error_hook_replaces_generated_message() {
    let doc = slide_doc(json!([]));
    let result = run_one(
        &doc,
        json!({ "name": "count_slides", "expected": 2, "error": "the deck must keep two slides" }),
    );
    assert_eq!(result.status, TestStatus::Failed);
    assert_eq!(
        result.message.as_deref(),
        Some("the deck must keep two slides")
    );
}

#[test]
fn numeric_comparisons_reject_non_numeric_actuals() {
    let doc = slide_doc(json!([
        { "id": 1, "shapeType": "textbox", "text": "wide", "size": { "w": 300.0 } }
    ]));

    let result = run_one(
        &doc,
        json!({ "name": "greater_than", "slideId": 1, "shapeId": 1, "key": "size.w", "expected": 200.0 }),
    );
    assert_eq!(result.status, TestStatus::Passed);

    for key in ["text", "size.missing"] {
        let result = run_one(
            &doc,
            json!({ "name": "less_than", "slideId": 1, "shapeId": 1, "key": key, "expected": 1e9 }),
        );
        assert_eq!(result.status, TestStatus::Failed, "key={key}");
    }
}
