//! Assertion evaluators, one per test kind.
//!
//! Every evaluator is a pure function of `(document, test, start time)`
//! producing a [`TestResult`]. Anticipated data shapes never cause an error;
//! the only fallible part is the slide/shape lookup, whose [`EngineError`]
//! propagates to the runner and is converted into a failed result there.
//!
//! # Equality semantics
//!
//! Comparison follows strict-equality rules: numbers compare by numeric
//! value, other primitives by value, and composite values (objects, arrays)
//! never equal a literal from the protocol. Inside equality-set tests, two
//! composite values are equal only when they resolve from the identical
//! (slide, shape, key) address. A missing property equals another missing
//! property there, and nothing else.

pub mod count;
pub mod equality;
pub mod membership;
pub mod value;

use std::time::Instant;

use serde_json::Value;
use shared_types::{Document, TestResult, TestStatus};

use crate::error::EngineError;
use crate::judge::{self, SemanticJudge};
use crate::protocol::Test;

pub use value::CompareOp;

/// Evaluate a single test against a document.
///
/// `judge` is consulted only for `llm_judge` tests; passing `None` makes
/// those fail gracefully.
pub fn evaluate(
    doc: &Document,
    test: &Test,
    judge: Option<&dyn SemanticJudge>,
    start: Instant,
) -> Result<TestResult, EngineError> {
    let ctx = ResultCtx::for_test(test, start);
    match test {
        Test::Equals(c) => value::eval_equals(doc, c, false, ctx),
        Test::NotEquals(c) => value::eval_equals(doc, c, true, ctx),
        Test::GreaterThan(c) => value::eval_comparison(doc, c, CompareOp::GreaterThan, ctx),
        Test::LessThan(c) => value::eval_comparison(doc, c, CompareOp::LessThan, ctx),
        Test::GreaterThanOrEqual(c) => {
            value::eval_comparison(doc, c, CompareOp::GreaterThanOrEqual, ctx)
        }
        Test::LessThanOrEqual(c) => {
            value::eval_comparison(doc, c, CompareOp::LessThanOrEqual, ctx)
        }
        Test::AllAreEqual(c) => equality::eval_equality(doc, c, equality::EqualityMode::All, ctx),
        Test::SomeAreEqual(c) => {
            equality::eval_equality(doc, c, equality::EqualityMode::SomeButNotAll, ctx)
        }
        Test::NoneAreEqual(c) => {
            equality::eval_equality(doc, c, equality::EqualityMode::None, ctx)
        }
        Test::SomeAreUnequal(c) => {
            equality::eval_equality(doc, c, equality::EqualityMode::SomeUnequal, ctx)
        }
        Test::Includes(c) => membership::eval_includes(doc, c, false, ctx),
        Test::NotIncludes(c) => membership::eval_includes(doc, c, true, ctx),
        Test::CountSlides(c) => count::eval_count_slides(doc, c, ctx),
        Test::CountShapes(c) => count::eval_count_shapes(doc, c, ctx),
        Test::LlmJudge(c) => judge::eval_llm_judge(doc, c, judge, ctx),
    }
}

/// Strict value equality over resolved JSON values.
///
/// Numbers compare as f64 regardless of integer/float wire form; composite
/// values never equal anything through this function.
pub(crate) fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
        (Value::Object(_), _)
        | (_, Value::Object(_))
        | (Value::Array(_), _)
        | (_, Value::Array(_)) => false,
        _ => a == b,
    }
}

/// Render a resolved value for failure messages; missing values print as
/// `undefined` to match the protocol's vocabulary.
pub(crate) fn display(value: &Option<Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}

/// Shared result construction for evaluators: carries the computed test
/// label, the custom error hook, and the start instant.
pub(crate) struct ResultCtx<'a> {
    label: String,
    custom_error: Option<&'a str>,
    start: Instant,
}

impl<'a> ResultCtx<'a> {
    pub(crate) fn for_test(test: &'a Test, start: Instant) -> Self {
        Self {
            label: test.label(),
            custom_error: test.custom_error(),
            start,
        }
    }

    #[cfg(test)]
    pub(crate) fn bare(label: &str, start: Instant) -> Self {
        Self {
            label: label.to_string(),
            custom_error: None,
            start,
        }
    }

    pub(crate) fn pass(self, actual: Option<Value>, expected: Option<Value>) -> TestResult {
        TestResult {
            test_name: self.label,
            status: TestStatus::Passed,
            message: None,
            actual,
            expected,
            execution_time_ms: self.start.elapsed().as_millis() as u64,
        }
    }

    /// Build a failed result; the test's custom error hook, when declared,
    /// replaces the generated message.
    pub(crate) fn fail(
        self,
        message: String,
        actual: Option<Value>,
        expected: Option<Value>,
    ) -> TestResult {
        TestResult {
            test_name: self.label,
            status: TestStatus::Failed,
            message: Some(
                self.custom_error
                    .map(str::to_string)
                    .unwrap_or(message),
            ),
            actual,
            expected,
            execution_time_ms: self.start.elapsed().as_millis() as u64,
        }
    }
}
