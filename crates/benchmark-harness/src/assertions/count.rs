//! Cardinality assertions: `count_slides` / `count_shapes`.

use serde_json::Value;
use shared_types::{Document, TestResult};

use crate::assertions::ResultCtx;
use crate::error::EngineError;
use crate::protocol::{ShapeCount, SlideCount};
use crate::query::find_shapes_for_slide;

/// `count_slides`.
pub(super) fn eval_count_slides(
    doc: &Document,
    check: &SlideCount,
    ctx: ResultCtx<'_>,
) -> Result<TestResult, EngineError> {
    let actual = doc.slides.len();
    finish_count(actual, check.expected, "slides", ctx)
}

/// `count_shapes`, honoring the optional shape filter.
pub(super) fn eval_count_shapes(
    doc: &Document,
    check: &ShapeCount,
    ctx: ResultCtx<'_>,
) -> Result<TestResult, EngineError> {
    let actual = find_shapes_for_slide(doc, check.slide_id, check.filter.as_ref())?.len();
    finish_count(actual, check.expected, "matching shapes", ctx)
}

fn finish_count(
    actual: usize,
    expected: usize,
    noun: &str,
    ctx: ResultCtx<'_>,
) -> Result<TestResult, EngineError> {
    let actual_value = Some(Value::from(actual));
    let expected_value = Some(Value::from(expected));
    if actual == expected {
        Ok(ctx.pass(actual_value, expected_value))
    } else {
        let message = format!("Expected {} {}, found {}", expected, noun, actual);
        Ok(ctx.fail(message, actual_value, expected_value))
    }
}
