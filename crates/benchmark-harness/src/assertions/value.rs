//! Literal equality and numeric ordering assertions on a single property.

use serde_json::Value;
use shared_types::{Document, TestResult};

use crate::assertions::{display, strict_eq, ResultCtx};
use crate::error::EngineError;
use crate::protocol::{NumericCheck, PropertyCheck};
use crate::query::get_shape_property;

/// `equals` / `not equals`.
pub(super) fn eval_equals(
    doc: &Document,
    check: &PropertyCheck,
    negated: bool,
    ctx: ResultCtx<'_>,
) -> Result<TestResult, EngineError> {
    let actual = get_shape_property(doc, check.slide_id, check.shape_id, &check.key)?;
    let matches = actual
        .as_ref()
        .is_some_and(|v| strict_eq(v, &check.expected));
    let pass = if negated { !matches } else { matches };

    if pass {
        Ok(ctx.pass(actual, Some(check.expected.clone())))
    } else {
        let message = if negated {
            format!(
                "Expected {} to differ from {}",
                check.key, check.expected
            )
        } else {
            format!(
                "Expected {} to equal {}, got {}",
                check.key,
                check.expected,
                display(&actual)
            )
        };
        Ok(ctx.fail(message, actual, Some(check.expected.clone())))
    }
}

/// Ordering operator for numeric comparison tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl CompareOp {
    fn holds(self, actual: f64, expected: f64) -> bool {
        match self {
            CompareOp::GreaterThan => actual > expected,
            CompareOp::LessThan => actual < expected,
            CompareOp::GreaterThanOrEqual => actual >= expected,
            CompareOp::LessThanOrEqual => actual <= expected,
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            CompareOp::GreaterThan => "greater than",
            CompareOp::LessThan => "less than",
            CompareOp::GreaterThanOrEqual => "greater than or equal to",
            CompareOp::LessThanOrEqual => "less than or equal to",
        }
    }
}

/// `greater_than` / `less_than` / `greater_than_or_equal` /
/// `less_than_or_equal`.
///
/// A missing or non-numeric actual fails the comparison; no coercion.
pub(super) fn eval_comparison(
    doc: &Document,
    check: &NumericCheck,
    op: CompareOp,
    ctx: ResultCtx<'_>,
) -> Result<TestResult, EngineError> {
    let actual = get_shape_property(doc, check.slide_id, check.shape_id, &check.key)?;
    let pass = actual
        .as_ref()
        .and_then(Value::as_f64)
        .is_some_and(|a| op.holds(a, check.expected));
    let expected = Some(Value::from(check.expected));

    if pass {
        Ok(ctx.pass(actual, expected))
    } else {
        let message = format!(
            "Expected {} ({}) to be {} {}",
            check.key,
            display(&actual),
            op.phrase(),
            check.expected
        );
        Ok(ctx.fail(message, actual, expected))
    }
}
