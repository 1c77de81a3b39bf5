//! Membership assertions: `includes` / `not_includes`.
//!
//! Dispatch is a three-way branch on the resolved value's runtime shape
//! (array, string, object) rather than on test metadata; this is inherent
//! to the heterogeneous property model.

use serde_json::Value;
use shared_types::{Document, TestResult};

use crate::assertions::{display, strict_eq, ResultCtx};
use crate::error::EngineError;
use crate::protocol::PropertyCheck;
use crate::query::get_shape_property;

fn value_includes(actual: &Value, expected: &Value) -> bool {
    match actual {
        Value::Array(items) => items.iter().any(|item| strict_eq(item, expected)),
        Value::String(s) => primitive_string(expected).is_some_and(|needle| s.contains(&needle)),
        Value::Object(map) => primitive_string(expected).is_some_and(|key| map.contains_key(&key)),
        _ => false,
    }
}

/// Canonical string form of a primitive expected value. Numbers and bools
/// coerce the way the protocol's producers expect; composites never match.
fn primitive_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `includes` / `not_includes`.
pub(super) fn eval_includes(
    doc: &Document,
    check: &PropertyCheck,
    negated: bool,
    ctx: ResultCtx<'_>,
) -> Result<TestResult, EngineError> {
    let actual = get_shape_property(doc, check.slide_id, check.shape_id, &check.key)?;
    let contains = actual
        .as_ref()
        .is_some_and(|v| value_includes(v, &check.expected));
    let pass = if negated { !contains } else { contains };

    if pass {
        Ok(ctx.pass(actual, Some(check.expected.clone())))
    } else {
        let message = if negated {
            format!(
                "Expected {} ({}) to not include {}",
                check.key,
                display(&actual),
                check.expected
            )
        } else {
            format!(
                "Expected {} ({}) to include {}",
                check.key,
                display(&actual),
                check.expected
            )
        };
        Ok(ctx.fail(message, actual, Some(check.expected.clone())))
    }
}
