//! Equality-set assertions over several properties at once.
//!
//! Values resolved from different addresses are compared with strict
//! equality. Composite values (objects, arrays) carry reference semantics:
//! two of them are equal only when they resolve from the identical
//! (slide, shape, key) address, so structurally identical `pos` objects on
//! different shapes count as distinct. Known limitation for non-primitive
//! properties; switching to deep equality would change pass/fail outcomes.

use serde_json::Value;
use shared_types::{Document, TestResult};

use crate::assertions::{strict_eq, ResultCtx};
use crate::error::EngineError;
use crate::protocol::{EqualitySet, PropertyRef};
use crate::query::get_shape_property;

/// Which equality relationship the set must exhibit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualityMode {
    /// Every pair equal.
    All,
    /// At least one equal pair, but not all equal.
    SomeButNotAll,
    /// No equal pair at all.
    None,
    /// At least one unequal pair.
    SomeUnequal,
}

struct Resolved<'a> {
    source: &'a PropertyRef,
    value: Option<Value>,
}

fn resolve_all<'a>(
    doc: &Document,
    refs: &'a [PropertyRef],
) -> Result<Vec<Resolved<'a>>, EngineError> {
    refs.iter()
        .map(|source| {
            Ok(Resolved {
                source,
                value: get_shape_property(doc, source.slide_id, source.shape_id, &source.key)?,
            })
        })
        .collect()
}

fn values_equal(a: &Resolved<'_>, b: &Resolved<'_>) -> bool {
    match (&a.value, &b.value) {
        (None, None) => true,
        (Some(x), Some(y)) => {
            let composite_x = matches!(x, Value::Object(_) | Value::Array(_));
            let composite_y = matches!(y, Value::Object(_) | Value::Array(_));
            if composite_x || composite_y {
                composite_x && composite_y && a.source == b.source
            } else {
                strict_eq(x, y)
            }
        }
        _ => false,
    }
}

/// `all_are_equal` / `some_are_equal` / `none_are_equal` /
/// `some_are_unequal`.
///
/// `some_are_equal` is "some but not all": a set where every value matches
/// fails it.
pub(super) fn eval_equality(
    doc: &Document,
    set: &EqualitySet,
    mode: EqualityMode,
    ctx: ResultCtx<'_>,
) -> Result<TestResult, EngineError> {
    let resolved = resolve_all(doc, &set.objects)?;

    let mut all_equal = true;
    let mut any_equal_pair = false;
    for i in 0..resolved.len() {
        for j in (i + 1)..resolved.len() {
            if values_equal(&resolved[i], &resolved[j]) {
                any_equal_pair = true;
            } else {
                all_equal = false;
            }
        }
    }

    let pass = match mode {
        EqualityMode::All => all_equal,
        EqualityMode::SomeButNotAll => any_equal_pair && !all_equal,
        EqualityMode::None => !any_equal_pair,
        EqualityMode::SomeUnequal => !all_equal,
    };

    // Aggregate tests report the full resolved set as `actual`.
    let values = Value::Array(
        resolved
            .iter()
            .map(|r| r.value.clone().unwrap_or(Value::Null))
            .collect(),
    );

    if pass {
        Ok(ctx.pass(Some(values), None))
    } else {
        let expectation = match mode {
            EqualityMode::All => "Expected all values to be equal",
            EqualityMode::SomeButNotAll => "Expected some, but not all, values to be equal",
            EqualityMode::None => "Expected no two values to be equal",
            EqualityMode::SomeUnequal => "Expected at least one unequal value",
        };
        let message = format!("{}, got {}", expectation, values);
        Ok(ctx.fail(message, Some(values), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use shared_types::TestStatus;
    use std::time::Instant;

    fn doc_with_widths(widths: &[f64]) -> Document {
        let shapes: Vec<_> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                json!({
                    "id": i as u32 + 1,
                    "shapeType": "textbox",
                    "size": { "w": w },
                    "pos": { "topLeft": [0.0, 0.0] }
                })
            })
            .collect();
        serde_json::from_value(json!({ "slides": [{ "id": 1, "shapes": shapes }] })).unwrap()
    }

    fn refs(n: usize, key: &str) -> EqualitySet {
        EqualitySet {
            objects: (1..=n as u32)
                .map(|shape_id| PropertyRef {
                    slide_id: 1,
                    shape_id,
                    key: key.to_string(),
                })
                .collect(),
            error: None,
        }
    }

    fn run(widths: &[f64], mode: EqualityMode) -> TestStatus {
        let doc = doc_with_widths(widths);
        let ctx = ResultCtx::bare("test", Instant::now());
        eval_equality(&doc, &refs(widths.len(), "size.w"), mode, ctx)
            .unwrap()
            .status
    }

    #[test]
    fn test_truth_table_all_equal() {
        let values = [5.0, 5.0, 5.0];
        assert_eq!(run(&values, EqualityMode::All), TestStatus::Passed);
        assert_eq!(run(&values, EqualityMode::SomeButNotAll), TestStatus::Failed);
        assert_eq!(run(&values, EqualityMode::None), TestStatus::Failed);
        assert_eq!(run(&values, EqualityMode::SomeUnequal), TestStatus::Failed);
    }

    #[test]
    fn test_truth_table_one_duplicate() {
        let values = [5.0, 5.0, 7.0];
        assert_eq!(run(&values, EqualityMode::All), TestStatus::Failed);
        assert_eq!(run(&values, EqualityMode::SomeButNotAll), TestStatus::Passed);
        assert_eq!(run(&values, EqualityMode::None), TestStatus::Failed);
        assert_eq!(run(&values, EqualityMode::SomeUnequal), TestStatus::Passed);
    }

    #[test]
    fn test_truth_table_all_distinct() {
        let values = [5.0, 7.0, 9.0];
        assert_eq!(run(&values, EqualityMode::All), TestStatus::Failed);
        assert_eq!(run(&values, EqualityMode::SomeButNotAll), TestStatus::Failed);
        assert_eq!(run(&values, EqualityMode::None), TestStatus::Passed);
        assert_eq!(run(&values, EqualityMode::SomeUnequal), TestStatus::Passed);
    }

    #[test]
    fn test_composite_values_are_distinct_across_shapes() {
        // Structurally identical pos objects on different shapes.
        let doc = doc_with_widths(&[5.0, 5.0]);
        let ctx = ResultCtx::bare("test", Instant::now());
        let result = eval_equality(
            &doc,
            &refs(2, "pos"),
            EqualityMode::None,
            ctx,
        )
        .unwrap();
        assert_eq!(result.status, TestStatus::Passed);
    }

    #[test]
    fn test_composite_value_equal_to_itself_by_address() {
        let doc = doc_with_widths(&[5.0]);
        let set = EqualitySet {
            objects: vec![
                PropertyRef { slide_id: 1, shape_id: 1, key: "pos".to_string() },
                PropertyRef { slide_id: 1, shape_id: 1, key: "pos".to_string() },
            ],
            error: None,
        };
        let ctx = ResultCtx::bare("test", Instant::now());
        let result = eval_equality(&doc, &set, EqualityMode::All, ctx).unwrap();
        assert_eq!(result.status, TestStatus::Passed);
    }

    #[test]
    fn test_missing_properties_are_mutually_equal() {
        let doc = doc_with_widths(&[5.0, 7.0]);
        let ctx = ResultCtx::bare("test", Instant::now());
        let result = eval_equality(&doc, &refs(2, "style.fill"), EqualityMode::All, ctx).unwrap();
        assert_eq!(result.status, TestStatus::Passed);
    }

    #[test]
    fn test_aggregate_actual_reports_resolved_values() {
        let doc = doc_with_widths(&[5.0, 7.0]);
        let ctx = ResultCtx::bare("test", Instant::now());
        let result = eval_equality(&doc, &refs(2, "size.w"), EqualityMode::All, ctx).unwrap();
        assert_eq!(result.actual, Some(json!([5.0, 7.0])));
        assert_eq!(result.expected, None);
    }

    #[test]
    fn test_missing_shape_propagates() {
        let doc = doc_with_widths(&[5.0]);
        let ctx = ResultCtx::bare("test", Instant::now());
        let err = eval_equality(&doc, &refs(3, "size.w"), EqualityMode::All, ctx).unwrap_err();
        assert_eq!(
            err,
            EngineError::ShapeNotFound {
                slide_id: 1,
                shape_id: 2
            }
        );
    }
}
