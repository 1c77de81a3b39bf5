//! Dotted property-path resolution over a shape's property bag.
//!
//! A path is a `.`-separated list of segments. Each segment names an object
//! key and may carry trailing `[n]` suffixes that index into arrays, so
//! `pos.topLeft[1]` resolves to the y coordinate of `topLeft`. Resolution
//! short-circuits to `None` as soon as any segment is missing or the current
//! value is not indexable; a missing leaf is an ordinary outcome, not an
//! error.
//!
//! The virtual segments `id` and `shapeType` resolve from the shape header
//! unless the property bag shadows them.
//!
//! # Examples
//!
//! ```
//! use benchmark_harness::path::resolve;
//! use shared_types::Shape;
//! use serde_json::json;
//!
//! let shape: Shape = serde_json::from_value(json!({
//!     "id": 1,
//!     "shapeType": "textbox",
//!     "pos": { "topLeft": [10.0, 20.0] }
//! })).unwrap();
//!
//! assert_eq!(resolve(&shape, "pos.topLeft[1]"), Some(json!(20.0)));
//! assert_eq!(resolve(&shape, "pos.missing"), None);
//! ```

use serde_json::Value;
use shared_types::Shape;

/// Resolve a dotted path against a shape.
///
/// Returns `None` for any path that does not lead to a value.
pub fn resolve(shape: &Shape, path: &str) -> Option<Value> {
    let mut segments = path.split('.');

    let (key, indices) = parse_segment(segments.next()?)?;
    let mut current = match shape.properties.get(key) {
        Some(v) => v.clone(),
        None => match key {
            "id" => Value::from(shape.id),
            "shapeType" => Value::String(shape.shape_type.as_str().to_string()),
            _ => return None,
        },
    };
    current = apply_indices(current, &indices)?;

    for segment in segments {
        let (key, indices) = parse_segment(segment)?;
        current = match current {
            Value::Object(map) => map.get(key)?.clone(),
            _ => return None,
        };
        current = apply_indices(current, &indices)?;
    }

    Some(current)
}

/// Split a segment into its key and any trailing `[n]` index suffixes.
///
/// A segment that is not of the form `key[digits]...` (for example an
/// unterminated bracket or a non-numeric index) resolves to nothing.
fn parse_segment(segment: &str) -> Option<(&str, Vec<usize>)> {
    let Some(bracket) = segment.find('[') else {
        if segment.is_empty() {
            return None;
        }
        return Some((segment, Vec::new()));
    };

    let key = &segment[..bracket];
    if key.is_empty() {
        return None;
    }

    let mut indices = Vec::new();
    let mut rest = &segment[bracket..];
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        indices.push(inner[..close].parse().ok()?);
        rest = &inner[close + 1..];
    }

    Some((key, indices))
}

fn apply_indices(mut current: Value, indices: &[usize]) -> Option<Value> {
    for &idx in indices {
        current = match current {
            Value::Array(items) => items.get(idx)?.clone(),
            _ => return None,
        };
    }
    Some(current)
}
