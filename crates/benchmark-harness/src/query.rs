//! Slide and shape lookup with optional type filtering.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{Document, Shape, ShapeId, ShapeType, Slide, SlideId};

use crate::error::EngineError;
use crate::path;

/// Filter applied when counting or collecting shapes on a slide.
///
/// Both criteria are ANDed when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<ShapeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_shape_type: Option<String>,
}

impl ShapeFilter {
    fn matches(&self, shape: &Shape) -> bool {
        if let Some(wanted) = self.shape_type {
            if shape.shape_type != wanted {
                return false;
            }
        }
        if let Some(wanted) = self.auto_shape_type.as_deref() {
            if shape.auto_shape_type() != Some(wanted) {
                return false;
            }
        }
        true
    }
}

/// Find a slide by id.
pub fn find_slide(doc: &Document, slide_id: SlideId) -> Result<&Slide, EngineError> {
    doc.slide(slide_id)
        .ok_or(EngineError::SlideNotFound(slide_id))
}

/// Find a shape on a slide by id.
pub fn find_shape(slide: &Slide, shape_id: ShapeId) -> Result<&Shape, EngineError> {
    slide.shape(shape_id).ok_or(EngineError::ShapeNotFound {
        slide_id: slide.id,
        shape_id,
    })
}

/// All shapes on a slide, optionally narrowed by a filter.
///
/// Order is preserved from the slide's shape sequence.
pub fn find_shapes_for_slide<'a>(
    doc: &'a Document,
    slide_id: SlideId,
    filter: Option<&ShapeFilter>,
) -> Result<Vec<&'a Shape>, EngineError> {
    let slide = find_slide(doc, slide_id)?;
    Ok(slide
        .shapes
        .iter()
        .filter(|shape| filter.map_or(true, |f| f.matches(shape)))
        .collect())
}

/// Resolve a property path on a specific shape.
///
/// Slide/shape lookup is the only fallible part; a path that leads nowhere
/// yields `Ok(None)`.
pub fn get_shape_property(
    doc: &Document,
    slide_id: SlideId,
    shape_id: ShapeId,
    key: &str,
) -> Result<Option<Value>, EngineError> {
    let slide = find_slide(doc, slide_id)?;
    let shape = find_shape(slide, shape_id)?;
    Ok(path::resolve(shape, key))
}
