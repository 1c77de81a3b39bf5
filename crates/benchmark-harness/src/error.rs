//! Engine error taxonomy.
//!
//! Only lookups of declared slide/shape ids can fail inside an evaluator;
//! the protocol runner converts these into failed test results so one bad
//! reference never aborts a batch.

use shared_types::{ShapeId, SlideId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Slide with id {0} not found")]
    SlideNotFound(SlideId),

    #[error("Shape with id {shape_id} not found on slide {slide_id}")]
    ShapeNotFound {
        slide_id: SlideId,
        shape_id: ShapeId,
    },
}
