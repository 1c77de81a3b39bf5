pub mod changeset;
pub mod results;
pub mod types;

pub use changeset::{
    AddedShape, AutoShapeInit, Changeset, ChartInit, DeletedShape, GroupInit, IconInit,
    ImageInit, LineInit, PlaceholderInit, PosPatch, ShapeInit, ShapePatch, SizePatch,
    TextboxInit,
};
pub use results::{TestResult, TestStatus, TestSuiteResult, VerificationOutcome};
pub use types::{Document, Shape, ShapeId, ShapeType, Slide, SlideId};
