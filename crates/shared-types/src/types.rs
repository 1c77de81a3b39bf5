use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Slide identifier, unique within a document.
pub type SlideId = u32;
/// Shape identifier, unique within a slide.
pub type ShapeId = u32;

/// Extracted representation of a presentation: an ordered sequence of slides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl Document {
    /// Look up a slide by id.
    pub fn slide(&self, id: SlideId) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }
}

/// A single slide: an id plus an ordered sequence of shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    pub id: SlideId,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl Slide {
    /// Look up a shape on this slide by id.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }
}

/// An addressable visual element on a slide.
///
/// Beyond the id and type tag, a shape carries a type-dependent bag of nested
/// JSON properties (position, size, style, text, connection endpoints, group
/// item references). Shapes are produced by the external presentation service
/// and are read-only inputs to evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: ShapeId,
    pub shape_type: ShapeType,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Shape {
    /// The string value of `autoShapeType`, when present.
    pub fn auto_shape_type(&self) -> Option<&str> {
        self.properties.get("autoShapeType").and_then(Value::as_str)
    }
}

/// Closed set of shape kinds the presentation service extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeType {
    Textbox,
    Image,
    AutoShape,
    Chart,
    Group,
    Line,
    Placeholder,
    Icon,
}

impl ShapeType {
    /// Wire name of the shape kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Textbox => "textbox",
            ShapeType::Image => "image",
            ShapeType::AutoShape => "autoShape",
            ShapeType::Chart => "chart",
            ShapeType::Group => "group",
            ShapeType::Line => "line",
            ShapeType::Placeholder => "placeholder",
            ShapeType::Icon => "icon",
        }
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
