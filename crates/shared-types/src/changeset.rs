//! Changeset model: a structured description of the edits an agent intends
//! to make to a slide.
//!
//! A changeset is *intent*, not an applied mutation. It is produced by an
//! agent and handed to the external editing service; the verifier later
//! reconciles it against the observed before/after document pair.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::ShapeId;

/// Intended additions, modifications, and deletions for one slide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Changeset {
    #[serde(default)]
    pub added: Vec<AddedShape>,
    #[serde(default)]
    pub modified: Vec<ShapePatch>,
    #[serde(default)]
    pub deleted: Vec<DeletedShape>,
}

impl Changeset {
    /// True when the changeset carries no intent at all.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }
}

/// Fields common to every kind of added shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeInit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ShapeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<PosPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizePatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

/// A shape the agent intends to create, tagged by kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shapeType", rename_all = "camelCase")]
pub enum AddedShape {
    Textbox(TextboxInit),
    Image(ImageInit),
    AutoShape(AutoShapeInit),
    Chart(ChartInit),
    Group(GroupInit),
    Line(LineInit),
    Placeholder(PlaceholderInit),
    Icon(IconInit),
}

impl AddedShape {
    /// The common init fields, regardless of kind.
    pub fn init(&self) -> &ShapeInit {
        match self {
            AddedShape::Textbox(s) => &s.base,
            AddedShape::Image(s) => &s.base,
            AddedShape::AutoShape(s) => &s.base,
            AddedShape::Chart(s) => &s.base,
            AddedShape::Group(s) => &s.base,
            AddedShape::Line(s) => &s.base,
            AddedShape::Placeholder(s) => &s.base,
            AddedShape::Icon(s) => &s.base,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextboxInit {
    #[serde(flatten)]
    pub base: ShapeInit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageInit {
    #[serde(flatten)]
    pub base: ShapeInit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoShapeInit {
    #[serde(flatten)]
    pub base: ShapeInit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_shape_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartInit {
    #[serde(flatten)]
    pub base: ShapeInit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
}

/// Group creation references already-existing child shapes by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupInit {
    #[serde(flatten)]
    pub base: ShapeInit,
    #[serde(default)]
    pub items: Vec<ShapeId>,
}

/// Line endpoints are absolute slide coordinates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineInit {
    #[serde(flatten)]
    pub base: ShapeInit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceholderInit {
    #[serde(flatten)]
    pub base: ShapeInit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IconInit {
    #[serde(flatten)]
    pub base: ShapeInit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A patch to an existing shape, addressed by id.
///
/// Fields the verifier knows how to check (pos, size, zIndex) are typed;
/// anything else the agent patches passes through in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapePatch {
    pub id: ShapeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<PosPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizePatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Requested position, any subset of the three anchor points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_left: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_right: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
}

/// Requested size, either dimension optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
}

/// A shape the agent intends to remove.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeletedShape {
    pub id: ShapeId,
}
