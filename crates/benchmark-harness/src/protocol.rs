//! Declarative test protocol: the assertion list a benchmark case declares
//! against the post-edit document.
//!
//! The wire format is a JSON array of objects discriminated by `name`. The
//! `Test` enum is closed, so the runner's dispatch is exhaustive; entries
//! with an unrecognized `name` (or fields that do not parse) are retained as
//! [`ProtocolEntry::Unsupported`] and degrade to failed results at run time
//! instead of aborting the batch.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{ShapeId, SlideId};

use crate::query::ShapeFilter;

/// One declarative assertion, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum Test {
    #[serde(rename = "equals")]
    Equals(PropertyCheck),
    #[serde(rename = "not equals")]
    NotEquals(PropertyCheck),
    #[serde(rename = "greater_than")]
    GreaterThan(NumericCheck),
    #[serde(rename = "less_than")]
    LessThan(NumericCheck),
    #[serde(rename = "greater_than_or_equal")]
    GreaterThanOrEqual(NumericCheck),
    #[serde(rename = "less_than_or_equal")]
    LessThanOrEqual(NumericCheck),
    #[serde(rename = "all_are_equal")]
    AllAreEqual(EqualitySet),
    #[serde(rename = "some_are_equal")]
    SomeAreEqual(EqualitySet),
    #[serde(rename = "none_are_equal")]
    NoneAreEqual(EqualitySet),
    #[serde(rename = "some_are_unequal")]
    SomeAreUnequal(EqualitySet),
    #[serde(rename = "includes")]
    Includes(PropertyCheck),
    #[serde(rename = "not_includes")]
    NotIncludes(PropertyCheck),
    #[serde(rename = "count_slides")]
    CountSlides(SlideCount),
    #[serde(rename = "count_shapes")]
    CountShapes(ShapeCount),
    #[serde(rename = "llm_judge")]
    LlmJudge(JudgeCheck),
}

impl Test {
    /// The wire discriminant of this test kind.
    pub fn name(&self) -> &'static str {
        match self {
            Test::Equals(_) => "equals",
            Test::NotEquals(_) => "not equals",
            Test::GreaterThan(_) => "greater_than",
            Test::LessThan(_) => "less_than",
            Test::GreaterThanOrEqual(_) => "greater_than_or_equal",
            Test::LessThanOrEqual(_) => "less_than_or_equal",
            Test::AllAreEqual(_) => "all_are_equal",
            Test::SomeAreEqual(_) => "some_are_equal",
            Test::NoneAreEqual(_) => "none_are_equal",
            Test::SomeAreUnequal(_) => "some_are_unequal",
            Test::Includes(_) => "includes",
            Test::NotIncludes(_) => "not_includes",
            Test::CountSlides(_) => "count_slides",
            Test::CountShapes(_) => "count_shapes",
            Test::LlmJudge(_) => "llm_judge",
        }
    }

    /// Computed label used as the result's `testName`.
    pub fn label(&self) -> String {
        match self {
            Test::Equals(c)
            | Test::NotEquals(c)
            | Test::Includes(c)
            | Test::NotIncludes(c) => format!("{} {}", self.name(), c.target()),
            Test::GreaterThan(c)
            | Test::LessThan(c)
            | Test::GreaterThanOrEqual(c)
            | Test::LessThanOrEqual(c) => format!("{} {}", self.name(), c.target()),
            Test::AllAreEqual(c)
            | Test::SomeAreEqual(c)
            | Test::NoneAreEqual(c)
            | Test::SomeAreUnequal(c) => {
                format!("{} over {} properties", self.name(), c.objects.len())
            }
            Test::CountSlides(_) => "count_slides".to_string(),
            Test::CountShapes(c) => format!("count_shapes slide {}", c.slide_id),
            Test::LlmJudge(c) => format!("llm_judge slide {}", c.slide_id),
        }
    }

    /// The custom failure message declared on the test, if any.
    pub fn custom_error(&self) -> Option<&str> {
        match self {
            Test::Equals(c)
            | Test::NotEquals(c)
            | Test::Includes(c)
            | Test::NotIncludes(c) => c.error.as_deref(),
            Test::GreaterThan(c)
            | Test::LessThan(c)
            | Test::GreaterThanOrEqual(c)
            | Test::LessThanOrEqual(c) => c.error.as_deref(),
            Test::AllAreEqual(c)
            | Test::SomeAreEqual(c)
            | Test::NoneAreEqual(c)
            | Test::SomeAreUnequal(c) => c.error.as_deref(),
            Test::CountSlides(c) => c.error.as_deref(),
            Test::CountShapes(c) => c.error.as_deref(),
            Test::LlmJudge(c) => c.error.as_deref(),
        }
    }
}

/// Assertion on one property of one shape, compared against a literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCheck {
    pub slide_id: SlideId,
    pub shape_id: ShapeId,
    pub key: String,
    pub expected: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PropertyCheck {
    fn target(&self) -> String {
        format!("slide {} shape {} {}", self.slide_id, self.shape_id, self.key)
    }
}

/// Ordering assertion on one numeric property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericCheck {
    pub slide_id: SlideId,
    pub shape_id: ShapeId,
    pub key: String,
    pub expected: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NumericCheck {
    fn target(&self) -> String {
        format!("slide {} shape {} {}", self.slide_id, self.shape_id, self.key)
    }
}

/// Assertion over the mutual equality of a set of properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqualitySet {
    pub objects: Vec<PropertyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A (slide, shape, key) address inside an equality set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRef {
    pub slide_id: SlideId,
    pub shape_id: ShapeId,
    pub key: String,
}

/// Assertion on the document's slide count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideCount {
    pub expected: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Assertion on the number of (optionally filtered) shapes on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeCount {
    pub slide_id: SlideId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<ShapeFilter>,
    pub expected: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Assertion delegated to an external semantic judge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeCheck {
    pub slide_id: SlideId,
    pub question: String,
    pub expected_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One protocol entry: either a recognized test or a retained raw entry that
/// could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolEntry {
    Test(Test),
    Unsupported { name: String, detail: String },
}

/// The ordered assertion list for one benchmark case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestProtocol {
    pub entries: Vec<ProtocolEntry>,
}

impl TestProtocol {
    /// Parse a protocol from a JSON array string.
    ///
    /// The array itself must be valid JSON; individual entries are decoded
    /// leniently, so a single malformed entry does not reject the protocol.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let values: Vec<Value> =
            serde_json::from_str(json).context("Failed to parse test protocol JSON")?;
        Ok(Self::from_values(values))
    }

    /// Build a protocol from raw JSON entries, decoding each one leniently.
    pub fn from_values(values: Vec<Value>) -> Self {
        let entries = values
            .into_iter()
            .map(|value| match serde_json::from_value::<Test>(value.clone()) {
                Ok(test) => ProtocolEntry::Test(test),
                Err(err) => ProtocolEntry::Unsupported {
                    name: value
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or("<unnamed>")
                        .to_string(),
                    detail: err.to_string(),
                },
            })
            .collect();
        Self { entries }
    }

    /// Build a protocol from already-typed tests.
    pub fn from_tests(tests: Vec<Test>) -> Self {
        Self {
            entries: tests.into_iter().map(ProtocolEntry::Test).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when any entry delegates to the semantic judge.
    pub fn has_judge_tests(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, ProtocolEntry::Test(Test::LlmJudge(_))))
    }
}
