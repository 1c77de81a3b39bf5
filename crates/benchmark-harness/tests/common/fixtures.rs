//! Shared builders for integration tests: documents, cases, providers, and
//! scripted judges.
#![allow(dead_code)]

use anyhow::anyhow;
use serde_json::{json, Value};
use shared_types::{Changeset, Document};

use benchmark_harness::judge::{JudgeRequest, JudgeVerdict, SemanticJudge};
use benchmark_harness::protocol::TestProtocol;
use benchmark_harness::runner::{CaseInput, CaseProvider};

/// A one-slide document (slide id 1) with the given shapes.
pub fn slide_doc(shapes: Value) -> Document {
    serde_json::from_value(json!({ "slides": [{ "id": 1, "shapes": shapes }] })).unwrap()
}

/// A textbox shape with a position.
pub fn textbox(id: u32, text: &str, top_left: [f64; 2]) -> Value {
    json!({
        "id": id,
        "shapeType": "textbox",
        "text": text,
        "pos": { "topLeft": top_left },
        "size": { "w": 100.0, "h": 30.0 }
    })
}

/// A case whose changeset is a no-op and whose documents are identical.
pub fn noop_case(doc: Document, protocol: TestProtocol) -> CaseInput {
    CaseInput {
        original: doc.clone(),
        updated: doc,
        changeset: Changeset::default(),
        protocol,
    }
}

enum CaseSpec {
    Ready(CaseInput),
    Broken(String),
}

/// In-memory case provider with optional fetch failures.
#[derive(Default)]
pub struct StaticProvider {
    cases: Vec<(String, CaseSpec)>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case(mut self, name: &str, input: CaseInput) -> Self {
        self.cases.push((name.to_string(), CaseSpec::Ready(input)));
        self
    }

    pub fn broken(mut self, name: &str, error: &str) -> Self {
        self.cases
            .push((name.to_string(), CaseSpec::Broken(error.to_string())));
        self
    }
}

impl CaseProvider for StaticProvider {
    fn case_names(&self) -> Vec<String> {
        self.cases.iter().map(|(name, _)| name.clone()).collect()
    }

    fn fetch(&self, name: &str) -> anyhow::Result<CaseInput> {
        match self.cases.iter().find(|(n, _)| n == name) {
            Some((_, CaseSpec::Ready(input))) => Ok(input.clone()),
            Some((_, CaseSpec::Broken(error))) => Err(anyhow!("{error}")),
            None => Err(anyhow!("unknown case: {name}")),
        }
    }
}

/// Judge that answers every question the same way.
pub struct ConstantJudge {
    pub verdict: bool,
}

impl SemanticJudge for ConstantJudge {
    fn judge(&self, _request: &JudgeRequest) -> anyhow::Result<JudgeVerdict> {
        Ok(JudgeVerdict {
            verdict: self.verdict,
            rationale: None,
        })
    }
}
