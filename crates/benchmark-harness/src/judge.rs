//! Semantic judge boundary.
//!
//! The `llm_judge` assertion delegates to an external judge (typically an
//! LLM behind a network call). The engine only builds the request (question,
//! expected answer, and whatever slide context is available) and maps the
//! verdict to pass/fail. A judge error, a missing judge, or a
//! malformed verdict is a failed assertion, never a crash.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{Document, TestResult};

use crate::assertions::ResultCtx;
use crate::error::EngineError;
use crate::protocol::JudgeCheck;
use crate::query::find_slide;

/// Context handed to the judge alongside the question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeContext {
    /// JSON snapshot of the target slide's post-edit state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_state: Option<Value>,
    /// Base64 screenshot of the rendered slide, when the caller has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_image: Option<String>,
    /// The task prompt the agent was benchmarked on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_prompt: Option<String>,
}

/// One judge invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeRequest {
    pub question: String,
    pub expected_answer: String,
    #[serde(default)]
    pub context: JudgeContext,
}

/// The judge's answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeVerdict {
    pub verdict: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// External semantic judge. Implementations live with the caller; tests use
/// scripted fakes.
pub trait SemanticJudge: Send + Sync {
    fn judge(&self, request: &JudgeRequest) -> anyhow::Result<JudgeVerdict>;
}

/// `llm_judge`.
pub(crate) fn eval_llm_judge(
    doc: &Document,
    check: &JudgeCheck,
    judge: Option<&dyn SemanticJudge>,
    ctx: ResultCtx<'_>,
) -> Result<TestResult, EngineError> {
    let slide = find_slide(doc, check.slide_id)?;
    let expected = Some(Value::String(check.expected_answer.clone()));

    let Some(judge) = judge else {
        return Ok(ctx.fail(
            format!(
                "No semantic judge configured; cannot evaluate \"{}\"",
                check.question
            ),
            None,
            expected,
        ));
    };

    let request = JudgeRequest {
        question: check.question.clone(),
        expected_answer: check.expected_answer.clone(),
        context: JudgeContext {
            slide_state: serde_json::to_value(slide).ok(),
            snapshot_image: None,
            task_prompt: None,
        },
    };

    match judge.judge(&request) {
        Ok(verdict) => {
            let actual = Some(Value::Bool(verdict.verdict));
            if verdict.verdict {
                Ok(ctx.pass(actual, expected))
            } else {
                let message = verdict.rationale.unwrap_or_else(|| {
                    format!("Judge rejected \"{}\"", check.question)
                });
                Ok(ctx.fail(message, actual, expected))
            }
        }
        Err(err) => Ok(ctx.fail(
            format!("Semantic judge failed: {:#}", err),
            None,
            expected,
        )),
    }
}
