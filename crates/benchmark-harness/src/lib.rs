//! Benchmark harness for AI agents that edit slide presentations.
//!
//! Agents propose changesets against a document model; an external editing
//! service applies them and re-extracts the document. This crate provides
//! the evaluation core that decides whether the agent actually did the work:
//!
//! - **Assertion engine**: a declarative test protocol (equality, numeric
//!   comparisons, equality sets, membership, counts, semantic judge) is
//!   evaluated against the post-edit document, with per-test isolation.
//! - **Changeset-effect verification**: the agent's *claimed* add/modify/
//!   delete intent is cross-checked against the *observed* before/after
//!   document diff, catching edits that were never applied.
//! - **Scoring**: suite results fold into an overall pass rate, optionally
//!   blended with a semantic judge score.
//! - **Reporting**: JSON, console, and Markdown output.
//!
//! Every core operation is a pure, synchronous function of its inputs; only
//! the multi-case [`runner::BenchmarkRunner`] is async, so cases can be
//! evaluated concurrently.
//!
//! # Example
//!
//! ```
//! use benchmark_harness::protocol::TestProtocol;
//! use benchmark_harness::runner::ProtocolRunner;
//! use shared_types::Document;
//!
//! # fn example() -> anyhow::Result<()> {
//! let doc: Document = serde_json::from_str(r#"{
//!     "slides": [{ "id": 1, "shapes": [
//!         { "id": 2, "shapeType": "textbox", "text": "Quarterly Report" }
//!     ]}]
//! }"#)?;
//!
//! let protocol = TestProtocol::from_json(r#"[
//!     { "name": "equals", "slideId": 1, "shapeId": 2,
//!       "key": "text", "expected": "Quarterly Report" },
//!     { "name": "count_slides", "expected": 1 }
//! ]"#)?;
//!
//! let suite = ProtocolRunner::new().run(&doc, &protocol);
//! assert_eq!(suite.passed, 2);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod config;
pub mod error;
pub mod judge;
pub mod path;
pub mod protocol;
pub mod query;
pub mod reporter;
pub mod runner;
pub mod score;
pub mod verify;

// Re-export main types for convenience
pub use config::Config;
pub use error::EngineError;
pub use judge::{JudgeContext, JudgeRequest, JudgeVerdict, SemanticJudge};
pub use protocol::{ProtocolEntry, Test, TestProtocol};
pub use query::ShapeFilter;
pub use reporter::{OutputFormat, Reporter};
pub use runner::{
    BenchmarkResults, BenchmarkRunner, CaseInput, CaseProvider, CaseResult, ProtocolRunner,
};
pub use score::{CaseScore, ScoreSummary};
pub use verify::{ChangesetVerifier, VerifyScope, POSITION_TOLERANCE};
