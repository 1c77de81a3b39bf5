//! Run a demo benchmark against an in-memory case
//!
//! Usage: cargo run -p benchmark-harness --example run_benchmark -- [config.toml]

use anyhow::Result;
use serde_json::json;
use shared_types::{Changeset, Document};
use std::env;

use benchmark_harness::config::Config;
use benchmark_harness::protocol::TestProtocol;
use benchmark_harness::reporter::{OutputFormat, Reporter};
use benchmark_harness::runner::{BenchmarkRunner, CaseInput, CaseProvider};

/// One hardcoded case: the agent claimed to move the title, and the editing
/// service honored it.
struct DemoProvider;

impl CaseProvider for DemoProvider {
    fn case_names(&self) -> Vec<String> {
        vec!["move-title".to_string()]
    }

    fn fetch(&self, _name: &str) -> Result<CaseInput> {
        let original: Document = serde_json::from_value(json!({
            "slides": [{ "id": 1, "shapes": [
                { "id": 7, "shapeType": "textbox", "text": "Quarterly Report",
                  "pos": { "topLeft": [10.0, 10.0] }, "size": { "w": 200.0, "h": 40.0 } }
            ]}]
        }))?;
        let updated: Document = serde_json::from_value(json!({
            "slides": [{ "id": 1, "shapes": [
                { "id": 7, "shapeType": "textbox", "text": "Quarterly Report",
                  "pos": { "topLeft": [100.1, 50.0] }, "size": { "w": 200.0, "h": 40.0 } }
            ]}]
        }))?;
        let changeset: Changeset = serde_json::from_value(json!({
            "modified": [{ "id": 7, "pos": { "topLeft": [100.0, 50.0] } }]
        }))?;
        let protocol = TestProtocol::from_json(
            r#"[
                { "name": "equals", "slideId": 1, "shapeId": 7,
                  "key": "text", "expected": "Quarterly Report" },
                { "name": "greater_than", "slideId": 1, "shapeId": 7,
                  "key": "pos.topLeft[0]", "expected": 50.0 },
                { "name": "count_shapes", "slideId": 1, "expected": 1 }
            ]"#,
        )?;

        Ok(CaseInput {
            original,
            updated,
            changeset,
            protocol,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let config = match args.get(1) {
        Some(path) => {
            println!("Loading config from: {}", path);
            Config::from_file(path)?
        }
        None => Config::from_str("[benchmark]\nname = \"Demo Deck Editing\"")?,
    };

    println!("Starting benchmark: {}", config.benchmark.name);
    println!("  Parallel cases: {}", config.benchmark.parallel_cases);
    println!();

    let runner = BenchmarkRunner::new(config);
    let results = runner.run(&DemoProvider).await;

    let reporter = Reporter::new(OutputFormat::Console);
    reporter.report(&results)?;

    Ok(())
}
