//! Configuration parsing for benchmark runs.
//!
//! Runs are configured with TOML: how many cases evaluate in parallel, how
//! the changeset verifier is scoped, and the score threshold that decides
//! overall pass/fail.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shared_types::SlideId;
use std::fs;
use std::path::Path;

use crate::verify::{VerifyScope, POSITION_TOLERANCE};

/// Main configuration structure loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Benchmark run configuration.
    pub benchmark: BenchmarkConfig,
    /// Changeset verification settings.
    #[serde(default)]
    pub verification: VerificationConfig,
    /// Pass/fail thresholds.
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or required fields are missing.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }
}

/// Core benchmark run parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Name of the benchmark suite.
    pub name: String,
    /// Number of cases evaluated concurrently (default: 4).
    #[serde(default = "default_parallel_cases")]
    pub parallel_cases: u32,
    /// Judge share of the static/judge score blend, when a semantic judge
    /// participates. Unset means suites carry no judge annotation.
    #[serde(default)]
    pub llm_judge_weight: Option<f64>,
}

fn default_parallel_cases() -> u32 {
    4
}

/// Changeset verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Absolute tolerance for position/size checks (default: 0.25).
    #[serde(default = "default_position_tolerance")]
    pub position_tolerance: f64,
    /// Slide id to verify against; unset means the first slide of each
    /// document.
    #[serde(default)]
    pub slide: Option<SlideId>,
}

impl VerificationConfig {
    pub fn scope(&self) -> VerifyScope {
        match self.slide {
            Some(id) => VerifyScope::Slide(id),
            None => VerifyScope::FirstSlide,
        }
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            position_tolerance: POSITION_TOLERANCE,
            slide: None,
        }
    }
}

fn default_position_tolerance() -> f64 {
    POSITION_TOLERANCE
}

/// Score thresholds for pass/fail determination.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThresholdsConfig {
    /// Minimum overall score (percent) for the run to pass.
    pub min_score: Option<f64>,
}
