//! Pipeline Configuration
//!
//! Thresholds for input validation and relevance gating, plus training
//! parameters. Every field has a default, so an empty JSON object is a valid
//! configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::classifier::DEFAULT_ALPHA;

/// Relevance gate thresholds
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GateThresholds {
    /// Minimum normalized tokens
    pub min_tokens: usize,
    /// Minimum tokens matching an agronomic fragment
    pub min_relevant_hits: usize,
    /// Agronomic hits must be at least this multiple of off-domain hits
    pub relevance_ratio: usize,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            min_tokens: 3,
            min_relevant_hits: 2,
            relevance_ratio: 2,
        }
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Lowercase input that ends the session (compared after trim + lowercase)
    pub exit_keyword: String,
    /// Inputs shorter than this (in characters) are rejected
    pub min_input_chars: usize,
    /// Normalized token floor before classification
    pub min_detail_tokens: usize,
    pub gate: GateThresholds,
    /// Cap on off-domain phrases used as negative examples (None = all)
    pub negative_sample_limit: Option<usize>,
    /// Naive Bayes additive smoothing for both models
    pub smoothing_alpha: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            exit_keyword: "sair".to_string(),
            min_input_chars: 4,
            min_detail_tokens: 3,
            gate: GateThresholds::default(),
            negative_sample_limit: None,
            smoothing_alpha: DEFAULT_ALPHA,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read pipeline config: {:?}", path))?;

        let config: PipelineConfig = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse pipeline config JSON")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the pipeline meaningless
    pub fn validate(&self) -> Result<()> {
        if self.exit_keyword.trim().is_empty() {
            anyhow::bail!("exit_keyword must not be empty");
        }
        if self.exit_keyword != self.exit_keyword.trim().to_lowercase() {
            anyhow::bail!("exit_keyword must be trimmed lowercase, got {:?}", self.exit_keyword);
        }
        if self.gate.relevance_ratio == 0 {
            anyhow::bail!("gate.relevance_ratio must be at least 1");
        }
        if !(self.smoothing_alpha > 0.0) {
            anyhow::bail!("smoothing_alpha must be positive, got {}", self.smoothing_alpha);
        }
        if self.negative_sample_limit == Some(0) {
            anyhow::bail!("negative_sample_limit must be at least 1 when set");
        }
        Ok(())
    }
}
