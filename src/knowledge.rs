//! Knowledge Base
//!
//! The read-only inputs the diagnoser is trained and gated with, gathered
//! into one value built at startup and handed to `Diagnoser::new`.

use anyhow::Result;
use std::path::Path;

use crate::data::DiseaseData;
use crate::utils::lookup_tables::{AGRONOMIC_FRAGMENTS, OFF_DOMAIN_FRAGMENTS, OFF_DOMAIN_PHRASES};
use crate::utils::normalization::TextNormalizer;

/// Static corpora and keyword sets
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub normalizer: TextNormalizer,
    pub diseases: DiseaseData,
    /// Negative examples for the relevance model (raw text)
    pub off_domain_phrases: Vec<String>,
    pub agronomic_fragments: Vec<String>,
    pub off_domain_fragments: Vec<String>,
}

impl KnowledgeBase {
    /// Built-in tables around an already loaded disease set
    pub fn new(normalizer: TextNormalizer, diseases: DiseaseData) -> Self {
        Self {
            normalizer,
            diseases,
            off_domain_phrases: to_owned(OFF_DOMAIN_PHRASES),
            agronomic_fragments: to_owned(AGRONOMIC_FRAGMENTS),
            off_domain_fragments: to_owned(OFF_DOMAIN_FRAGMENTS),
        }
    }

    /// Load the disease CSV and attach the built-in tables
    pub fn load(disease_csv: impl AsRef<Path>) -> Result<Self> {
        let normalizer = TextNormalizer::new();
        let diseases = DiseaseData::load(disease_csv, &normalizer)?;
        Ok(Self::new(normalizer, diseases))
    }

    /// Supplemental disease records only (no CSV)
    pub fn builtin() -> Result<Self> {
        let normalizer = TextNormalizer::new();
        let diseases = DiseaseData::builtin(&normalizer)?;
        Ok(Self::new(normalizer, diseases))
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
