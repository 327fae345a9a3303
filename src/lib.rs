//! Cotton Disease Diagnosis
//!
//! Turns a free-text (Portuguese) description of cotton plant symptoms into
//! a named disease and its description, or a rejection.
//!
//! Module layout:
//! - `utils/`: Text normalization, lemmatization and static lookup tables
//! - `classifier/`: TF-IDF vectorizer and multinomial naive Bayes
//! - `data`: Disease dataset loading with Polars
//! - `relevance`: Keyword heuristic + relevance model gate
//! - `disease`: Disease classifier over normalized characteristics
//! - `diagnoser`: Pipeline orchestration (single, batch, explain)
//! - `api_server`: Axum HTTP surface (feature `api`)

pub mod utils;
pub mod classifier;
pub mod config;
pub mod data;
pub mod error;
pub mod knowledge;
pub mod relevance;
pub mod disease;
pub mod diagnoser;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use utils::TextNormalizer;
pub use config::{GateThresholds, PipelineConfig};
pub use data::{DiseaseData, DiseaseRecord};
pub use error::{DiagnosisError, DiagnosisResult};
pub use knowledge::KnowledgeBase;
pub use relevance::{GateDecision, KeywordEvidence, Relevance, RelevanceGate};
pub use disease::DiseaseClassifier;
pub use diagnoser::{Diagnoser, DiagnosisOutcome, Explanation, InvalidReason};
