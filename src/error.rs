//! Error types for training and diagnosis
//!
//! User-facing rejections (too short, off-topic, insufficient detail) are
//! not errors: they are `DiagnosisOutcome` variants. The errors here are
//! invariant violations and training-time failures.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DiagnosisError {
    /// The classifier produced a label that has no stored record.
    /// Unreachable while the label space is derived from the records.
    #[error("classifier label '{0}' has no matching disease record")]
    LabelNotFound(String),

    #[error("cannot train '{0}' on an empty corpus")]
    EmptyCorpus(&'static str),

    #[error("duplicate disease name '{0}' in training data")]
    DuplicateLabel(String),

    #[error("training corpus has {documents} documents but {labels} labels")]
    LengthMismatch { documents: usize, labels: usize },

    #[error("smoothing alpha must be positive, got {0}")]
    InvalidAlpha(f64),
}

pub type DiagnosisResult<T> = std::result::Result<T, DiagnosisError>;
