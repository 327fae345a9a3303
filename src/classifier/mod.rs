//! Statistical text classification
//!
//! TF-IDF features feeding a multinomial naive Bayes model. Both the
//! relevance model and the disease model are instances of `TextClassifier`.

pub mod naive_bayes;
pub mod tfidf;

pub use naive_bayes::MultinomialNb;
pub use tfidf::{SparseVector, TfidfVectorizer};

use crate::error::{DiagnosisError, DiagnosisResult};

/// Default additive smoothing
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Vectorizer + model, fitted together on one corpus
#[derive(Debug, Clone)]
pub struct TextClassifier {
    vectorizer: TfidfVectorizer,
    model: MultinomialNb,
}

/// One class with its posterior probability
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ClassScore {
    pub label: String,
    pub probability: f64,
}

impl TextClassifier {
    /// Fit on parallel slices of documents and labels
    pub fn fit<D, L>(documents: &[D], labels: &[L], alpha: f64) -> DiagnosisResult<Self>
    where
        D: AsRef<str>,
        L: AsRef<str>,
    {
        if documents.len() != labels.len() {
            return Err(DiagnosisError::LengthMismatch {
                documents: documents.len(),
                labels: labels.len(),
            });
        }

        let vectorizer = TfidfVectorizer::fit(documents)?;
        let features: Vec<SparseVector> = documents
            .iter()
            .map(|doc| vectorizer.transform(doc.as_ref()))
            .collect();
        let model = MultinomialNb::fit(&features, labels, vectorizer.n_features(), alpha)?;

        Ok(Self { vectorizer, model })
    }

    pub fn classes(&self) -> &[String] {
        self.model.classes()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.n_features()
    }

    /// Highest-posterior label for a document
    pub fn predict(&self, document: &str) -> &str {
        self.model.predict(&self.vectorizer.transform(document))
    }

    /// All classes with posterior probabilities, most probable first
    pub fn rank(&self, document: &str) -> Vec<ClassScore> {
        let proba = self.model.predict_proba(&self.vectorizer.transform(document));
        let mut scores: Vec<ClassScore> = self
            .classes()
            .iter()
            .zip(proba)
            .map(|(label, probability)| ClassScore {
                label: label.clone(),
                probability,
            })
            .collect();
        // Stable sort keeps sorted-label order among equal probabilities
        scores.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        scores
    }
}
