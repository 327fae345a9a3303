//! Disease Classifier
//!
//! Naive Bayes over TF-IDF features of the normalized disease
//! characteristics. The label space is exactly the set of record names.

use crate::classifier::{ClassScore, TextClassifier};
use crate::data::DiseaseData;
use crate::error::{DiagnosisError, DiagnosisResult};

#[derive(Debug, Clone)]
pub struct DiseaseClassifier {
    classifier: TextClassifier,
}

impl DiseaseClassifier {
    /// Train on one (normalized characteristics, name) pair per record
    pub fn train(diseases: &DiseaseData, alpha: f64) -> DiagnosisResult<Self> {
        let (documents, labels): (Vec<&str>, Vec<&str>) = diseases
            .records()
            .iter()
            .map(|r| (r.normalized_characteristics.as_str(), r.name.as_str()))
            .unzip();

        let classifier = TextClassifier::fit(&documents, &labels, alpha)?;

        // Every label the model can emit must resolve to a record
        if let Some(orphan) = classifier.classes().iter().find(|c| !diseases.contains(c)) {
            return Err(DiagnosisError::LabelNotFound(orphan.clone()));
        }

        tracing::info!(
            "Disease classifier trained: {} labels, {} terms",
            classifier.classes().len(),
            classifier.vocabulary_size()
        );

        Ok(Self { classifier })
    }

    /// Most probable disease for normalized text. No confidence floor.
    pub fn classify(&self, normalized: &str) -> &str {
        self.classifier.predict(normalized)
    }

    /// Every disease with its posterior probability, most probable first
    pub fn rank(&self, normalized: &str) -> Vec<ClassScore> {
        self.classifier.rank(normalized)
    }

    pub fn labels(&self) -> &[String] {
        self.classifier.classes()
    }
}
