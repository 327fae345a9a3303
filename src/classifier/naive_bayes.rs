//! Multinomial Naive Bayes
//!
//! Trained on (non-negative) TF-IDF feature vectors with additive smoothing:
//! - log P(c)      = ln(n_c / n)
//! - log P(t | c)  = ln(F(c,t) + α) − ln(Σ_t F(c,t) + α·|V|)
//! - score(c | x)  = log P(c) + Σ_t x_t · log P(t | c)
//!
//! Classes are kept in sorted order; an exact score tie resolves to the
//! first class in that order.

use crate::classifier::tfidf::SparseVector;
use crate::error::{DiagnosisError, DiagnosisResult};

/// Fitted multinomial naive Bayes model
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    /// [class][feature] smoothed log probability
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fit from feature vectors and their labels
    pub fn fit<S: AsRef<str>>(
        features: &[SparseVector],
        labels: &[S],
        n_features: usize,
        alpha: f64,
    ) -> DiagnosisResult<Self> {
        if features.is_empty() {
            return Err(DiagnosisError::EmptyCorpus("naive bayes"));
        }
        if features.len() != labels.len() {
            return Err(DiagnosisError::LengthMismatch {
                documents: features.len(),
                labels: labels.len(),
            });
        }
        if !(alpha > 0.0) {
            return Err(DiagnosisError::InvalidAlpha(alpha));
        }

        let mut classes: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();
        classes.sort();
        classes.dedup();

        let mut class_count = vec![0usize; classes.len()];
        let mut feature_count = vec![vec![0.0f64; n_features]; classes.len()];

        for (vector, label) in features.iter().zip(labels) {
            // classes is sorted and contains every label
            let Ok(class_idx) = classes.binary_search_by(|c| c.as_str().cmp(label.as_ref())) else {
                continue;
            };
            class_count[class_idx] += 1;
            for &(feature, weight) in vector {
                feature_count[class_idx][feature] += weight;
            }
        }

        let n_samples = features.len() as f64;
        let class_log_prior = class_count
            .iter()
            .map(|&count| (count as f64 / n_samples).ln())
            .collect();

        let feature_log_prob = feature_count
            .iter()
            .map(|counts| {
                let denominator = (counts.iter().sum::<f64>() + alpha * n_features as f64).ln();
                counts.iter().map(|&c| (c + alpha).ln() - denominator).collect()
            })
            .collect();

        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Class labels in sorted order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Unnormalized log posterior per class (same order as `classes`)
    pub fn joint_log_likelihood(&self, x: &SparseVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior + x.iter().map(|&(feature, weight)| weight * log_probs[feature]).sum::<f64>()
            })
            .collect()
    }

    /// Most probable class; ties go to the first class in sorted order
    pub fn predict(&self, x: &SparseVector) -> &str {
        let scores = self.joint_log_likelihood(x);
        let mut best = 0;
        for (idx, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = idx;
            }
        }
        &self.classes[best]
    }

    /// Normalized posterior probabilities per class (same order as `classes`)
    pub fn predict_proba(&self, x: &SparseVector) -> Vec<f64> {
        let scores = self.joint_log_likelihood(x);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        exp.into_iter().map(|e| e / total).collect()
    }
}
