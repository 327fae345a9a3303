//! TF-IDF Vectorizer
//!
//! Bag-of-words features weighted by smoothed inverse document frequency,
//! L2-normalized per document.
//!
//! Formulas:
//! - Term analysis: lowercase, maximal runs of word characters, length ≥ 2
//! - idf(t) = ln((1 + n) / (1 + df(t))) + 1
//! - weight(t, d) = count(t, d) × idf(t), then divided by the L2 norm of d
//!
//! Terms never seen during fitting contribute nothing at transform time.

use rustc_hash::FxHashMap;

use crate::error::{DiagnosisError, DiagnosisResult};

/// Sparse feature vector: (feature index, weight), sorted by index
pub type SparseVector = Vec<(usize, f64)>;

/// Minimum characters for a run of word characters to count as a term
const MIN_TERM_CHARS: usize = 2;

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// Term → feature index (indices follow sorted term order)
    vocabulary: FxHashMap<String, usize>,
    /// Inverse document frequency per feature index
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and document frequencies from a corpus
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> DiagnosisResult<Self> {
        if documents.is_empty() {
            return Err(DiagnosisError::EmptyCorpus("tfidf vocabulary"));
        }

        let mut document_frequency: FxHashMap<String, usize> = FxHashMap::default();
        for doc in documents {
            let mut terms = analyze(doc.as_ref());
            terms.sort_unstable();
            terms.dedup();
            for term in terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<(String, usize)> = document_frequency.into_iter().collect();
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let n_documents = documents.len() as f64;
        let mut vocabulary = FxHashMap::default();
        let mut idf = Vec::with_capacity(terms.len());
        for (index, (term, df)) in terms.into_iter().enumerate() {
            idf.push(((1.0 + n_documents) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(Self { vocabulary, idf })
    }

    /// Number of features (vocabulary size)
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Feature index of a term, if it was seen during fitting
    pub fn feature_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Inverse document frequency of a term
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.feature_index(term).map(|idx| self.idf[idx])
    }

    /// Transform one document into an L2-normalized TF-IDF vector
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: FxHashMap<usize, f64> = FxHashMap::default();
        for term in analyze(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();
        vector.sort_by_key(|(idx, _)| *idx);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in vector.iter_mut() {
                *weight /= norm;
            }
        }

        vector
    }
}

/// Split a document into lowercase terms of at least two word characters
pub fn analyze(document: &str) -> Vec<String> {
    document
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|term| term.chars().count() >= MIN_TERM_CHARS)
        .map(|term| term.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_analyze_drops_single_chars() {
        assert_eq!(analyze("Folha a mancha, 2 + 22"), vec!["folha", "mancha", "22"]);
        assert!(analyze("").is_empty());
    }

    #[test]
    fn test_idf_smoothing() {
        let vectorizer = TfidfVectorizer::fit(&["folha mancha", "folha clorose"]).unwrap();
        assert_eq!(vectorizer.n_features(), 3);
        assert_relative_eq!(vectorizer.idf("folha").unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(vectorizer.idf("mancha").unwrap(), 1.5f64.ln() + 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let vectorizer = TfidfVectorizer::fit(&["folha mancha", "folha clorose"]).unwrap();
        let vector = vectorizer.transform("folha mancha");

        let folha = vectorizer.feature_index("folha").unwrap();
        let mancha = vectorizer.feature_index("mancha").unwrap();
        let weight = |idx: usize| vector.iter().find(|(i, _)| *i == idx).map(|(_, w)| *w).unwrap();

        assert_relative_eq!(weight(folha), 0.579_738_67, epsilon = 1e-6);
        assert_relative_eq!(weight(mancha), 0.814_802_47, epsilon = 1e-6);
    }

    #[test]
    fn test_out_of_vocabulary_terms_ignored() {
        let vectorizer = TfidfVectorizer::fit(&["folha mancha"]).unwrap();
        assert!(vectorizer.transform("futebol bola").is_empty());

        let mixed = vectorizer.transform("folha futebol");
        assert_eq!(mixed.len(), 1);
        assert_relative_eq!(mixed[0].1, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let docs: [&str; 0] = [];
        assert!(TfidfVectorizer::fit(&docs).is_err());
    }
}
