//! Relevance Gate
//!
//! Decides whether normalized text is an agronomic symptom description.
//! Two independent halves, composed by `RelevanceGate::evaluate`:
//!
//! - Keyword heuristic: substring hits against agronomic and off-domain
//!   fragment sets, checked against `GateThresholds`
//! - Relevance model: naive Bayes trained on disease characteristics
//!   (relevant) versus off-domain phrases (irrelevant)
//!
//! Input passes only when both halves agree.

use serde::Serialize;

use crate::classifier::TextClassifier;
use crate::config::{GateThresholds, PipelineConfig};
use crate::error::DiagnosisResult;
use crate::knowledge::KnowledgeBase;

pub const RELEVANT_LABEL: &str = "relevante";
pub const IRRELEVANT_LABEL: &str = "irrelevante";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    Relevant,
    Irrelevant,
}

// ============================================================================
// Keyword Heuristic
// ============================================================================

/// Keyword counts over a normalized token list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeywordEvidence {
    pub token_count: usize,
    pub relevant_hits: usize,
    pub irrelevant_hits: usize,
}

/// Number of tokens containing at least one fragment (each token counts once)
pub fn count_hits<T, F>(tokens: &[T], fragments: &[F]) -> usize
where
    T: AsRef<str>,
    F: AsRef<str>,
{
    tokens
        .iter()
        .filter(|token| {
            let token = token.as_ref();
            fragments.iter().any(|fragment| token.contains(fragment.as_ref()))
        })
        .count()
}

/// Count agronomic and off-domain hits for a token list
pub fn keyword_evidence<T, F>(tokens: &[T], agronomic: &[F], off_domain: &[F]) -> KeywordEvidence
where
    T: AsRef<str>,
    F: AsRef<str>,
{
    KeywordEvidence {
        token_count: tokens.len(),
        relevant_hits: count_hits(tokens, agronomic),
        irrelevant_hits: count_hits(tokens, off_domain),
    }
}

/// Token floor, absolute agronomic floor and agronomic/off-domain ratio
pub fn passes_heuristic(evidence: &KeywordEvidence, thresholds: &GateThresholds) -> bool {
    evidence.token_count >= thresholds.min_tokens
        && evidence.relevant_hits >= thresholds.min_relevant_hits
        && evidence.relevant_hits >= thresholds.relevance_ratio * evidence.irrelevant_hits
}

// ============================================================================
// Relevance Model
// ============================================================================

/// Binary relevant/irrelevant text classifier
#[derive(Debug, Clone)]
pub struct RelevanceModel {
    classifier: TextClassifier,
}

impl RelevanceModel {
    /// Train on positive (in-domain) and negative (off-domain) examples
    ///
    /// Class sizes are taken as given; no rebalancing is applied.
    pub fn train<P, N>(positive: &[P], negative: &[N], alpha: f64) -> DiagnosisResult<Self>
    where
        P: AsRef<str>,
        N: AsRef<str>,
    {
        let documents: Vec<&str> = positive
            .iter()
            .map(|p| p.as_ref())
            .chain(negative.iter().map(|n| n.as_ref()))
            .collect();
        let labels: Vec<&str> = std::iter::repeat(RELEVANT_LABEL)
            .take(positive.len())
            .chain(std::iter::repeat(IRRELEVANT_LABEL).take(negative.len()))
            .collect();

        let classifier = TextClassifier::fit(&documents, &labels, alpha)?;
        Ok(Self { classifier })
    }

    /// Model verdict for normalized text
    pub fn predict(&self, normalized: &str) -> Relevance {
        if self.classifier.predict(normalized) == RELEVANT_LABEL {
            Relevance::Relevant
        } else {
            Relevance::Irrelevant
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.classifier.vocabulary_size()
    }
}

// ============================================================================
// Gate
// ============================================================================

/// Both halves of the gate decision, for inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    pub evidence: KeywordEvidence,
    pub heuristic_passed: bool,
    pub model_verdict: Relevance,
    pub passed: bool,
}

/// Trained relevance model plus keyword sets and thresholds
#[derive(Debug, Clone)]
pub struct RelevanceGate {
    model: RelevanceModel,
    agronomic_fragments: Vec<String>,
    off_domain_fragments: Vec<String>,
    thresholds: GateThresholds,
}

impl RelevanceGate {
    /// Train the relevance model from the knowledge base
    ///
    /// Positives are the normalized disease characteristics; negatives are
    /// the off-domain phrases, truncated to `negative_sample_limit` if set.
    pub fn train(kb: &KnowledgeBase, config: &PipelineConfig) -> DiagnosisResult<Self> {
        let positive: Vec<&str> = kb
            .diseases
            .records()
            .iter()
            .map(|r| r.normalized_characteristics.as_str())
            .collect();

        let negative_count = config
            .negative_sample_limit
            .map_or(kb.off_domain_phrases.len(), |limit| limit.min(kb.off_domain_phrases.len()));
        let negative = &kb.off_domain_phrases[..negative_count];

        let model = RelevanceModel::train(&positive, negative, config.smoothing_alpha)?;

        tracing::info!(
            "Relevance model trained: {} relevant, {} irrelevant examples, {} terms",
            positive.len(),
            negative.len(),
            model.vocabulary_size()
        );

        Ok(Self {
            model,
            agronomic_fragments: kb.agronomic_fragments.clone(),
            off_domain_fragments: kb.off_domain_fragments.clone(),
            thresholds: config.gate,
        })
    }

    /// Evaluate normalized tokens against both halves of the gate
    pub fn evaluate(&self, tokens: &[String]) -> GateDecision {
        let evidence = keyword_evidence(tokens, &self.agronomic_fragments, &self.off_domain_fragments);
        let heuristic_passed = passes_heuristic(&evidence, &self.thresholds);
        let model_verdict = self.model.predict(&tokens.join(" "));

        GateDecision {
            evidence,
            heuristic_passed,
            model_verdict,
            passed: heuristic_passed && model_verdict == Relevance::Relevant,
        }
    }

    pub fn thresholds(&self) -> &GateThresholds {
        &self.thresholds
    }
}
