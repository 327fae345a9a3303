//! Diagnoser - Main coordinator for symptom diagnosis
//!
//! Sequences the pipeline for one free-text input:
//! 1. Exit keyword
//! 2. Length / numeric validation
//! 3. Relevance gate (keyword heuristic + relevance model)
//! 4. Detail floor on normalized tokens
//! 5. Disease classification and description lookup
//!
//! Everything is trained once in `Diagnoser::new` and read-only afterwards,
//! so one instance can serve concurrent callers. Includes a parallel
//! (Rayon) batch entry point.

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;

use crate::classifier::ClassScore;
use crate::config::PipelineConfig;
use crate::data::DiseaseData;
use crate::disease::DiseaseClassifier;
use crate::error::{DiagnosisError, DiagnosisResult};
use crate::knowledge::KnowledgeBase;
use crate::relevance::{GateDecision, RelevanceGate};
use crate::utils::normalization::TextNormalizer;

/// Why an input was rejected before classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// Shorter than the character floor, or only digits and whitespace
    TooShortOrNumeric,
    /// Too few meaningful tokens after normalization
    InsufficientDetail,
}

/// Result of diagnosing one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DiagnosisOutcome {
    Exit,
    InvalidInput { reason: InvalidReason },
    OffTopic,
    Diagnosis { disease: String, description: String },
}

impl DiagnosisOutcome {
    /// User-facing guidance (Portuguese)
    pub fn message(&self) -> &str {
        match self {
            DiagnosisOutcome::Exit => "Sessão encerrada.",
            DiagnosisOutcome::InvalidInput { reason: InvalidReason::TooShortOrNumeric } => {
                "Entrada inválida. Descreva os sintomas."
            }
            DiagnosisOutcome::InvalidInput { reason: InvalidReason::InsufficientDetail } => {
                "Descreva melhor os sintomas (mínimo 3 palavras)."
            }
            DiagnosisOutcome::OffTopic => "Descreva apenas sintomas da planta para diagnóstico.",
            DiagnosisOutcome::Diagnosis { description, .. } => description.as_str(),
        }
    }

    /// Short name of the variant, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            DiagnosisOutcome::Exit => "exit",
            DiagnosisOutcome::InvalidInput { .. } => "invalid_input",
            DiagnosisOutcome::OffTopic => "off_topic",
            DiagnosisOutcome::Diagnosis { .. } => "diagnosis",
        }
    }
}

/// Intermediate results of one diagnosis, for debugging
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub input: String,
    pub normalized_tokens: Vec<String>,
    /// Absent when the input was rejected before gating
    pub gate: Option<GateDecision>,
    /// Disease posteriors, only computed once the gate passes
    pub ranking: Vec<ClassScore>,
    pub outcome: DiagnosisOutcome,
}

/// Trained diagnosis pipeline
pub struct Diagnoser {
    normalizer: TextNormalizer,
    diseases: DiseaseData,
    gate: RelevanceGate,
    classifier: DiseaseClassifier,
    config: PipelineConfig,
}

/// Where the pipeline stopped, with what it computed up to that point
enum Stage {
    Done(DiagnosisOutcome),
    Classify { tokens: Vec<String>, gate: Option<GateDecision> },
}

impl Diagnoser {
    /// Train both classifiers and freeze the knowledge base
    pub fn new(kb: KnowledgeBase, config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        tracing::info!("Training diagnosis pipeline on {} disease records...", kb.diseases.len());

        let gate = RelevanceGate::train(&kb, &config).context("Failed to train relevance model")?;
        let classifier = DiseaseClassifier::train(&kb.diseases, config.smoothing_alpha)
            .context("Failed to train disease classifier")?;

        tracing::info!("Diagnosis pipeline ready");

        Ok(Self {
            normalizer: kb.normalizer,
            diseases: kb.diseases,
            gate,
            classifier,
            config,
        })
    }

    /// Normalize free text (lowercase, filter, canonicalize, lemmatize)
    pub fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    /// Relevance gate decision for raw text
    pub fn is_relevant(&self, raw: &str) -> bool {
        self.gate.evaluate(&self.normalizer.normalize_tokens(raw)).passed
    }

    /// Most probable disease label for normalized text
    pub fn classify(&self, normalized: &str) -> &str {
        self.classifier.classify(normalized)
    }

    /// Diagnose one free-text input
    ///
    /// Rejections are `Ok` outcomes. `Err` means the classifier produced a
    /// label with no stored record.
    pub fn diagnose(&self, raw: &str) -> DiagnosisResult<DiagnosisOutcome> {
        let outcome = match self.screen(raw) {
            Stage::Done(outcome) => outcome,
            Stage::Classify { tokens, .. } => self.lookup(self.classify(&tokens.join(" ")))?,
        };

        tracing::debug!(input = raw, outcome = outcome.kind(), "diagnosed");
        Ok(outcome)
    }

    /// Diagnose many inputs in parallel, preserving input order
    pub fn diagnose_batch<S>(&self, inputs: &[S]) -> Vec<DiagnosisResult<DiagnosisOutcome>>
    where
        S: AsRef<str> + Sync,
    {
        inputs.par_iter().map(|raw| self.diagnose(raw.as_ref())).collect()
    }

    /// Diagnose one input and keep every intermediate result
    pub fn explain(&self, raw: &str) -> DiagnosisResult<Explanation> {
        let input = raw.trim().to_lowercase();

        let (normalized_tokens, gate, ranking, outcome) = match self.screen(raw) {
            Stage::Done(outcome) => {
                let tokens = self.normalizer.normalize_tokens(&input);
                // Gating ran for off-topic and under-detailed inputs only
                let gate = match outcome {
                    DiagnosisOutcome::OffTopic
                    | DiagnosisOutcome::InvalidInput { reason: InvalidReason::InsufficientDetail } => {
                        Some(self.gate.evaluate(&tokens))
                    }
                    _ => None,
                };
                (tokens, gate, Vec::new(), outcome)
            }
            Stage::Classify { tokens, gate } => {
                let normalized = tokens.join(" ");
                let ranking = self.classifier.rank(&normalized);
                let outcome = self.lookup(self.classify(&normalized))?;
                (tokens, gate, ranking, outcome)
            }
        };

        Ok(Explanation {
            input,
            normalized_tokens,
            gate,
            ranking,
            outcome,
        })
    }

    pub fn diseases(&self) -> &DiseaseData {
        &self.diseases
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Steps 1-4: everything before the disease classifier
    fn screen(&self, raw: &str) -> Stage {
        let input = raw.trim().to_lowercase();

        if input == self.config.exit_keyword {
            return Stage::Done(DiagnosisOutcome::Exit);
        }

        if is_too_short_or_numeric(&input, self.config.min_input_chars) {
            return Stage::Done(DiagnosisOutcome::InvalidInput {
                reason: InvalidReason::TooShortOrNumeric,
            });
        }

        let tokens = self.normalizer.normalize_tokens(&input);
        let decision = self.gate.evaluate(&tokens);
        if !decision.passed {
            return Stage::Done(DiagnosisOutcome::OffTopic);
        }

        if tokens.len() < self.config.min_detail_tokens {
            return Stage::Done(DiagnosisOutcome::InvalidInput {
                reason: InvalidReason::InsufficientDetail,
            });
        }

        Stage::Classify {
            tokens,
            gate: Some(decision),
        }
    }

    /// Step 5: description lookup by exact label
    fn lookup(&self, label: &str) -> DiagnosisResult<DiagnosisOutcome> {
        let record = self
            .diseases
            .get(label)
            .ok_or_else(|| DiagnosisError::LabelNotFound(label.to_string()))?;

        Ok(DiagnosisOutcome::Diagnosis {
            disease: record.name.clone(),
            description: record.description.clone(),
        })
    }
}

/// Fewer than `min_chars` characters, or only digits and whitespace
pub fn is_too_short_or_numeric(input: &str, min_chars: usize) -> bool {
    let only_digits = !input.is_empty()
        && input.chars().all(|c| c.is_ascii_digit() || c.is_whitespace());
    only_digits || input.chars().count() < min_chars
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_diagnoser() -> Diagnoser {
        let kb = KnowledgeBase::builtin().unwrap();
        Diagnoser::new(kb, PipelineConfig::default()).unwrap()
    }

    #[test]
    fn test_is_too_short_or_numeric() {
        assert!(is_too_short_or_numeric("", 4));
        assert!(is_too_short_or_numeric("abc", 4));
        assert!(is_too_short_or_numeric("123 456", 4));
        assert!(is_too_short_or_numeric("  12\t", 4));
        assert!(!is_too_short_or_numeric("folha", 4));
        assert!(!is_too_short_or_numeric("12 folhas", 4));
        // Characters, not bytes
        assert!(is_too_short_or_numeric("açã", 4));
    }

    #[test]
    fn test_exit_keyword() {
        let diagnoser = builtin_diagnoser();
        assert_eq!(diagnoser.diagnose("sair").unwrap(), DiagnosisOutcome::Exit);
        assert_eq!(diagnoser.diagnose("  SAIR \n").unwrap(), DiagnosisOutcome::Exit);
    }

    #[test]
    fn test_symptom_diagnosis() {
        let diagnoser = builtin_diagnoser();
        let outcome = diagnoser
            .diagnose("minhas folhas estão com manchas amarelas e clorose")
            .unwrap();
        assert_eq!(
            outcome,
            DiagnosisOutcome::Diagnosis {
                disease: "Clorose Ferrica".to_string(),
                description: "Deficiência de ferro causando amarelecimento entre nervuras".to_string(),
            }
        );
        assert_eq!(outcome.message(), "Deficiência de ferro causando amarelecimento entre nervuras");
    }

    #[test]
    fn test_off_topic() {
        let diagnoser = builtin_diagnoser();
        assert_eq!(diagnoser.diagnose("qual é a capital da bahia").unwrap(), DiagnosisOutcome::OffTopic);
        assert!(!diagnoser.is_relevant("qual é a capital da bahia"));
    }

    #[test]
    fn test_insufficient_detail_after_gate() {
        let kb = KnowledgeBase::builtin().unwrap();
        let config = PipelineConfig {
            min_detail_tokens: 5,
            ..PipelineConfig::default()
        };
        let diagnoser = Diagnoser::new(kb, config).unwrap();

        // Four normalized tokens: passes the gate, short of the detail floor
        let explanation = diagnoser
            .explain("minhas folhas estão com manchas amarelas e clorose")
            .unwrap();
        assert_eq!(
            explanation.outcome,
            DiagnosisOutcome::InvalidInput { reason: InvalidReason::InsufficientDetail }
        );
        assert!(explanation.gate.unwrap().passed);
        assert!(explanation.ranking.is_empty());
        assert_eq!(explanation.outcome.message(), "Descreva melhor os sintomas (mínimo 3 palavras).");
    }

    #[test]
    fn test_batch_preserves_order() {
        let diagnoser = builtin_diagnoser();
        let inputs = ["sair", "123 456", "qual é a capital da bahia"];
        let outcomes: Vec<&'static str> = diagnoser
            .diagnose_batch(&inputs)
            .into_iter()
            .map(|r| r.unwrap().kind())
            .collect();
        assert_eq!(outcomes, vec!["exit", "invalid_input", "off_topic"]);
    }

    #[test]
    fn test_explain_reports_gate_and_ranking() {
        let diagnoser = builtin_diagnoser();
        let explanation = diagnoser
            .explain("minhas folhas estão com manchas amarelas e clorose")
            .unwrap();
        assert_eq!(explanation.normalized_tokens, vec!["folha", "mancha", "amarelo", "clorose"]);
        let gate = explanation.gate.unwrap();
        assert!(gate.passed);
        assert_eq!(gate.evidence.relevant_hits, 4);
        assert_eq!(explanation.ranking.len(), diagnoser.diseases().len());
        assert_eq!(explanation.ranking[0].label, "Clorose Ferrica");

        let rejected = diagnoser.explain("123").unwrap();
        assert!(rejected.gate.is_none());
        assert!(rejected.ranking.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let kb = KnowledgeBase::builtin().unwrap();
        let config = PipelineConfig {
            smoothing_alpha: -1.0,
            ..PipelineConfig::default()
        };
        assert!(Diagnoser::new(kb, config).is_err());
    }
}
