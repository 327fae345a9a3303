// Pipeline Integration Tests
//
// Purpose: End-to-end diagnosis over the bundled disease dataset
// Run with: cargo test --test pipeline_integration_tests

use cotton_diagnosis::{
    Diagnoser, DiagnosisOutcome, InvalidReason, KnowledgeBase, PipelineConfig, TextNormalizer,
};
use std::path::Path;
use std::sync::Arc;

// Helper: Train on the bundled CSV plus supplemental records
fn bundled_diagnoser() -> Diagnoser {
    let csv = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/doencas_algodoeiro.csv");
    let kb = KnowledgeBase::load(&csv).expect("Failed to load bundled dataset");
    Diagnoser::new(kb, PipelineConfig::default()).expect("Failed to train pipeline")
}

// =========================================================================
// Section 1: Reference Scenarios
// =========================================================================

#[test]
fn test_yellow_spots_and_chlorosis() {
    let diagnoser = bundled_diagnoser();
    let input = "minhas folhas estão com manchas amarelas e clorose";

    assert_eq!(diagnoser.normalize(input), "folha mancha amarelo clorose");
    assert!(diagnoser.is_relevant(input));

    match diagnoser.diagnose(input).unwrap() {
        DiagnosisOutcome::Diagnosis { disease, description } => {
            assert_eq!(disease, "Clorose Ferrica");
            assert_eq!(diagnoser.diseases().description(&disease), Some(description.as_str()));
        }
        other => panic!("Expected a diagnosis, got {:?}", other),
    }
}

#[test]
fn test_off_topic_question() {
    let diagnoser = bundled_diagnoser();
    let explanation = diagnoser.explain("qual é a capital da bahia").unwrap();

    assert_eq!(explanation.outcome, DiagnosisOutcome::OffTopic);
    // Classifier never ran
    assert!(explanation.ranking.is_empty());
    assert!(!explanation.gate.unwrap().passed);
}

#[test]
fn test_exit_keyword() {
    let diagnoser = bundled_diagnoser();
    assert_eq!(diagnoser.diagnose("sair").unwrap(), DiagnosisOutcome::Exit);
    assert_eq!(diagnoser.diagnose("Sair").unwrap(), DiagnosisOutcome::Exit);
    // Only the whole input counts
    assert_ne!(diagnoser.diagnose("quero sair").unwrap(), DiagnosisOutcome::Exit);
}

#[test]
fn test_numeric_input_rejected_before_gating() {
    let diagnoser = bundled_diagnoser();
    let explanation = diagnoser.explain("123 456").unwrap();

    assert_eq!(
        explanation.outcome,
        DiagnosisOutcome::InvalidInput { reason: InvalidReason::TooShortOrNumeric }
    );
    assert!(explanation.gate.is_none());
}

// =========================================================================
// Section 2: Properties
// =========================================================================

#[test]
fn test_digits_and_whitespace_never_diagnosed() {
    let diagnoser = bundled_diagnoser();
    for input in ["0", "42", "1234567890", " 1 2 3 4 ", "\t99\n88", "   "] {
        let outcome = diagnoser.diagnose(input).unwrap();
        assert_eq!(
            outcome,
            DiagnosisOutcome::InvalidInput { reason: InvalidReason::TooShortOrNumeric },
            "input {:?}",
            input
        );
    }
}

#[test]
fn test_short_input_is_invalid() {
    let diagnoser = bundled_diagnoser();
    for input in ["", "a", "ab", "sol", "  pé  "] {
        assert_eq!(
            diagnoser.diagnose(input).unwrap(),
            DiagnosisOutcome::InvalidInput { reason: InvalidReason::TooShortOrNumeric },
            "input {:?}",
            input
        );
    }
}

#[test]
fn test_normalize_is_idempotent() {
    let normalizer = TextNormalizer::new();
    let samples = [
        "minhas folhas estão com manchas amarelas e clorose",
        "Plantas jovens tombando com lesões escuras no colo!",
        "Enrolamento foliar, espessamento das nervuras e necrosamento",
        "manchas angulares com bordas aquosas e centro necrosado",
        "as raízes estão podres há 3 semanas",
        "folhas cloróticos com necrosamentos e tortuosidades",
        "os comandos que apresentas",
        "",
    ];
    for text in samples {
        let once = normalizer.normalize(text);
        assert_eq!(normalizer.normalize(&once), once, "input {:?}", text);
    }
}

#[test]
fn test_canonical_terms_ignore_context() {
    let normalizer = TextNormalizer::new();
    for context in ["", "folhas com ", "a planta tem muito ", "e "] {
        let normalized = normalizer.normalize(&format!("{}clorótico", context));
        assert_eq!(normalized.split(' ').last(), Some("clorose"));
    }
}

#[test]
fn test_keywords_alone_below_token_floor() {
    let diagnoser = bundled_diagnoser();
    assert!(!diagnoser.is_relevant("folha clorose"));
    assert_eq!(diagnoser.diagnose("folha clorose").unwrap(), DiagnosisOutcome::OffTopic);
}

#[test]
fn test_every_diagnosis_has_stored_description() {
    let diagnoser = bundled_diagnoser();
    for record in diagnoser.diseases().records() {
        if let DiagnosisOutcome::Diagnosis { disease, description } =
            diagnoser.diagnose(&record.characteristics).unwrap()
        {
            assert_eq!(diagnoser.diseases().get(&disease).unwrap().description, description);
        }
    }
}

// =========================================================================
// Section 3: Batch and Concurrency
// =========================================================================

#[test]
fn test_batch_matches_sequential() {
    let diagnoser = bundled_diagnoser();
    let inputs = vec![
        "minhas folhas estão com manchas amarelas e clorose",
        "sair",
        "qual é a capital da bahia",
        "123 456",
        "plantas jovens tombando com lesões escuras no colo",
    ];

    let batch = diagnoser.diagnose_batch(&inputs);
    assert_eq!(batch.len(), inputs.len());
    for (input, result) in inputs.iter().zip(batch) {
        assert_eq!(result.unwrap(), diagnoser.diagnose(input).unwrap());
    }
}

#[test]
fn test_shared_across_threads() {
    let diagnoser = Arc::new(bundled_diagnoser());
    let input = "minhas folhas estão com manchas amarelas e clorose";
    let expected = diagnoser.diagnose(input).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let diagnoser = Arc::clone(&diagnoser);
            std::thread::spawn(move || diagnoser.diagnose(input).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
