//! Text Normalization
//!
//! Converts free-text symptom descriptions into a canonical token string:
//! lowercase, stopword-free, punctuation-free, numeral-free and lemmatized,
//! with domain technical terms pinned to their canonical spelling.
//!
//! Pipeline per token:
//! 1. Technical term? → emit canonical term verbatim
//! 2. Stopword, punctuation or number? → drop
//! 3. Otherwise lemmatize; a lemma that is a technical term emits its
//!    canonical term, a lemma that is a stopword or number is dropped,
//!    anything else is emitted as is
//!
//! Canonical terms and lemmas are both fixed points of this pipeline, so
//! `normalize(normalize(x)) == normalize(x)`.

use rustc_hash::{FxHashMap, FxHashSet};
use unicode_segmentation::UnicodeSegmentation;

use crate::utils::lemmatizer::Lemmatizer;
use crate::utils::lookup_tables::{NUMBER_WORDS, STOPWORDS, TECHNICAL_TERMS};

/// A word-level token with the lexical flags used for filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub is_stop: bool,
    pub is_punct: bool,
    pub like_num: bool,
}

/// Normalizer for Portuguese symptom text
///
/// Immutable after construction; safe to share across threads.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    technical_terms: FxHashMap<String, String>,
    stopwords: FxHashSet<&'static str>,
    number_words: FxHashSet<&'static str>,
    lemmatizer: Lemmatizer,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    /// Normalizer with the built-in technical term table
    pub fn new() -> Self {
        Self::with_terms(
            TECHNICAL_TERMS
                .iter()
                .map(|(surface, canonical)| (surface.to_string(), canonical.to_string())),
        )
    }

    /// Normalizer with a custom canonicalization table
    pub fn with_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let technical_terms: FxHashMap<String, String> = terms.into_iter().collect();
        // Surface terms and canonical terms both lemmatize to themselves
        let vocabulary = technical_terms
            .iter()
            .flat_map(|(surface, canonical)| [surface.clone(), canonical.clone()]);
        let lemmatizer = Lemmatizer::with_vocabulary(vocabulary);

        Self {
            technical_terms,
            stopwords: STOPWORDS.iter().copied().collect(),
            number_words: NUMBER_WORDS.iter().copied().collect(),
            lemmatizer,
        }
    }

    /// Canonical term for a surface form, if the table lists it
    pub fn canonical_term(&self, surface: &str) -> Option<&str> {
        self.technical_terms.get(surface).map(|s| s.as_str())
    }

    /// Lowercase and split into word-level tokens (whitespace dropped)
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let lowered = text.to_lowercase();

        lowered
            .split_word_bounds()
            .filter(|piece| !piece.trim().is_empty())
            .map(|piece| Token {
                text: piece.to_string(),
                is_stop: self.stopwords.contains(piece),
                is_punct: !piece.chars().any(char::is_alphanumeric),
                like_num: self.like_num(piece),
            })
            .collect()
    }

    /// Normalize text into its surviving tokens, in input order
    pub fn normalize_tokens(&self, text: &str) -> Vec<String> {
        let mut lemmas = Vec::new();

        for token in self.tokenize(text) {
            if let Some(canonical) = self.canonical_term(&token.text) {
                lemmas.push(canonical.to_string());
                continue;
            }

            if token.is_stop || token.is_punct || token.like_num {
                continue;
            }

            let lemma = self.lemmatizer.lemmatize(&token.text);
            if let Some(canonical) = self.canonical_term(&lemma) {
                lemmas.push(canonical.to_string());
                continue;
            }

            if self.stopwords.contains(lemma.as_str()) || self.like_num(&lemma) {
                continue;
            }
            lemmas.push(lemma);
        }

        lemmas
    }

    /// Normalize text into a space-joined token string
    ///
    /// Empty or all-stopword input yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        self.normalize_tokens(text).join(" ")
    }

    /// Digits (with optional sign, thousands/decimal separators), simple
    /// fractions and spelled-out numerals
    fn like_num(&self, text: &str) -> bool {
        let unsigned = text.trim_start_matches(['+', '-', '±', '~']);
        let digits: String = unsigned.chars().filter(|c| *c != ',' && *c != '.').collect();
        if !digits.is_empty() && digits.chars().all(char::is_numeric) {
            return true;
        }

        if let Some((num, denom)) = unsigned.split_once('/') {
            let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
            if all_digits(num) && all_digits(denom) {
                return true;
            }
        }

        self.number_words.contains(unsigned)
    }
}
