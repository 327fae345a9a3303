//! Text utilities shared by the classifiers and the gate
//!
//! - Normalization: Tokenization, filtering, canonical terms, lemmas
//! - Lemmatizer: Lexicon and Snowball based Portuguese lemmas
//! - Lookup tables: Stopwords, technical terms, keyword fragments

pub mod lemmatizer;
pub mod lookup_tables;
pub mod normalization;

// Re-export commonly used types
pub use lemmatizer::Lemmatizer;
pub use normalization::{TextNormalizer, Token};
