//! Disease Data Loading
//!
//! Loads disease records (name, characteristics, description) from CSV using
//! Polars, appends the hand-curated supplemental records and normalizes the
//! characteristics text for training.
//!
//! CSV columns: `Doença`, `Características`, `Descrição`.
//! Rows with a missing or blank field are dropped.

use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use std::io::Cursor;
use std::path::Path;

use crate::error::{DiagnosisError, DiagnosisResult};
use crate::utils::normalization::TextNormalizer;

pub const NAME_COL: &str = "Doença";
pub const CHARACTERISTICS_COL: &str = "Características";
pub const DESCRIPTION_COL: &str = "Descrição";

/// Hand-curated records appended to every dataset: (name, characteristics, description)
pub static SUPPLEMENTAL_RECORDS: &[(&str, &str, &str)] = &[
    (
        "Clorose Ferrica",
        "folhas jovens com clorose internerval e deformações",
        "Deficiência de ferro causando amarelecimento entre nervuras",
    ),
    (
        "Tombamento",
        "plantas jovens tombando com lesões escuras no colo",
        "Doença de solo que afeta plântulas",
    ),
    (
        "Mancha Angular",
        "manchas angulares com bordas aquosas e centro necrosado",
        "Doença bacteriana comum em condições úmidas",
    ),
    (
        "Míldio",
        "manchas esbranquiçadas na face inferior das folhas",
        "Doença fúngica que forma esporos brancos",
    ),
    (
        "Vírus do Enrolamento",
        "enrolamento foliar com espessamento das nervuras",
        "Doença viral transmitida por insetos",
    ),
];

/// One known disease
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DiseaseRecord {
    pub name: String,
    /// Characteristics as written in the source
    pub characteristics: String,
    /// Characteristics after text normalization (training input)
    pub normalized_characteristics: String,
    pub description: String,
}

/// Immutable set of disease records with unique names
#[derive(Debug, Clone)]
pub struct DiseaseData {
    records: Vec<DiseaseRecord>,
    /// Disease name → position in `records`
    by_name: FxHashMap<String, usize>,
}

impl DiseaseData {
    /// Load records from a CSV file and append the supplemental records
    pub fn load(path: impl AsRef<Path>, normalizer: &TextNormalizer) -> Result<Self> {
        let path = path.as_ref();
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.into()))
            .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
            .finish()
            .with_context(|| format!("Failed to load disease CSV: {:?}", path))?;

        let data = Self::from_frame(&df, normalizer)?;
        tracing::info!(
            "Loaded {} disease records from {:?} ({} supplemental)",
            data.len(),
            path,
            SUPPLEMENTAL_RECORDS.len()
        );
        Ok(data)
    }

    /// Load records from in-memory CSV bytes and append the supplemental records
    pub fn from_csv_bytes(bytes: &[u8], normalizer: &TextNormalizer) -> Result<Self> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()
            .with_context(|| "Failed to parse disease CSV")?;

        Self::from_frame(&df, normalizer)
    }

    /// Supplemental records only
    pub fn builtin(normalizer: &TextNormalizer) -> DiagnosisResult<Self> {
        Self::from_rows(supplemental_rows(), normalizer)
    }

    /// Build from (name, characteristics, description) rows, in order
    ///
    /// Fails on duplicate names: the classifier label space must map
    /// one-to-one onto records.
    pub fn from_rows<I>(rows: I, normalizer: &TextNormalizer) -> DiagnosisResult<Self>
    where
        I: IntoIterator<Item = (String, String, String)>,
    {
        let mut records = Vec::new();
        let mut by_name = FxHashMap::default();

        for (name, characteristics, description) in rows {
            if by_name.contains_key(&name) {
                return Err(DiagnosisError::DuplicateLabel(name));
            }
            by_name.insert(name.clone(), records.len());

            let normalized_characteristics = normalizer.normalize(&characteristics);
            records.push(DiseaseRecord {
                name,
                characteristics,
                normalized_characteristics,
                description,
            });
        }

        if records.is_empty() {
            return Err(DiagnosisError::EmptyCorpus("disease records"));
        }

        Ok(Self { records, by_name })
    }

    fn from_frame(df: &DataFrame, normalizer: &TextNormalizer) -> Result<Self> {
        let names = string_column(df, NAME_COL)?;
        let characteristics = string_column(df, CHARACTERISTICS_COL)?;
        let descriptions = string_column(df, DESCRIPTION_COL)?;

        let mut rows = Vec::with_capacity(df.height() + SUPPLEMENTAL_RECORDS.len());
        let mut dropped = 0usize;

        for idx in 0..df.height() {
            match (names.get(idx), characteristics.get(idx), descriptions.get(idx)) {
                (Some(name), Some(chars), Some(desc))
                    if !name.trim().is_empty() && !chars.trim().is_empty() && !desc.trim().is_empty() =>
                {
                    rows.push((name.to_string(), chars.to_string(), desc.to_string()));
                }
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::warn!("Dropped {} disease rows with missing fields", dropped);
        }

        rows.extend(supplemental_rows());
        Ok(Self::from_rows(rows, normalizer)?)
    }

    pub fn records(&self) -> &[DiseaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact, case-sensitive lookup by disease name
    pub fn get(&self, name: &str) -> Option<&DiseaseRecord> {
        self.by_name.get(name).map(|&idx| &self.records[idx])
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.get(name).map(|r| r.description.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }
}

fn supplemental_rows() -> impl Iterator<Item = (String, String, String)> {
    SUPPLEMENTAL_RECORDS
        .iter()
        .map(|(n, c, d)| (n.to_string(), c.to_string(), d.to_string()))
}

fn string_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    df.column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .str()
        .with_context(|| format!("Column '{}' is not string type", name))
}
