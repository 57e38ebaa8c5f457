use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CorpusResult;

/// Static term-to-synonyms mapping consulted during similarity scoring.
///
/// Lookups are one-directional: only the source vector's terms are expanded.
/// A symmetric table needs explicit entries in both directions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynonymTable {
    entries: IndexMap<String, Vec<String>>,
}

/// On-disk shape of one synonym entry: `{"synonyms": ["..."]}`.
#[derive(Debug, Deserialize)]
struct SynonymEntry {
    synonyms: Vec<String>,
}

impl SynonymTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the synonyms of a canonical term, replacing any prior entry.
    pub fn insert<S, I, T>(&mut self, term: S, synonyms: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.entries.insert(
            term.into(),
            synonyms.into_iter().map(Into::into).collect(),
        );
    }

    /// Synonyms of `term`, in file/insertion order.
    pub fn get(&self, term: &str) -> Option<&[String]> {
        self.entries.get(term).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the synonym file format: a JSON object mapping each canonical
    /// term to `{"synonyms": [...]}`.
    pub fn from_json_str(text: &str) -> CorpusResult<Self> {
        let raw: IndexMap<String, SynonymEntry> = serde_json::from_str(text)?;
        let entries = raw
            .into_iter()
            .map(|(term, entry)| (term, entry.synonyms))
            .collect();
        Ok(SynonymTable { entries })
    }

    /// Read and parse a synonym file.
    pub fn load_json(path: impl AsRef<Path>) -> CorpusResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
