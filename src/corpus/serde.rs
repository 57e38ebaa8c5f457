use std::path::Path;

use ::serde::{Deserialize, Serialize};
use indexmap::IndexMap;

use crate::corpus::document::Document;
use crate::corpus::synonyms::SynonymTable;
use crate::corpus::token::{Model, StopWordSet};
use crate::corpus::Corpus;
use crate::error::CorpusResult;

/// Detached, serializable mirror of corpus state.
///
/// Holds everything needed to rehydrate a `Corpus`: the documents with
/// their frozen models and counts, plus the active configuration. The
/// document-frequency map is not stored; rehydration recomputes it from
/// the documents, so a snapshot can never carry an inconsistent map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSnapshot {
    pub documents: Vec<Document>,
    pub model: Model,
    pub ngram_width: usize,
    /// Sorted for stable output.
    pub stop_words: Vec<String>,
    pub synonyms: SynonymTable,
}

impl CorpusSnapshot {
    /// Rebuild a corpus, recomputing `doc_frequency` from the documents.
    pub fn into_corpus(self) -> Corpus {
        let mut doc_frequency: IndexMap<String, u64> = IndexMap::new();
        for doc in &self.documents {
            for term in doc.term_counts.keys() {
                *doc_frequency.entry(term.clone()).or_insert(0) += 1;
            }
        }
        Corpus {
            documents: self.documents,
            doc_frequency,
            model: self.model,
            ngram_width: self.ngram_width,
            stop_words: self.stop_words.into_iter().collect(),
            synonyms: self.synonyms,
        }
    }

    pub fn to_json(&self) -> CorpusResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> CorpusResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Write the snapshot as a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> CorpusResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a snapshot back from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> CorpusResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

impl Corpus {
    /// Capture the current state as a detached snapshot.
    pub fn snapshot(&self) -> CorpusSnapshot {
        let mut stop_words: Vec<String> = self.stop_words.iter().cloned().collect();
        stop_words.sort();
        CorpusSnapshot {
            documents: self.documents.clone(),
            model: self.model,
            ngram_width: self.ngram_width,
            stop_words,
            synonyms: self.synonyms.clone(),
        }
    }
}
