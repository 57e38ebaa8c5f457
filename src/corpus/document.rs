use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::corpus::token::Model;

/// A tokenized document and its in-document term statistics.
///
/// The tokenization model and width are frozen at add time; reconfiguring
/// the corpus afterwards never reinterprets a live document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique id among live documents.
    pub id: String,
    /// Model in effect when the document was added.
    pub model: Model,
    /// N-gram width in effect when the document was added.
    pub ngram_width: usize,
    /// Term to in-document occurrence count. Stop words never appear here.
    pub term_counts: IndexMap<String, u64>,
    /// Sum of `term_counts` values; the term-frequency denominator.
    pub token_total: u64,
}

impl Document {
    /// Build a document from an already-tokenized term sequence.
    pub fn from_terms(id: String, model: Model, ngram_width: usize, terms: Vec<String>) -> Self {
        let mut term_counts: IndexMap<String, u64> = IndexMap::new();
        let mut token_total = 0u64;
        for term in terms {
            *term_counts.entry(term).or_insert(0) += 1;
            token_total += 1;
        }
        Document {
            id,
            model,
            ngram_width,
            term_counts,
            token_total,
        }
    }

    /// Occurrence count of `term` within this document.
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Whether this document holds `term` with a positive count.
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count(term) > 0
    }

    /// Number of distinct terms.
    pub fn distinct_terms(&self) -> usize {
        self.term_counts.len()
    }
}
