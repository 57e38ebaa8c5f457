pub mod document;
pub mod serde;
pub mod similarity;
pub mod synonyms;
pub mod tfidf;
pub mod token;

use std::path::Path;

use indexmap::IndexMap;
use rand::Rng;

use crate::error::{CorpusError, CorpusResult};
use crate::loader;
use crate::corpus::document::Document;
use crate::corpus::synonyms::SynonymTable;
use crate::corpus::token::{tokenize, Model, StopWordSet};

/// A mutable collection of documents with incrementally maintained
/// corpus-wide document-frequency statistics.
///
/// For every term `T`, `doc_frequency[T]` equals the number of live
/// documents holding `T` with a positive count. `add`, `update` and
/// `remove` keep this exact; an entry never stays in the map at zero.
///
/// Mutations take `&mut self` and derivations take `&self`, so the borrow
/// checker enforces the single-writer model: no reader can observe a
/// document mid-update.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Live documents in insertion order.
    pub(crate) documents: Vec<Document>,
    /// Term to count of documents containing it at least once.
    pub(crate) doc_frequency: IndexMap<String, u64>,
    /// Default model for documents added from now on.
    pub(crate) model: Model,
    /// Default n-gram width, always >= 1.
    pub(crate) ngram_width: usize,
    pub(crate) stop_words: StopWordSet,
    pub(crate) synonyms: SynonymTable,
}

impl Default for Corpus {
    fn default() -> Self {
        Self::new()
    }
}

impl Corpus {
    /// An empty corpus: bag-of-words, width 1, no stop words, no synonyms.
    pub fn new() -> Self {
        Corpus {
            documents: Vec::new(),
            doc_frequency: IndexMap::new(),
            model: Model::Bag,
            ngram_width: 1,
            stop_words: StopWordSet::new(),
            synonyms: SynonymTable::new(),
        }
    }

    /// Number of live documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Live documents in insertion order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The document with the given id, if live.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Whether a live document has this id.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of live documents containing `term` at least once.
    pub fn doc_frequency(&self, term: &str) -> u64 {
        self.doc_frequency.get(term).copied().unwrap_or(0)
    }

    /// Current vocabulary size (number of distinct live terms).
    pub fn vocab_size(&self) -> usize {
        self.doc_frequency.len()
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn ngram_width(&self) -> usize {
        self.ngram_width
    }

    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }
}

/// Configuration operations. Invalid input leaves the prior configuration
/// in effect; live documents are never affected since model and width are
/// captured per document at add time.
impl Corpus {
    /// Set the default tokenization model by name
    /// (`bag | ngram-char | ngram-word`, case-insensitive).
    pub fn set_model(&mut self, name: &str) -> CorpusResult<()> {
        self.model = Model::parse(name)?;
        Ok(())
    }

    /// Set the default n-gram width. Must be at least 1.
    pub fn set_ngram_width(&mut self, n: usize) -> CorpusResult<()> {
        if n < 1 {
            return Err(CorpusError::InvalidWidth(n));
        }
        self.ngram_width = n;
        Ok(())
    }

    /// Replace the active stop-word set. An empty list installs the
    /// built-in default English list.
    pub fn load_stop_words<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = StopWordSet::from_terms(terms);
        self.stop_words = if set.is_empty() {
            StopWordSet::default_english()
        } else {
            set
        };
    }

    /// Replace the active stop-word set from a comma-separated file.
    /// An empty file installs the built-in default English list.
    pub fn load_stop_words_csv(&mut self, path: impl AsRef<Path>) -> CorpusResult<()> {
        let set = StopWordSet::load_csv(path)?;
        self.stop_words = if set.is_empty() {
            StopWordSet::default_english()
        } else {
            set
        };
        Ok(())
    }

    /// Replace the active synonym table.
    pub fn load_synonyms(&mut self, table: SynonymTable) {
        self.synonyms = table;
    }

    /// Replace the active synonym table from a JSON file
    /// (`{"term": {"synonyms": [...]}}`).
    pub fn load_synonyms_json(&mut self, path: impl AsRef<Path>) -> CorpusResult<()> {
        self.synonyms = SynonymTable::load_json(path)?;
        Ok(())
    }
}

/// Mutations. Each either fully completes or is rejected before any map is
/// touched.
impl Corpus {
    /// Add a document and return its id.
    ///
    /// When `id` is `None` a fresh id is generated; a supplied id colliding
    /// with a live document is `DuplicateId`. The text is tokenized under
    /// the corpus's current model and width, and `doc_frequency` is bumped
    /// once per distinct term.
    pub fn add(
        &mut self,
        text: &str,
        id: Option<&str>,
        remove_numbers: bool,
    ) -> CorpusResult<String> {
        let id = match id {
            Some(id) => {
                if self.contains(id) {
                    return Err(CorpusError::DuplicateId(id.to_string()));
                }
                id.to_string()
            }
            None => self.generate_id(),
        };
        let terms = tokenize(
            text,
            self.model,
            self.ngram_width,
            &self.stop_words,
            remove_numbers,
        )?;
        let doc = Document::from_terms(id.clone(), self.model, self.ngram_width, terms);
        for term in doc.term_counts.keys() {
            *self.doc_frequency.entry(term.clone()).or_insert(0) += 1;
        }
        self.documents.push(doc);
        Ok(id)
    }

    /// Remove the document with this id.
    ///
    /// Returns `false` without touching anything when no live document has
    /// the id. Each distinct term's document frequency is decremented, and
    /// the entry is deleted when it reaches exactly zero. A decrement that
    /// would underflow is `InvariantViolation` and aborts before mutating.
    pub fn remove(&mut self, id: &str) -> CorpusResult<bool> {
        let Some(pos) = self.documents.iter().position(|d| d.id == id) else {
            tracing::debug!(id, "remove: no live document with this id");
            return Ok(false);
        };
        // Verify every decrement is possible before applying any of them.
        for term in self.documents[pos].term_counts.keys() {
            if self.doc_frequency.get(term).copied().unwrap_or(0) == 0 {
                return Err(CorpusError::InvariantViolation(term.clone()));
            }
        }
        let doc = self.documents.remove(pos);
        for term in doc.term_counts.keys() {
            if let Some(count) = self.doc_frequency.get_mut(term) {
                if *count > 1 {
                    *count -= 1;
                } else {
                    self.doc_frequency.shift_remove(term);
                }
            }
        }
        Ok(true)
    }

    /// Replace the document with this id: remove it (a no-op when absent)
    /// and re-add the new text under the same id. Doubles as add-if-absent.
    pub fn update(&mut self, text: &str, id: &str, remove_numbers: bool) -> CorpusResult<()> {
        self.remove(id)?;
        self.add(text, Some(id), remove_numbers)?;
        Ok(())
    }

    /// Ingest a file or directory via the loader, adding each accepted file
    /// under its base name. Unsupported and unreadable files are skipped
    /// with a warning. Returns the ids added, in traversal order.
    pub fn add_from_source(
        &mut self,
        path: impl AsRef<Path>,
        remove_numbers: bool,
        recurse: bool,
    ) -> CorpusResult<Vec<String>> {
        let sources = loader::collect(path.as_ref(), recurse, &[])?;
        let mut ids = Vec::with_capacity(sources.len());
        for source in sources {
            ids.push(self.add(&source.text, Some(&source.name), remove_numbers)?);
        }
        Ok(ids)
    }

    /// Generate an id distinct from every live document id. Candidates are
    /// random and retried until a miss; corpora are small enough that this
    /// terminates quickly.
    fn generate_id(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let candidate = format!("doc-{:08x}", rng.gen::<u32>());
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}
