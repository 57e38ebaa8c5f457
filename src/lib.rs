/// This crate is an incremental TF-IDF corpus engine with synonym-aware
/// cosine similarity.
pub mod corpus;
pub mod error;
pub mod loader;

/// Corpus of documents with incremental document-frequency statistics
/// The top-level struct of this crate, owning the document collection and
/// the global term-to-document-count map.
///
/// Internally, it holds:
/// - The live documents, in insertion order
/// - The document-frequency map (documents containing each term)
/// - The default tokenization model and n-gram width
/// - The active stop-word set and synonym table
///
/// Mutations (`add`, `update`, `remove`) keep the document-frequency map
/// exactly consistent: adding a document bumps each distinct term once,
/// removing decrements and deletes entries that reach zero.
///
/// # Concurrency
/// Single-writer and synchronous: mutations take `&mut self`, derivations
/// take `&self`. Wrap the corpus in a lock if concurrent ingestion is
/// needed.
pub use corpus::Corpus;

/// A single tokenized document
/// Carries its id, the model and width frozen at add time, its term counts
/// and the total countable token count.
pub use corpus::document::Document;

/// Tokenization model
/// A closed variant over `bag`, `ngram-char` and `ngram-word`. The n-gram
/// models chunk without overlap: the final chunk keeps the remainder.
pub use corpus::token::Model;

/// Stop-word filter
/// Terms in this set are dropped during tokenization and never reach any
/// statistic. A built-in default English list is available.
pub use corpus::token::StopWordSet;

/// Tokenize text under a model
/// Strips non-alphanumeric characters, lower-cases and splits or chunks
/// according to the model. Stop words are filtered from the word stream
/// before grouping.
pub use corpus::token::tokenize;

/// TF-IDF weighted term vector
/// Derived freshly from corpus state by `vectorize_all` / `vectorize`;
/// carries the squared L2 norm so cosine scoring needs no second pass.
pub use corpus::tfidf::TfIdfVector;

/// Cosine similarity with optional synonym fallback
/// Walks the source vector's terms; a term missing from the target falls
/// back to the first matching synonym at half weight. One-directional by
/// design.
pub use corpus::similarity::cosine_similarity;

/// Synonym table
/// A static term-to-synonyms mapping loaded from JSON
/// (`{"term": {"synonyms": [...]}}`), consulted read-only during scoring.
pub use corpus::synonyms::SynonymTable;

/// Detached corpus snapshot
/// Serializable mirror of corpus state for JSON persistence. Rehydration
/// recomputes the document-frequency map from the documents.
pub use corpus::serde::CorpusSnapshot;

/// Error type and result alias for all corpus operations.
pub use error::{CorpusError, CorpusResult};
