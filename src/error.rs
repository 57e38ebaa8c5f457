use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Errors surfaced by corpus mutations, configuration and similarity scoring.
///
/// Configuration errors (`InvalidModel`, `InvalidWidth`) are non-fatal: the
/// previously valid configuration stays in effect. Mutation errors leave no
/// partial state behind.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Unrecognized tokenization model name.
    #[error("unknown tokenization model: {0:?}")]
    InvalidModel(String),

    /// N-gram width below 1.
    #[error("n-gram width must be at least 1, got {0}")]
    InvalidWidth(usize),

    /// A document with this id is already live.
    #[error("duplicate document id: {0:?}")]
    DuplicateId(String),

    /// No live document with the named id(s).
    #[error("document not found: {0}")]
    NotFound(String),

    /// The document has no countable terms, its vector cannot be normalized.
    #[error("document {0:?} has an empty vector")]
    EmptyVector(String),

    /// Document frequency bookkeeping would underflow. Indicates a bug in
    /// mutation sequencing, never a recoverable user-facing condition.
    #[error("document frequency underflow for term {0:?}")]
    InvariantViolation(String),

    /// File extension outside the allow-list. Warning-level in the loader
    /// path: the file is skipped and ingestion continues.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(PathBuf),

    /// Filesystem error while loading sources or snapshots.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed synonym file or snapshot.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
