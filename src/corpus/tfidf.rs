use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

use crate::corpus::document::Document;
use crate::corpus::token::Model;
use crate::corpus::Corpus;
use crate::error::{CorpusError, CorpusResult};

/// A TF-IDF weighted term vector derived from one live document.
///
/// Derived freshly from corpus state on every call; never cached.
#[derive(Debug, Clone, Serialize)]
pub struct TfIdfVector {
    /// Id of the source document.
    pub id: String,
    /// Model of the source document.
    pub model: Model,
    /// Term to TF-IDF weight.
    pub weights: IndexMap<String, f64>,
    /// Sum of squared weights, the squared L2 norm. Kept as the square to
    /// avoid a second pass during cosine scoring.
    pub norm_sq: f64,
}

impl TfIdfVector {
    /// Weight of `term`, zero when absent.
    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    /// L2 norm of the vector.
    pub fn norm(&self) -> f64 {
        self.norm_sq.sqrt()
    }

    /// Whether the vector has no terms with any weight.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Corpus {
    /// Derive one TF-IDF vector per live document, in insertion order.
    ///
    /// An empty corpus yields an empty vec. Documents are derived in
    /// parallel; each derivation is a pure read of corpus state.
    pub fn vectorize_all(&self) -> Vec<TfIdfVector> {
        let num_docs = self.documents.len() as f64;
        self.documents
            .par_iter()
            .map(|doc| self.derive(doc, num_docs))
            .collect()
    }

    /// Derive the TF-IDF vector of a single live document.
    pub fn vectorize(&self, id: &str) -> CorpusResult<TfIdfVector> {
        let doc = self
            .get(id)
            .ok_or_else(|| CorpusError::NotFound(id.to_string()))?;
        Ok(self.derive(doc, self.documents.len() as f64))
    }

    fn derive(&self, doc: &Document, num_docs: f64) -> TfIdfVector {
        let mut weights = IndexMap::with_capacity(doc.term_counts.len());
        let mut norm_sq = 0.0;
        let token_total = doc.token_total as f64;
        for (term, &count) in &doc.term_counts {
            // df >= 1 for any term held by a live document
            let df = self.doc_frequency.get(term).copied().unwrap_or(0);
            if df == 0 {
                continue;
            }
            let tf = count as f64 / token_total;
            let idf = (num_docs / df as f64).ln();
            let weight = tf * idf;
            norm_sq += weight * weight;
            weights.insert(term.clone(), weight);
        }
        TfIdfVector {
            id: doc.id.clone(),
            model: doc.model,
            weights,
            norm_sq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn empty_corpus_yields_no_vectors() {
        let corpus = Corpus::new();
        assert!(corpus.vectorize_all().is_empty());
    }

    #[test]
    fn ubiquitous_term_has_zero_weight() {
        let mut corpus = Corpus::new();
        corpus.add("shared alpha", Some("1"), false).unwrap();
        corpus.add("shared beta", Some("2"), false).unwrap();
        corpus.add("shared gamma", Some("3"), false).unwrap();

        for vector in corpus.vectorize_all() {
            assert!(vector.weight("shared").abs() < EPS);
        }
    }

    #[test]
    fn weights_match_tf_times_idf() {
        let mut corpus = Corpus::new();
        corpus.add("cat cat dog", Some("1"), false).unwrap();
        corpus.add("cat bird", Some("2"), false).unwrap();

        let vector = corpus.vectorize("1").unwrap();
        // cat: tf 2/3, df 2 of 2 docs -> idf ln(1) = 0
        assert!(vector.weight("cat").abs() < EPS);
        // dog: tf 1/3, df 1 of 2 docs -> idf ln(2)
        let expected_dog = (1.0 / 3.0) * 2.0f64.ln();
        assert!((vector.weight("dog") - expected_dog).abs() < EPS);
        assert!((vector.norm_sq - expected_dog * expected_dog).abs() < EPS);
    }

    #[test]
    fn vectors_follow_insertion_order() {
        let mut corpus = Corpus::new();
        corpus.add("one", Some("a"), false).unwrap();
        corpus.add("two", Some("b"), false).unwrap();
        corpus.add("three", Some("c"), false).unwrap();

        let vectors = corpus.vectorize_all();
        let ids: Vec<&str> = vectors.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn vectorize_unknown_id() {
        let corpus = Corpus::new();
        assert!(matches!(
            corpus.vectorize("ghost"),
            Err(CorpusError::NotFound(_))
        ));
    }

    #[test]
    fn document_with_no_countable_terms_has_zero_norm() {
        let mut corpus = Corpus::new();
        corpus.load_stop_words(["everything"]);
        corpus.add("everything everything", Some("1"), false).unwrap();

        let vector = corpus.vectorize("1").unwrap();
        assert!(vector.is_empty());
        assert_eq!(vector.norm_sq, 0.0);
    }

    #[test]
    fn vectorize_all_is_wrapped_by_vectorize() {
        let mut corpus = Corpus::new();
        corpus.add("alpha beta", Some("1"), false).unwrap();
        corpus.add("beta gamma", Some("2"), false).unwrap();

        let all = corpus.vectorize_all();
        let single = corpus.vectorize("2").unwrap();
        let from_all = all.iter().find(|v| v.id == "2").unwrap();
        assert_eq!(single.weights, from_all.weights);
        assert!((single.norm_sq - from_all.norm_sq).abs() < EPS);
    }
}
