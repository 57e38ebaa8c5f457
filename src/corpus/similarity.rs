use crate::corpus::synonyms::SynonymTable;
use crate::corpus::tfidf::TfIdfVector;
use crate::corpus::Corpus;
use crate::error::{CorpusError, CorpusResult};

/// Cosine similarity between two derived vectors, with an optional synonym
/// fallback.
///
/// The dot product walks the terms of `a`; a term missing from `b` falls
/// back to the first of its synonyms present in `b`, weighted by 0.5. The
/// fallback is deliberately one-directional and first-match-only: only the
/// source side's synonyms are consulted, and multiple matches are neither
/// averaged nor maxed. `b`'s terms without a counterpart in `a` contribute
/// nothing.
///
/// Either side having a zero norm is `EmptyVector`.
pub fn cosine_similarity(
    a: &TfIdfVector,
    b: &TfIdfVector,
    synonyms: Option<&SynonymTable>,
) -> CorpusResult<f64> {
    if a.norm_sq == 0.0 {
        return Err(CorpusError::EmptyVector(a.id.clone()));
    }
    if b.norm_sq == 0.0 {
        return Err(CorpusError::EmptyVector(b.id.clone()));
    }
    let dot: f64 = a
        .weights
        .iter()
        .map(|(term, &weight)| match b.weights.get(term) {
            Some(&other) => weight * other,
            None => weight * synonym_fallback(term, b, synonyms),
        })
        .sum();
    Ok(dot / (a.norm_sq.sqrt() * b.norm_sq.sqrt()))
}

/// Weight contributed by the first synonym of `term` present in `b`,
/// halved. Zero when the table has no entry or no synonym matches.
fn synonym_fallback(term: &str, b: &TfIdfVector, synonyms: Option<&SynonymTable>) -> f64 {
    let Some(entries) = synonyms.and_then(|table| table.get(term)) else {
        return 0.0;
    };
    entries
        .iter()
        .find_map(|synonym| b.weights.get(synonym.as_str()))
        .map(|&weight| weight * 0.5)
        .unwrap_or(0.0)
}

impl Corpus {
    /// Similarity between two live documents, using the corpus's synonym
    /// table. Fails with `NotFound` naming whichever id(s) are absent.
    pub fn similarity_by_id(&self, id_a: &str, id_b: &str) -> CorpusResult<f64> {
        let vectors = self.vectorize_all();
        let vec_a = vectors.iter().find(|v| v.id == id_a);
        let vec_b = vectors.iter().find(|v| v.id == id_b);
        match (vec_a, vec_b) {
            (Some(a), Some(b)) => cosine_similarity(a, b, Some(&self.synonyms)),
            (None, Some(_)) => Err(CorpusError::NotFound(id_a.to_string())),
            (Some(_), None) => Err(CorpusError::NotFound(id_b.to_string())),
            (None, None) => Err(CorpusError::NotFound(format!("{id_a}, {id_b}"))),
        }
    }
}
