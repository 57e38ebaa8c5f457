use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, CorpusResult};

/// Common English stop words installed when no explicit list is supplied.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing",
    "down", "during", "each", "few", "for", "from", "further", "had", "has",
    "have", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off",
    "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Tokenization model.
///
/// Captured per document at add time, so changing the corpus default never
/// reinterprets documents that are already live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Model {
    /// Whitespace-separated single words.
    Bag,
    /// Non-overlapping chunks of `n` characters over the whitespace-free
    /// character stream. The final chunk keeps the remainder.
    NgramChar,
    /// Non-overlapping groups of `n` consecutive words, re-joined with
    /// single spaces. The final group keeps the remainder.
    NgramWord,
}

impl Model {
    /// Parse a model name, case-insensitively.
    ///
    /// Accepts exactly `bag`, `ngram-char` and `ngram-word`.
    pub fn parse(name: &str) -> CorpusResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bag" => Ok(Model::Bag),
            "ngram-char" => Ok(Model::NgramChar),
            "ngram-word" => Ok(Model::NgramWord),
            _ => Err(CorpusError::InvalidModel(name.to_string())),
        }
    }

    /// The canonical name this model parses from.
    pub fn name(&self) -> &'static str {
        match self {
            Model::Bag => "bag",
            Model::NgramChar => "ngram-char",
            Model::NgramWord => "ngram-word",
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of terms excluded from tokenization.
///
/// Filtered terms never reach a document's term counts, and therefore never
/// reach the corpus document-frequency map either.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopWordSet(HashSet<String>);

impl StopWordSet {
    /// An empty set: nothing is filtered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in default English list.
    pub fn default_english() -> Self {
        DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect()
    }

    /// Build a set from arbitrary terms. Terms are lower-cased; empty
    /// fragments are dropped.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Parse a comma-separated list (no header).
    pub fn from_csv_str(text: &str) -> Self {
        Self::from_terms(text.split(','))
    }

    /// Read a comma-separated stop-word file.
    pub fn load_csv(path: impl AsRef<Path>) -> CorpusResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_csv_str(&text))
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(term)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

impl FromIterator<String> for StopWordSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        StopWordSet(iter.into_iter().collect())
    }
}

/// Tokenize `text` under `model` with n-gram width `n`.
///
/// Preprocessing is model-independent: characters that are neither
/// alphanumeric nor whitespace are stripped, digits are stripped when
/// `remove_numbers` is set, and everything is lower-cased. Stop words are
/// filtered from the word stream before any n-gram grouping, so a stop word
/// never contributes characters or words to a chunk.
///
/// Empty input yields an empty sequence. `n < 1` is `InvalidWidth`.
pub fn tokenize(
    text: &str,
    model: Model,
    n: usize,
    stop_words: &StopWordSet,
    remove_numbers: bool,
) -> CorpusResult<Vec<String>> {
    if n < 1 {
        return Err(CorpusError::InvalidWidth(n));
    }
    let normalized = preprocess(text, remove_numbers);
    let words: Vec<&str> = normalized
        .split_whitespace()
        .filter(|w| !stop_words.contains(w))
        .collect();

    let terms = match model {
        Model::Bag => words.into_iter().map(str::to_string).collect(),
        Model::NgramChar => {
            let stream: Vec<char> = words.concat().chars().collect();
            stream.chunks(n).map(|chunk| chunk.iter().collect()).collect()
        }
        Model::NgramWord => words.chunks(n).map(|group| group.join(" ")).collect(),
    };
    Ok(terms)
}

/// Strip non-alphanumeric, non-whitespace characters and lower-case.
fn preprocess(text: &str, remove_numbers: bool) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .filter(|c| !(remove_numbers && c.is_numeric()))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_stops() -> StopWordSet {
        StopWordSet::new()
    }

    #[test]
    fn parse_model_names() {
        assert_eq!(Model::parse("bag").unwrap(), Model::Bag);
        assert_eq!(Model::parse("NGRAM-CHAR").unwrap(), Model::NgramChar);
        assert_eq!(Model::parse("Ngram-Word").unwrap(), Model::NgramWord);
        assert!(matches!(
            Model::parse("sliding-window"),
            Err(CorpusError::InvalidModel(_))
        ));
    }

    #[test]
    fn bag_splits_and_normalizes() {
        let terms = tokenize("Hello, World! 123", Model::Bag, 1, &no_stops(), false).unwrap();
        assert_eq!(terms, vec!["hello", "world", "123"]);
    }

    #[test]
    fn bag_number_removal() {
        let terms = tokenize("agent 007 returns", Model::Bag, 1, &no_stops(), true).unwrap();
        assert_eq!(terms, vec!["agent", "returns"]);
    }

    #[test]
    fn char_ngram_chunks_with_remainder() {
        let terms = tokenize("hello", Model::NgramChar, 3, &no_stops(), false).unwrap();
        assert_eq!(terms, vec!["hel", "lo"]);
    }

    #[test]
    fn char_ngram_ignores_whitespace() {
        let terms = tokenize("ab cd", Model::NgramChar, 3, &no_stops(), false).unwrap();
        assert_eq!(terms, vec!["abc", "d"]);
    }

    #[test]
    fn word_ngram_groups_with_remainder() {
        let terms = tokenize("a b c", Model::NgramWord, 2, &no_stops(), false).unwrap();
        assert_eq!(terms, vec!["a b", "c"]);
    }

    #[test]
    fn empty_text_is_not_an_error() {
        for model in [Model::Bag, Model::NgramChar, Model::NgramWord] {
            let terms = tokenize("", model, 2, &no_stops(), false).unwrap();
            assert!(terms.is_empty());
        }
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(matches!(
            tokenize("abc", Model::NgramChar, 0, &no_stops(), false),
            Err(CorpusError::InvalidWidth(0))
        ));
    }

    #[test]
    fn stop_words_filtered_before_grouping() {
        let stops = StopWordSet::from_terms(["the"]);
        let terms = tokenize("the quick fox", Model::Bag, 1, &stops, false).unwrap();
        assert_eq!(terms, vec!["quick", "fox"]);

        // "the" must not contribute words to a group
        let terms = tokenize("the quick fox", Model::NgramWord, 2, &stops, false).unwrap();
        assert_eq!(terms, vec!["quick fox"]);

        // nor characters to a chunk
        let terms = tokenize("the ox", Model::NgramChar, 2, &stops, false).unwrap();
        assert_eq!(terms, vec!["ox"]);
    }

    #[test]
    fn csv_stop_words() {
        let stops = StopWordSet::from_csv_str("The, a ,an,,and");
        assert_eq!(stops.len(), 4);
        assert!(stops.contains("the"));
        assert!(stops.contains("a"));
        assert!(!stops.contains(""));
    }

    #[test]
    fn default_list_is_lowercase() {
        let stops = StopWordSet::default_english();
        assert!(stops.contains("the"));
        assert!(stops.contains("yourselves"));
        assert!(stops.iter().all(|w| w.chars().all(|c| c.is_lowercase())));
    }
}
