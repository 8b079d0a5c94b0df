//! Bag-of-words feature extraction.

use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;

/// Indicator vectorizer over a fixed, ordered vocabulary.
///
/// Position `i` of the output is `1.0` when the vocabulary's `i`-th word is
/// among the analyzed tokens and `0.0` otherwise. Unknown tokens are ignored,
/// so the output length always equals the vocabulary size.
pub struct BagOfWordsVectorizer {
    /// Vocabulary in model input order.
    vocabulary: Vec<String>,
    /// Word -> every index it occupies in the vocabulary.
    index: AHashMap<String, Vec<usize>>,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for BagOfWordsVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BagOfWordsVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl BagOfWordsVectorizer {
    /// Create a vectorizer over `vocabulary` using `analyzer` for tokenization.
    pub fn new(vocabulary: Vec<String>, analyzer: Arc<dyn Analyzer>) -> Self {
        let mut index: AHashMap<String, Vec<usize>> = AHashMap::with_capacity(vocabulary.len());
        for (position, word) in vocabulary.iter().enumerate() {
            index.entry(word.clone()).or_default().push(position);
        }

        Self {
            vocabulary,
            index,
            analyzer,
        }
    }

    /// Analyze `text` and build its indicator vector.
    pub fn transform(&self, text: &str) -> Result<Vec<f32>> {
        let terms: Vec<String> = self.analyzer.analyze(text)?.map(|token| token.text).collect();
        log::debug!("Analyzed terms: {terms:?}");
        Ok(self.indicator(&terms))
    }

    /// Build the indicator vector for already analyzed terms.
    pub fn indicator<S: AsRef<str>>(&self, terms: &[S]) -> Vec<f32> {
        let mut bag = vec![0.0; self.vocabulary.len()];
        for term in terms {
            if let Some(positions) = self.index.get(term.as_ref()) {
                for &position in positions {
                    bag[position] = 1.0;
                }
            }
        }
        bag
    }

    /// Get the vocabulary in input order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}
