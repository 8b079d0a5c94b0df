//! Dictionary-based noun lemmatization.
//!
//! Works like WordNet's `morphy` for nouns: an irregular-plural exception
//! table is consulted first, otherwise a fixed list of suffix detachment
//! rules produces candidate base forms. A candidate only counts if the
//! lexicon knows it, and the shortest known candidate wins. A word with no
//! known candidate is left untouched.
//!
//! The lexicon is normally the classifier vocabulary, so a token is reduced
//! to exactly the form the vocabulary was built from.
//!
//! # Examples
//!
//! ```
//! use stunting_assist::analysis::token_filter::lemma::LemmaFilter;
//!
//! let filter = LemmaFilter::new(["baby", "glass", "child"]);
//! assert_eq!(filter.lemmatize("babies"), "baby");
//! assert_eq!(filter.lemmatize("glasses"), "glass");
//! assert_eq!(filter.lemmatize("children"), "child");
//! assert_eq!(filter.lemmatize("bus"), "bus");
//! ```

use std::sync::{Arc, LazyLock};

use ahash::{AHashMap, AHashSet};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Noun suffix detachment rules, in WordNet order.
const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// Irregular plurals whose base form no rule can reach.
static NOUN_EXCEPTIONS: LazyLock<AHashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| {
        let entries: &[(&str, &[&str])] = &[
            ("analyses", &["analysis"]),
            ("bacteria", &["bacterium"]),
            ("calves", &["calf"]),
            ("children", &["child"]),
            ("crises", &["crisis"]),
            ("criteria", &["criterion"]),
            ("data", &["datum"]),
            ("diagnoses", &["diagnosis"]),
            ("feet", &["foot"]),
            ("geese", &["goose"]),
            ("halves", &["half"]),
            ("knives", &["knife"]),
            ("leaves", &["leaf"]),
            ("lice", &["louse"]),
            ("lives", &["life"]),
            ("loaves", &["loaf"]),
            ("men", &["man"]),
            ("mice", &["mouse"]),
            ("oxen", &["ox"]),
            ("phenomena", &["phenomenon"]),
            ("potatoes", &["potato"]),
            ("teeth", &["tooth"]),
            ("tomatoes", &["tomato"]),
            ("wives", &["wife"]),
            ("women", &["woman"]),
        ];
        entries.iter().copied().collect()
    });

/// A filter that replaces each token with its noun lemma.
#[derive(Clone, Debug, Default)]
pub struct LemmaFilter {
    lexicon: Arc<AHashSet<String>>,
}

impl LemmaFilter {
    /// Create a lemma filter that accepts base forms found in `words`.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LemmaFilter {
            lexicon: Arc::new(words.into_iter().map(Into::into).collect()),
        }
    }

    /// Number of words in the lexicon.
    pub fn lexicon_size(&self) -> usize {
        self.lexicon.len()
    }

    /// Reduce a lowercase word to its base form.
    pub fn lemmatize(&self, word: &str) -> String {
        let mut candidates: Vec<String> = Vec::new();
        if self.lexicon.contains(word) {
            candidates.push(word.to_string());
        }

        if let Some(bases) = NOUN_EXCEPTIONS.get(word) {
            candidates.extend(bases.iter().map(|base| base.to_string()));
        } else {
            for (suffix, ending) in NOUN_RULES {
                let Some(stem) = word.strip_suffix(suffix) else {
                    continue;
                };
                if stem.is_empty() {
                    continue;
                }
                let base = format!("{stem}{ending}");
                if self.lexicon.contains(&base) && !candidates.contains(&base) {
                    candidates.push(base);
                }
            }
        }

        // First shortest candidate wins.
        candidates
            .into_iter()
            .reduce(|best, candidate| {
                if candidate.chars().count() < best.chars().count() {
                    candidate
                } else {
                    best
                }
            })
            .unwrap_or_else(|| word.to_string())
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                let lemma = self.lemmatize(&token.text);
                token.with_text(lemma)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}
