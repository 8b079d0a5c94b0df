//! Word tokenizer for chat messages.
//!
//! Splits text on Unicode word boundaries (UAX #29) the way a Treebank-style
//! word tokenizer would: words, numbers and punctuation marks each become a
//! token, whitespace is dropped, and English clitics are split off their host
//! word.
//!
//! # Examples
//!
//! ```
//! use stunting_assist::analysis::tokenizer::Tokenizer;
//! use stunting_assist::analysis::tokenizer::word::WordTokenizer;
//!
//! let tokenizer = WordTokenizer::new().unwrap();
//! let tokens: Vec<String> = tokenizer
//!     .tokenize("Don't worry, it's fine!")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(tokens, ["Do", "n't", "worry", ",", "it", "'s", "fine", "!"]);
//! ```

use std::sync::Arc;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{AssistError, Result};

/// Clitics split off the end of a word: negation and the common contractions.
const CLITIC_PATTERN: &str = r"(?i)^(.+?)(n['’]t|['’](?:s|m|d|re|ve|ll))$";

/// A tokenizer that keeps punctuation and splits contractions.
#[derive(Clone, Debug)]
pub struct WordTokenizer {
    clitic: Arc<Regex>,
    split_clitics: bool,
}

impl WordTokenizer {
    /// Create a new word tokenizer that splits clitics.
    pub fn new() -> Result<Self> {
        let clitic = Regex::new(CLITIC_PATTERN)
            .map_err(|e| AssistError::analysis(format!("Invalid clitic pattern: {e}")))?;

        Ok(WordTokenizer {
            clitic: Arc::new(clitic),
            split_clitics: true,
        })
    }

    /// Keep contractions such as `don't` as a single token.
    pub fn without_clitic_splitting(mut self) -> Self {
        self.split_clitics = false;
        self
    }

    /// Check if this tokenizer splits clitics.
    pub fn splits_clitics(&self) -> bool {
        self.split_clitics
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new().expect("Clitic pattern should be valid")
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens: Vec<Token> = Vec::new();

        for (start, segment) in text.split_word_bound_indices() {
            if segment.chars().all(char::is_whitespace) {
                continue;
            }

            if self.split_clitics {
                if let Some(caps) = self.clitic.captures(segment) {
                    for part in [caps.get(1), caps.get(2)].into_iter().flatten() {
                        tokens.push(Token::with_offsets(
                            part.as_str(),
                            tokens.len(),
                            start + part.start(),
                            start + part.end(),
                        ));
                    }
                    continue;
                }
            }

            tokens.push(Token::with_offsets(
                segment,
                tokens.len(),
                start,
                start + segment.len(),
            ));
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "word"
    }
}
