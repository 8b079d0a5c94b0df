//! Text analysis module.
//!
//! Turns a raw chat message into the normalized word forms the bag-of-words
//! vectorizer looks up in its vocabulary:
//!
//! ```text
//! Raw Text → Tokenizer → Lowercase → Lemma → Token Stream
//! ```

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
