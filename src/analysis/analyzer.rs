//! Analyzers combine a tokenizer with a chain of token filters.
//!
//! ```text
//! Raw Text → Analyzer → Token Stream → Vectorizer
//!             ↓
//!         Tokenizer
//!             ↓
//!         Filter 1 … Filter N
//! ```
//!
//! - [`PipelineAnalyzer`](pipeline::PipelineAnalyzer) - Custom tokenizer + filter chains
//! - [`ChatAnalyzer`](chat::ChatAnalyzer) - Word tokenizer, lowercase, lemma

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so an analyzer can live inside the shared,
/// immutable model context.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod chat;
pub mod pipeline;

pub use chat::ChatAnalyzer;
pub use pipeline::PipelineAnalyzer;
