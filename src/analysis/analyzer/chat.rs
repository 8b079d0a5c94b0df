use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lemma::LemmaFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::word::WordTokenizer;
use crate::error::Result;

/// Analyzer for chat messages: word tokens, lowercased, lemmatized.
///
/// The lemma filter is built over `lexicon`, which is normally the
/// classifier vocabulary.
pub struct ChatAnalyzer {
    inner: PipelineAnalyzer,
}

impl ChatAnalyzer {
    pub fn new<I, S>(lexicon: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokenizer = Arc::new(WordTokenizer::new()?);
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(LemmaFilter::new(lexicon)))
            .with_name("chat");

        Ok(Self { inner: analyzer })
    }

    /// Analyze `text` and return only the normalized token texts.
    pub fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}

impl Analyzer for ChatAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "chat"
    }
}

impl Debug for ChatAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
