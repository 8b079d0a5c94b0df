//! Intent-classification chatbot.
//!
//! A message is analyzed into lemmatized terms, turned into a bag-of-words
//! vector over the vocabulary, and scored by the classifier. The best intent
//! above the threshold picks a canned response from the taxonomy.
//!
//! # Examples
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use stunting_assist::chatbot::Chatbot;
//! use stunting_assist::config::ChatConfig;
//!
//! let chatbot = Chatbot::load(&ChatConfig::default())?;
//! let reply = chatbot.respond("What is stunting?", &mut StdRng::seed_from_u64(42))?;
//! println!("{}", reply.reply);
//! # Ok::<(), stunting_assist::error::AssistError>(())
//! ```

pub mod intents;
pub mod scorer;

pub use intents::{Intent, IntentTaxonomy};
pub use scorer::{IntentScorer, ScoredIntent};

use std::sync::Arc;

use rand::Rng;

use crate::analysis::analyzer::ChatAnalyzer;
use crate::artifact;
use crate::config::{ChatConfig, DEFAULT_FALLBACK_REPLY};
use crate::error::{AssistError, Result};
use crate::ml::{BagOfWordsVectorizer, Classifier, DenseNetwork};

/// The reply to one chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub reply: String,
    /// Every intent above the threshold, best first.
    pub intents: Vec<ScoredIntent>,
}

impl ChatReply {
    /// Whether no intent could be matched.
    pub fn is_fallback(&self) -> bool {
        self.intents.is_empty()
    }
}

/// Loaded chatbot artifacts. Immutable once built.
pub struct Chatbot {
    vectorizer: BagOfWordsVectorizer,
    classifier: Box<dyn Classifier>,
    labels: Vec<String>,
    taxonomy: IntentTaxonomy,
    scorer: IntentScorer,
    fallback_reply: String,
}

impl std::fmt::Debug for Chatbot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chatbot")
            .field("vectorizer", &self.vectorizer)
            .field("labels", &self.labels)
            .field("intents", &self.taxonomy.intents.len())
            .field("scorer", &self.scorer)
            .finish()
    }
}

impl Chatbot {
    /// Assemble a chatbot, checking the classifier against the vocabulary
    /// and label set.
    pub fn new(
        vectorizer: BagOfWordsVectorizer,
        classifier: Box<dyn Classifier>,
        labels: Vec<String>,
        taxonomy: IntentTaxonomy,
    ) -> Result<Self> {
        if classifier.input_dim() != vectorizer.vocabulary_size() {
            return Err(AssistError::artifact(format!(
                "chat classifier expects {} inputs but the vocabulary has {} words",
                classifier.input_dim(),
                vectorizer.vocabulary_size()
            )));
        }
        if classifier.output_dim() != labels.len() {
            return Err(AssistError::artifact(format!(
                "chat classifier produces {} outputs but there are {} labels",
                classifier.output_dim(),
                labels.len()
            )));
        }
        for label in &labels {
            if taxonomy.responses(label).is_none() {
                log::warn!("Label {label:?} has no intent in the taxonomy");
            }
        }

        Ok(Self {
            vectorizer,
            classifier,
            labels,
            taxonomy,
            scorer: IntentScorer::default(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        })
    }

    /// Load every chatbot artifact named by `config`.
    pub fn load(config: &ChatConfig) -> Result<Self> {
        config.validate()?;

        let vocabulary = artifact::read_word_list(&config.words_path)?;
        let labels = artifact::read_word_list(&config.classes_path)?;
        let taxonomy = IntentTaxonomy::load(&config.intents_path)?;
        let classifier = DenseNetwork::load(&config.model_path)?;

        let mut lexicon = vocabulary.clone();
        if let Some(path) = &config.lexicon_path {
            lexicon.extend(artifact::read_word_list(path)?);
        }
        let analyzer = Arc::new(ChatAnalyzer::new(lexicon)?);
        let vectorizer = BagOfWordsVectorizer::new(vocabulary, analyzer);

        Ok(Self::new(vectorizer, Box::new(classifier), labels, taxonomy)?
            .with_threshold(config.error_threshold)
            .with_fallback_reply(config.fallback_reply.clone()))
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.scorer = IntentScorer::new(threshold);
        self
    }

    pub fn with_fallback_reply<S: Into<String>>(mut self, reply: S) -> Self {
        self.fallback_reply = reply.into();
        self
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn taxonomy(&self) -> &IntentTaxonomy {
        &self.taxonomy
    }

    pub fn fallback_reply(&self) -> &str {
        &self.fallback_reply
    }

    /// Score `message` and rank the intents above the threshold.
    pub fn classify(&self, message: &str) -> Result<Vec<ScoredIntent>> {
        let features = self.vectorizer.transform(message)?;
        let probabilities = self.classifier.predict(&features)?;
        self.scorer.rank(&probabilities, self.labels.as_slice())
    }

    /// Classify `message` and pick a response using `rng`.
    pub fn respond<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> Result<ChatReply> {
        let intents = self.classify(message)?;

        let reply = match intents.first() {
            Some(best) => match self.taxonomy.choose_response(&best.intent, rng) {
                Some(reply) => reply.to_string(),
                None => {
                    log::warn!("No response configured for intent {:?}", best.intent);
                    self.fallback_reply.clone()
                }
            },
            None => {
                log::debug!("No intent above {}", self.scorer.threshold());
                self.fallback_reply.clone()
            }
        };

        Ok(ChatReply { reply, intents })
    }
}
