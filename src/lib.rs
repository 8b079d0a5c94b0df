//! # stunting-assist
//!
//! One-shot inference wrappers for a child-stunting assistant.
//!
//! ## Features
//!
//! - Intent-classification chatbot over a bag-of-words vocabulary
//! - Stunting risk prediction with WHO height-for-age classification
//! - Text analysis pipeline with tokenization, lowercasing and lemmatization
//! - JSON model artifacts loaded once into immutable contexts
//! - Single-line JSON envelopes for stdin/stdout callers

pub mod analysis;
pub mod artifact;
pub mod chatbot;
pub mod cli;
pub mod config;
pub mod envelope;
pub mod error;
pub mod ml;
pub mod stunting;

pub mod prelude {
    pub use crate::chatbot::{ChatReply, Chatbot};
    pub use crate::config::AssistConfig;
    pub use crate::envelope::{Envelope, decode_payload};
    pub use crate::error::{AssistError, Result};
    pub use crate::stunting::{StuntingAssessment, StuntingPredictor};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
