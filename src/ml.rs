//! Machine learning building blocks shared by the chatbot and the predictor.
//!
//! - [`network`] - dense feed-forward classifier and the [`Classifier`] seam
//! - [`bag_of_words`] - indicator vectors over a fixed vocabulary
//! - [`table`] - loosely typed tabular records parsed from JSON
//! - [`preprocessor`] - column transformer turning records into model input

pub mod bag_of_words;
pub mod network;
pub mod preprocessor;
pub mod table;

pub use bag_of_words::BagOfWordsVectorizer;
pub use network::{Activation, Classifier, DenseLayer, DenseNetwork};
pub use preprocessor::{ColumnTransformer, TransformStep, UnknownCategory};
pub use table::{Cell, Record};
