//! Intent taxonomy: tag -> candidate responses.
//!
//! ```json
//! {
//!   "intents": [
//!     {"tag": "greeting", "patterns": ["Hi", "Hello"], "responses": ["Hello!", "Hi there"]}
//!   ]
//! }
//! ```

use std::path::Path;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::artifact;
use crate::error::Result;

/// One labeled intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub tag: String,
    /// Training utterances. Kept for reference only.
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
}

/// The static intent taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentTaxonomy {
    pub intents: Vec<Intent>,
}

impl IntentTaxonomy {
    pub fn new(intents: Vec<Intent>) -> Self {
        Self { intents }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let taxonomy: IntentTaxonomy = artifact::read_json(path.as_ref())?;
        log::info!(
            "Loaded {} intents from {}",
            taxonomy.intents.len(),
            path.as_ref().display()
        );
        Ok(taxonomy)
    }

    /// Candidate responses of the first intent tagged `tag`.
    pub fn responses(&self, tag: &str) -> Option<&[String]> {
        self.intents
            .iter()
            .find(|intent| intent.tag == tag)
            .map(|intent| intent.responses.as_slice())
    }

    /// Pick one candidate response for `tag` uniformly at random.
    ///
    /// Returns `None` when the tag is unknown or has no responses.
    pub fn choose_response<R: Rng + ?Sized>(&self, tag: &str, rng: &mut R) -> Option<&str> {
        self.responses(tag)?.choose(rng).map(String::as_str)
    }

    /// Tags in taxonomy order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.intents.iter().map(|intent| intent.tag.as_str())
    }
}
