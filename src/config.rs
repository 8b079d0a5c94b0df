//! Runtime configuration: artifact locations and decision thresholds.
//!
//! Values are resolved in increasing precedence: built-in defaults (the
//! fixed paths under `./models`), an optional JSON config file, then
//! command-line flags and environment variables.
//!
//! ```json
//! {
//!   "chat": {"error_threshold": 0.3},
//!   "predictor": {"model_path": "/srv/models/stunting_prediction_model.json"}
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AssistError, Result};

/// Default directory holding every artifact.
pub const DEFAULT_MODELS_DIR: &str = "./models";

/// Reply used when no intent can be selected.
pub const DEFAULT_FALLBACK_REPLY: &str = "I'm sorry, I didn't understand that.";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssistConfig {
    pub chat: ChatConfig,
    pub predictor: PredictorConfig,
}

impl AssistConfig {
    /// Defaults rooted at `models_dir` instead of `./models`.
    pub fn with_models_dir<P: AsRef<Path>>(models_dir: P) -> Self {
        Self {
            chat: ChatConfig::with_models_dir(&models_dir),
            predictor: PredictorConfig::with_models_dir(&models_dir),
        }
    }

    /// Load a JSON config file. Missing sections keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AssistError::config(format!("cannot read {}: {e}", path.display())))?;
        let config: AssistConfig = serde_json::from_str(&content)
            .map_err(|e| AssistError::config(format!("cannot parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Re-root every artifact path under `models_dir`. The optional extra
    /// lexicon and the tunables are left alone.
    pub fn set_models_dir<P: AsRef<Path>>(&mut self, models_dir: P) {
        let rooted = Self::with_models_dir(models_dir);
        self.chat.model_path = rooted.chat.model_path;
        self.chat.words_path = rooted.chat.words_path;
        self.chat.classes_path = rooted.chat.classes_path;
        self.chat.intents_path = rooted.chat.intents_path;
        self.predictor.model_path = rooted.predictor.model_path;
        self.predictor.preprocessor_path = rooted.predictor.preprocessor_path;
    }

    pub fn validate(&self) -> Result<()> {
        self.chat.validate()?;
        self.predictor.validate()
    }
}

/// Chatbot artifacts and decision settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatConfig {
    /// Dense network producing one probability per label.
    pub model_path: PathBuf,
    /// Vocabulary, in model input order.
    pub words_path: PathBuf,
    /// Intent labels, in model output order.
    pub classes_path: PathBuf,
    /// Intent taxonomy with candidate responses.
    pub intents_path: PathBuf,
    /// Extra lemma base forms on top of the vocabulary.
    pub lexicon_path: Option<PathBuf>,
    /// Intents must score strictly above this to be considered.
    pub error_threshold: f32,
    pub fallback_reply: String,
}

impl ChatConfig {
    pub fn with_models_dir<P: AsRef<Path>>(models_dir: P) -> Self {
        let dir = models_dir.as_ref().join("chatbot");
        Self {
            model_path: dir.join("chatbot_model.json"),
            words_path: dir.join("words.json"),
            classes_path: dir.join("classes.json"),
            intents_path: dir.join("stunting_intents.json"),
            lexicon_path: None,
            error_threshold: 0.25,
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.error_threshold) {
            return Err(AssistError::config(format!(
                "chat.error_threshold must be within [0, 1], got {}",
                self.error_threshold
            )));
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::with_models_dir(DEFAULT_MODELS_DIR)
    }
}

/// Stunting predictor artifacts and decision settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredictorConfig {
    /// Dense network producing the stunting probability.
    pub model_path: PathBuf,
    /// Fitted column transformer.
    pub preprocessor_path: PathBuf,
    /// Probabilities strictly above this are reported as "Yes".
    pub decision_threshold: f64,
}

impl PredictorConfig {
    pub fn with_models_dir<P: AsRef<Path>>(models_dir: P) -> Self {
        let dir = models_dir.as_ref();
        Self {
            model_path: dir.join("stunting_prediction_model.json"),
            preprocessor_path: dir.join("stunting_preprocessor.json"),
            decision_threshold: 0.5,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.decision_threshold) {
            return Err(AssistError::config(format!(
                "predictor.decision_threshold must be within [0, 1], got {}",
                self.decision_threshold
            )));
        }
        Ok(())
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self::with_models_dir(DEFAULT_MODELS_DIR)
    }
}
