//! Command line argument parsing for the stunting-assist CLI using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// stunting-assist - one-shot inference for the stunting chatbot and risk predictor
#[derive(Parser, Debug, Clone)]
#[command(name = "stunting-assist")]
#[command(about = "Read one JSON request from stdin and print one JSON response line")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct AssistArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// JSON configuration file
    #[arg(long, value_name = "CONFIG_FILE", env = "STUNTING_ASSIST_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the model artifacts (default: ./models)
    #[arg(long, value_name = "DIR", env = "STUNTING_ASSIST_MODELS_DIR", global = true)]
    pub models_dir: Option<PathBuf>,

    /// Read the request from a file instead of stdin
    #[arg(short, long, value_name = "REQUEST_FILE", global = true)]
    pub input: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl AssistArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Answer a chat message: {"message": "..."}
    Chat(ChatArgs),

    /// Predict stunting risk for one or more children
    Predict(PredictArgs),
}

/// Arguments for the chatbot
#[derive(Args, Debug, Clone, Default)]
pub struct ChatArgs {
    /// Chat classifier network
    #[arg(long, value_name = "MODEL_FILE", env = "STUNTING_ASSIST_CHAT_MODEL")]
    pub model: Option<PathBuf>,

    /// Vocabulary word list
    #[arg(long, value_name = "WORDS_FILE", env = "STUNTING_ASSIST_WORDS")]
    pub words: Option<PathBuf>,

    /// Intent label list
    #[arg(long, value_name = "CLASSES_FILE", env = "STUNTING_ASSIST_CLASSES")]
    pub classes: Option<PathBuf>,

    /// Intent taxonomy with responses
    #[arg(long, value_name = "INTENTS_FILE", env = "STUNTING_ASSIST_INTENTS")]
    pub intents: Option<PathBuf>,

    /// Extra lemma base forms (JSON array of words)
    #[arg(long, value_name = "LEXICON_FILE")]
    pub lexicon: Option<PathBuf>,

    /// Minimum intent probability (exclusive)
    #[arg(long, value_name = "PROBABILITY")]
    pub threshold: Option<f32>,

    /// Include the ranked intents in the response
    #[arg(long)]
    pub details: bool,
}

/// Arguments for the stunting predictor
#[derive(Args, Debug, Clone, Default)]
pub struct PredictArgs {
    /// Stunting classifier network
    #[arg(long, value_name = "MODEL_FILE", env = "STUNTING_ASSIST_PREDICT_MODEL")]
    pub model: Option<PathBuf>,

    /// Fitted preprocessing transform
    #[arg(long, value_name = "PREPROCESSOR_FILE", env = "STUNTING_ASSIST_PREPROCESSOR")]
    pub preprocessor: Option<PathBuf>,

    /// Probability above which the prediction is "Yes"
    #[arg(long, value_name = "PROBABILITY")]
    pub threshold: Option<f64>,

    /// Include the four-band risk level in the response
    #[arg(long)]
    pub risk_level: bool,
}
