//! Command implementations for the stunting-assist CLI.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::chatbot::Chatbot;
use crate::cli::args::*;
use crate::cli::output::write_envelope;
use crate::config::{AssistConfig, ChatConfig, PredictorConfig};
use crate::envelope::{self, ChatOptions, Envelope, Failure, PredictOptions};
use crate::error::Result;
use crate::stunting::StuntingPredictor;

/// Execute a CLI command.
///
/// Artifact and configuration problems are returned as errors. Anything that
/// goes wrong with the request itself is reported on stdout instead.
pub fn execute_command(args: AssistArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    match &args.command {
        Command::Chat(chat_args) => run_chat(chat_args, &args, config.chat),
        Command::Predict(predict_args) => run_predict(predict_args, &args, config.predictor),
    }
}

/// Combine defaults, the config file and `--models-dir`.
pub fn resolve_config(args: &AssistArgs) -> Result<AssistConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            AssistConfig::from_file(path)?
        }
        None => AssistConfig::default(),
    };
    if let Some(dir) = &args.models_dir {
        config.set_models_dir(dir);
    }
    Ok(config)
}

/// Apply per-command flags on top of the resolved chat configuration.
pub fn chat_config(args: &ChatArgs, mut config: ChatConfig) -> Result<ChatConfig> {
    if let Some(path) = &args.model {
        config.model_path = path.clone();
    }
    if let Some(path) = &args.words {
        config.words_path = path.clone();
    }
    if let Some(path) = &args.classes {
        config.classes_path = path.clone();
    }
    if let Some(path) = &args.intents {
        config.intents_path = path.clone();
    }
    if let Some(path) = &args.lexicon {
        config.lexicon_path = Some(path.clone());
    }
    if let Some(threshold) = args.threshold {
        config.error_threshold = threshold;
    }
    config.validate()?;
    Ok(config)
}

/// Apply per-command flags on top of the resolved predictor configuration.
pub fn predictor_config(
    args: &PredictArgs,
    mut config: PredictorConfig,
) -> Result<PredictorConfig> {
    if let Some(path) = &args.model {
        config.model_path = path.clone();
    }
    if let Some(path) = &args.preprocessor {
        config.preprocessor_path = path.clone();
    }
    if let Some(threshold) = args.threshold {
        config.decision_threshold = threshold;
    }
    config.validate()?;
    Ok(config)
}

fn run_chat(args: &ChatArgs, cli_args: &AssistArgs, config: ChatConfig) -> Result<()> {
    let config = chat_config(args, config)?;
    let chatbot = Chatbot::load(&config)?;
    log::debug!("{chatbot:?}");

    let options = ChatOptions {
        details: args.details,
    };
    let envelope = match read_request(cli_args.input.as_deref()) {
        Ok(raw) => envelope::handle_chat(&chatbot, &raw, options, &mut rand::rng()),
        Err(e) => Envelope::Err(Failure::from(&e)),
    };

    write_envelope(&envelope, &mut io::stdout().lock())
}

fn run_predict(args: &PredictArgs, cli_args: &AssistArgs, config: PredictorConfig) -> Result<()> {
    let config = predictor_config(args, config)?;
    let predictor = StuntingPredictor::load(&config)?;
    log::debug!("{predictor:?}");

    let options = PredictOptions {
        risk_level: args.risk_level,
    };
    let envelope = match read_request(cli_args.input.as_deref()) {
        Ok(raw) => envelope::handle_predict(&predictor, &raw, options),
        Err(e) => Envelope::Err(Failure::from(&e)),
    };

    write_envelope(&envelope, &mut io::stdout().lock())
}

/// Read the whole request from `input`, or from stdin when absent.
fn read_request(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}
