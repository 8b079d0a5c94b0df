//! Fixture artifacts shared by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

use stunting_assist::config::AssistConfig;

/// Write `value` as JSON to `dir/name` and return the path.
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

/// Chat artifacts.
///
/// Each vocabulary word switches on exactly one label: `hello`/`hi` ->
/// greeting, `stunting` -> definition, `food`/`baby` -> nutrition. With no
/// known word every label scores `sigmoid(-2) ~ 0.12`, below the threshold.
pub fn write_chat_artifacts(models_dir: &Path) {
    let chatbot_dir = models_dir.join("chatbot");
    write_json(
        &chatbot_dir,
        "words.json",
        &json!(["hello", "hi", "stunting", "food", "baby"]),
    );
    write_json(
        &chatbot_dir,
        "classes.json",
        &json!(["greeting", "definition", "nutrition", "goodbye"]),
    );
    write_json(
        &chatbot_dir,
        "stunting_intents.json",
        &json!({"intents": [
            {"tag": "greeting", "patterns": ["Hi", "Hello"], "responses": ["Hello!", "Hi there, how can I help?"]},
            {"tag": "definition", "patterns": ["What is stunting?"], "responses": ["Stunting is impaired growth caused by chronic malnutrition."]},
            {"tag": "nutrition", "patterns": ["What should my baby eat?"], "responses": ["Offer protein-rich food.", "Give balanced meals every day."]},
            {"tag": "goodbye", "patterns": ["Bye"], "responses": ["Goodbye!"]}
        ]}),
    );
    write_json(
        &chatbot_dir,
        "chatbot_model.json",
        &json!({
            "input_dim": 5,
            "layers": [{
                "weights": [
                    [4.0, 0.0, 0.0, 0.0],
                    [4.0, 0.0, 0.0, 0.0],
                    [0.0, 4.0, 0.0, 0.0],
                    [0.0, 0.0, 4.0, 0.0],
                    [0.0, 0.0, 4.0, 0.0]
                ],
                "bias": [-2.0, -2.0, -2.0, -2.0],
                "activation": "sigmoid"
            }]
        }),
    );
}

/// Predictor artifacts.
///
/// The transform emits `[scaled Age, Sex=F, Sex=M, Height_for_Age_Z]` and the
/// network only looks at the z-score: `p = sigmoid(-2 z - 4)`.
pub fn write_predictor_artifacts(models_dir: &Path) {
    write_json(
        models_dir,
        "stunting_preprocessor.json",
        &json!({"steps": [
            {"kind": "standard_scaler", "columns": ["Age"], "mean": [24.0], "scale": [6.0]},
            {"kind": "one_hot", "columns": ["Sex"], "categories": [["F", "M"]]},
            {"kind": "passthrough", "columns": ["Height_for_Age_Z"]}
        ]}),
    );
    write_json(
        models_dir,
        "stunting_prediction_model.json",
        &json!({
            "input_dim": 4,
            "layers": [{
                "weights": [[0.0], [0.0], [0.0], [-2.0]],
                "bias": [-4.0],
                "activation": "sigmoid"
            }]
        }),
    );
}

/// A temporary models directory holding every artifact, plus the matching
/// configuration.
pub fn models_dir() -> (TempDir, AssistConfig) {
    let dir = TempDir::new().unwrap();
    write_chat_artifacts(dir.path());
    write_predictor_artifacts(dir.path());
    let config = AssistConfig::with_models_dir(dir.path());
    (dir, config)
}

/// Parse a response line back into JSON.
pub fn parse_line(line: &str) -> Value {
    assert!(!line.contains('\n'), "response must be a single line: {line}");
    serde_json::from_str(line).unwrap()
}
