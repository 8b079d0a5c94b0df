//! End-to-end tests for the stunting predictor: artifacts on disk to
//! response line.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use stunting_assist::envelope::{PredictOptions, handle_predict};
use stunting_assist::error::{AssistError, Result};
use stunting_assist::ml::{Classifier, ColumnTransformer};
use stunting_assist::stunting::StuntingPredictor;

use common::{models_dir, parse_line, write_json};

fn predict(predictor: &StuntingPredictor, raw: &str) -> serde_json::Value {
    let envelope = handle_predict(predictor, raw, PredictOptions::default());
    parse_line(&envelope.to_json_line())
}

/// Classifier that records how often it runs.
struct CountingClassifier {
    calls: Arc<AtomicUsize>,
}

impl Classifier for CountingClassifier {
    fn input_dim(&self) -> usize {
        4
    }

    fn output_dim(&self) -> usize {
        1
    }

    fn predict(&self, _features: &[f32]) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![0.75])
    }
}

#[test]
fn test_single_record() -> Result<()> {
    let (_dir, config) = models_dir();
    let predictor = StuntingPredictor::load(&config.predictor)?;

    let response = predict(
        &predictor,
        r#"{"Age": 24, "Sex": "M", "Body Length": 87.1, "Body Weight": 12.0}"#,
    );

    let object = response.as_object().unwrap();
    assert_eq!(object.len(), 4);
    assert_eq!(response["height_for_age_z_score"], 0.0);
    assert_eq!(response["stunting_prediction"], "No");
    assert_eq!(response["who_classification"], "Not stunted");
    let probability = response["stunting_probability"].as_f64().unwrap();
    assert!((probability - 0.01799).abs() < 1e-4, "got {probability}");

    Ok(())
}

#[test]
fn test_short_child_is_severely_stunted() -> Result<()> {
    let (_dir, config) = models_dir();
    let predictor = StuntingPredictor::load(&config.predictor)?;

    // z = (72.9 - 85.7) / 3.2 = -4.0
    let response = predict(
        &predictor,
        r#"[{"Age": 30, "Sex": "F", "Body Length": 72.9, "Body Weight": 8.1}]"#,
    );

    let z = response["height_for_age_z_score"].as_f64().unwrap();
    assert!((z + 4.0).abs() < 1e-9);
    assert_eq!(response["stunting_prediction"], "Yes");
    assert_eq!(response["who_classification"], "Severely stunted");

    Ok(())
}

#[test]
fn test_columnar_request_matches_record_request() -> Result<()> {
    let (_dir, config) = models_dir();
    let predictor = StuntingPredictor::load(&config.predictor)?;

    let columnar = predict(
        &predictor,
        r#"{
            "Sex": ["M"],
            "Age": [18],
            "Birth Weight": [2.8],
            "Birth Length": [48],
            "Body Weight": [9.5],
            "Body Length": [80.7],
            "ASI Eksklusif": ["Yes"]
        }"#,
    );
    let record = predict(
        &predictor,
        r#"{"Sex": "M", "Age": 18, "Body Weight": 9.5, "Body Length": 80.7}"#,
    );

    assert_eq!(columnar, record);
    assert_eq!(columnar["success"], serde_json::Value::Null);

    Ok(())
}

#[test]
fn test_first_row_is_reported() -> Result<()> {
    let (_dir, config) = models_dir();
    let predictor = StuntingPredictor::load(&config.predictor)?;

    let response = predict(
        &predictor,
        r#"[
            {"Age": 24, "Sex": "F", "Body Length": 85.7, "Body Weight": 11.0},
            {"Age": 24, "Sex": "M", "Body Length": 70.0, "Body Weight": 8.0}
        ]"#,
    );

    assert_eq!(response["height_for_age_z_score"], 0.0);
    assert_eq!(response["who_classification"], "Not stunted");

    Ok(())
}

#[test]
fn test_unknown_sex_skips_inference() -> Result<()> {
    let (dir, _config) = models_dir();
    let preprocessor = ColumnTransformer::load(dir.path().join("stunting_preprocessor.json"))?;
    let calls = Arc::new(AtomicUsize::new(0));
    let predictor = StuntingPredictor::new(
        preprocessor,
        Box::new(CountingClassifier {
            calls: Arc::clone(&calls),
        }),
    )?;

    let response = predict(
        &predictor,
        r#"{"Age": 24, "Sex": "X", "Body Length": 80.0, "Body Weight": 10.0}"#,
    );
    assert_eq!(response, json!({"success": false, "message": "Unknown sex: X"}));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let response = predict(
        &predictor,
        r#"{"Age": 24, "Sex": "M", "Body Length": 80.0, "Body Weight": 10.0}"#,
    );
    assert_eq!(response["stunting_probability"], 0.75);
    assert_eq!(response["stunting_prediction"], "Yes");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[test]
fn test_double_encoded_request() -> Result<()> {
    let (_dir, config) = models_dir();
    let predictor = StuntingPredictor::load(&config.predictor)?;

    let payload = json!({"Age": 20, "Sex": "F", "Body Length": 79.3, "Body Weight": 9.0});
    let single = serde_json::to_string(&payload).unwrap();
    let double = serde_json::to_string(&single).unwrap();

    assert_eq!(predict(&predictor, &single), predict(&predictor, &double));

    Ok(())
}

#[test]
fn test_risk_level_option() -> Result<()> {
    let (_dir, config) = models_dir();
    let predictor = StuntingPredictor::load(&config.predictor)?;

    // z = (78.3 - 87.1) / 3.2 = -2.75
    let envelope = handle_predict(
        &predictor,
        r#"{"Age": 24, "Sex": "M", "Body Length": 78.3, "Body Weight": 9.0}"#,
        PredictOptions { risk_level: true },
    );
    let response = parse_line(&envelope.to_json_line());

    assert_eq!(response["who_classification"], "Stunted");
    assert_eq!(response["risk_level"], "moderate");

    Ok(())
}

#[test]
fn test_request_errors_become_failure_envelopes() -> Result<()> {
    let (_dir, config) = models_dir();
    let predictor = StuntingPredictor::load(&config.predictor)?;

    let response = predict(&predictor, "[{");
    assert_eq!(response["success"], false);

    let response = predict(&predictor, r#"{"Age": 24, "Sex": "M", "Body Weight": 9.0}"#);
    assert_eq!(
        response,
        json!({"success": false, "message": "Missing column: Body Length"})
    );

    let response = predict(&predictor, "[]");
    assert_eq!(response["message"], "No records provided");

    Ok(())
}

#[test]
fn test_out_of_range_feature_is_rejected() -> Result<()> {
    let (_dir, config) = models_dir();
    let predictor = StuntingPredictor::load(&config.predictor)?;

    // Scaled age overflows f32.
    let response = predict(
        &predictor,
        r#"{"Age": 1e40, "Sex": "M", "Body Length": 80.0, "Body Weight": 10.0}"#,
    );
    assert_eq!(response["success"], false);
    assert!(response.get("stunting_probability").is_none());
    assert!(
        response["message"]
            .as_str()
            .unwrap()
            .contains("Age is out of range")
    );

    Ok(())
}

#[test]
fn test_preprocessor_width_mismatch_is_fatal() {
    let (dir, config) = models_dir();
    write_json(
        dir.path(),
        "stunting_preprocessor.json",
        &json!({"steps": [{"kind": "passthrough", "columns": ["Height_for_Age_Z"]}]}),
    );

    let err = StuntingPredictor::load(&config.predictor).unwrap_err();
    assert!(matches!(err, AssistError::Artifact(_)));
}
