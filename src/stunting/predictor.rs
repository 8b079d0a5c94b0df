//! Stunting risk prediction.

use serde::Serialize;

use crate::config::PredictorConfig;
use crate::error::{AssistError, Result};
use crate::ml::{Classifier, ColumnTransformer, DenseNetwork, Record};
use crate::stunting::features;
use crate::stunting::who::{RiskLevel, WhoClassification};

/// Binary prediction reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StuntingPrediction {
    Yes,
    No,
}

/// Result of assessing one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StuntingAssessment {
    pub stunting_probability: f64,
    pub stunting_prediction: StuntingPrediction,
    pub who_classification: WhoClassification,
    pub height_for_age_z_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
}

impl StuntingAssessment {
    /// Attach the four-band risk level derived from the z-score.
    pub fn with_risk_level(mut self) -> Self {
        self.risk_level = Some(RiskLevel::from_z(self.height_for_age_z_score));
        self
    }
}

/// Loaded predictor artifacts. Immutable once built.
pub struct StuntingPredictor {
    preprocessor: ColumnTransformer,
    classifier: Box<dyn Classifier>,
    decision_threshold: f64,
}

impl std::fmt::Debug for StuntingPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StuntingPredictor")
            .field("preprocessor", &self.preprocessor)
            .field("input_dim", &self.classifier.input_dim())
            .field("decision_threshold", &self.decision_threshold)
            .finish()
    }
}

impl StuntingPredictor {
    /// Assemble a predictor, checking the classifier against the
    /// preprocessing output width.
    pub fn new(preprocessor: ColumnTransformer, classifier: Box<dyn Classifier>) -> Result<Self> {
        if classifier.input_dim() != preprocessor.output_width() {
            return Err(AssistError::artifact(format!(
                "stunting classifier expects {} inputs but the preprocessor produces {}",
                classifier.input_dim(),
                preprocessor.output_width()
            )));
        }
        if classifier.output_dim() == 0 {
            return Err(AssistError::artifact("stunting classifier produces no outputs"));
        }

        Ok(Self {
            preprocessor,
            classifier,
            decision_threshold: 0.5,
        })
    }

    /// Load the preprocessor and classifier named by `config`.
    pub fn load(config: &PredictorConfig) -> Result<Self> {
        config.validate()?;

        let preprocessor = ColumnTransformer::load(&config.preprocessor_path)?;
        let classifier = DenseNetwork::load(&config.model_path)?;

        Ok(Self::new(preprocessor, Box::new(classifier))?
            .with_decision_threshold(config.decision_threshold))
    }

    pub fn with_decision_threshold(mut self, threshold: f64) -> Self {
        self.decision_threshold = threshold;
        self
    }

    pub fn decision_threshold(&self) -> f64 {
        self.decision_threshold
    }

    /// Assess a batch of rows.
    ///
    /// Every row is engineered and encoded, but only the first row's
    /// probability and height-for-age z-score are reported.
    pub fn assess(&self, records: &[Record]) -> Result<StuntingAssessment> {
        let (rows, derived) = features::engineer(records)?;
        let first = derived
            .first()
            .ok_or_else(|| AssistError::invalid_input("No records provided"))?;

        let encoded = self.preprocessor.transform(&rows)?;
        let outputs = self.classifier.predict_batch(&encoded)?;
        let probability = outputs
            .first()
            .and_then(|row| row.first())
            .copied()
            .ok_or_else(|| AssistError::inference("classifier returned no output"))?;
        if !probability.is_finite() {
            return Err(AssistError::inference(format!(
                "classifier returned a non-finite probability: {probability}"
            )));
        }
        let probability = f64::from(probability);

        log::debug!(
            "Stunting probability {probability} for {} row(s), first HFA z {}",
            rows.len(),
            first.height_for_age_z
        );

        Ok(StuntingAssessment {
            stunting_probability: probability,
            stunting_prediction: self.decide(probability),
            who_classification: WhoClassification::from_z(first.height_for_age_z),
            height_for_age_z_score: first.height_for_age_z,
            risk_level: None,
        })
    }

    /// `Yes` only when `probability` is strictly above the threshold.
    pub fn decide(&self, probability: f64) -> StuntingPrediction {
        if probability > self.decision_threshold {
            StuntingPrediction::Yes
        } else {
            StuntingPrediction::No
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::{Activation, Cell, DenseLayer, TransformStep};

    fn preprocessor() -> ColumnTransformer {
        ColumnTransformer::new(vec![TransformStep::Passthrough {
            columns: vec![features::HEIGHT_FOR_AGE_Z.to_string()],
        }])
        .unwrap()
    }

    /// Probability falls as the height-for-age z-score rises.
    fn predictor() -> StuntingPredictor {
        let network = DenseNetwork::new(
            1,
            vec![DenseLayer::new(vec![vec![-2.0]], vec![-4.0], Activation::Sigmoid)],
        )
        .unwrap();
        StuntingPredictor::new(preprocessor(), Box::new(network)).unwrap()
    }

    fn child(sex: &str, length: f64) -> Record {
        Record::new()
            .with(features::AGE, Cell::Number(24.0))
            .with(features::SEX, Cell::Text(sex.into()))
            .with(features::BODY_LENGTH, Cell::Number(length))
            .with(features::BODY_WEIGHT, Cell::Number(10.0))
    }

    #[test]
    fn test_assess_short_child() {
        // z = (74.3 - 87.1) / 3.2 = -4.0, logit = 4.0
        let assessment = predictor().assess(&[child("M", 74.3)]).unwrap();

        assert!((assessment.height_for_age_z_score + 4.0).abs() < 1e-9);
        assert!(assessment.stunting_probability > 0.9);
        assert_eq!(assessment.stunting_prediction, StuntingPrediction::Yes);
        assert_eq!(
            assessment.who_classification,
            WhoClassification::SeverelyStunted
        );
        assert_eq!(assessment.risk_level, None);
    }

    #[test]
    fn test_assess_uses_first_row() {
        let assessment = predictor()
            .assess(&[child("F", 85.7), child("M", 70.0)])
            .unwrap();

        assert_eq!(assessment.height_for_age_z_score, 0.0);
        assert_eq!(assessment.stunting_prediction, StuntingPrediction::No);
        assert_eq!(assessment.who_classification, WhoClassification::NotStunted);
    }

    #[test]
    fn test_decision_threshold_is_strict() {
        let predictor = predictor();
        assert_eq!(predictor.decide(0.5), StuntingPrediction::No);
        assert_eq!(predictor.decide(0.50001), StuntingPrediction::Yes);
    }

    #[test]
    fn test_risk_level_is_opt_in() {
        let assessment = predictor()
            .assess(&[child("M", 82.3)])
            .unwrap()
            .with_risk_level();
        // z = -1.5
        assert_eq!(assessment.risk_level, Some(RiskLevel::Mild));

        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["risk_level"], "mild");
        assert_eq!(json["who_classification"], "Not stunted");
    }

    #[test]
    fn test_dimension_checks() {
        let network = DenseNetwork::new(
            2,
            vec![DenseLayer::new(vec![vec![1.0], vec![1.0]], vec![0.0], Activation::Sigmoid)],
        )
        .unwrap();
        let err = StuntingPredictor::new(preprocessor(), Box::new(network)).unwrap_err();
        assert!(matches!(err, AssistError::Artifact(_)));
    }
}
