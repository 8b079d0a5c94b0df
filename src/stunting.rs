//! Stunting risk assessment.
//!
//! Raw measurements are enriched with BMI and three WHO z-scores, encoded by
//! the fitted preprocessor and scored by the classifier. The WHO
//! height-for-age class is computed alongside and reported independently of
//! the model's prediction.

pub mod features;
pub mod predictor;
pub mod who;

pub use features::{GrowthFeatures, engineer};
pub use predictor::{StuntingAssessment, StuntingPrediction, StuntingPredictor};
pub use who::{GrowthReference, RiskLevel, Sex, WhoClassification};
