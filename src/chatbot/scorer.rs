//! Thresholded intent ranking.

use serde::Serialize;

use crate::error::{AssistError, Result};

/// An intent label with the probability the classifier gave it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredIntent {
    pub intent: String,
    pub probability: f32,
}

/// Keeps classes scoring strictly above a threshold, best first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntentScorer {
    threshold: f32,
}

impl Default for IntentScorer {
    fn default() -> Self {
        Self { threshold: 0.25 }
    }
}

impl IntentScorer {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Rank `probabilities` against `labels`.
    ///
    /// The sort is stable, so equal probabilities keep ascending class order.
    pub fn rank<S: AsRef<str>>(
        &self,
        probabilities: &[f32],
        labels: &[S],
    ) -> Result<Vec<ScoredIntent>> {
        if probabilities.len() != labels.len() {
            return Err(AssistError::inference(format!(
                "classifier produced {} scores for {} labels",
                probabilities.len(),
                labels.len()
            )));
        }

        let mut ranked: Vec<ScoredIntent> = probabilities
            .iter()
            .zip(labels)
            .filter(|(probability, _)| **probability > self.threshold)
            .map(|(probability, label)| ScoredIntent {
                intent: label.as_ref().to_string(),
                probability: *probability,
            })
            .collect();
        ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));

        log::debug!("Intents above {}: {ranked:?}", self.threshold);
        Ok(ranked)
    }
}
