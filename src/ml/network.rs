//! Dense feed-forward classifier.
//!
//! A [`DenseNetwork`] is a sequential stack of fully connected layers, the
//! shape a Keras `Sequential` model of `Dense` layers exports to. Weights are
//! stored input-major: `weights[i][j]` connects input `i` to unit `j`.
//!
//! ```json
//! {
//!   "input_dim": 3,
//!   "layers": [
//!     {"weights": [[0.1, 0.2], [0.3, 0.4], [0.5, 0.6]], "bias": [0.0, 0.0], "activation": "relu"},
//!     {"weights": [[1.0], [-1.0]], "bias": [0.0], "activation": "sigmoid"}
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact;
use crate::error::{AssistError, Result};

/// Trait for pretrained classifiers used by the inference step.
///
/// Implementations must be immutable after loading; the pipeline only ever
/// calls the forward pass.
pub trait Classifier: Send + Sync {
    /// Number of features a single input row must have.
    fn input_dim(&self) -> usize;

    /// Number of scores produced for one input row.
    fn output_dim(&self) -> usize;

    /// Run the forward pass on one input row.
    fn predict(&self, features: &[f32]) -> Result<Vec<f32>>;

    /// Run the forward pass on several rows, in order.
    fn predict_batch(&self, rows: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        rows.iter().map(|row| self.predict(row)).collect()
    }
}

/// Activation applied to a layer's output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Softmax,
    Tanh,
}

impl Activation {
    /// Apply the activation in place.
    pub fn apply(self, values: &mut [f32]) {
        match self {
            Activation::Linear => {}
            Activation::Relu => values.iter_mut().for_each(|v| *v = v.max(0.0)),
            Activation::Sigmoid => values
                .iter_mut()
                .for_each(|v| *v = 1.0 / (1.0 + (-*v).exp())),
            Activation::Tanh => values.iter_mut().for_each(|v| *v = v.tanh()),
            Activation::Softmax => {
                let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                let mut sum = 0.0;
                for v in values.iter_mut() {
                    *v = (*v - max).exp();
                    sum += *v;
                }
                if sum > 0.0 {
                    values.iter_mut().for_each(|v| *v /= sum);
                }
            }
        }
    }
}

/// One fully connected layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    /// Input-major weight matrix, `input_dim` rows of `units` columns.
    pub weights: Vec<Vec<f32>>,
    /// One bias per unit.
    pub bias: Vec<f32>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    pub fn new(weights: Vec<Vec<f32>>, bias: Vec<f32>, activation: Activation) -> Self {
        DenseLayer {
            weights,
            bias,
            activation,
        }
    }

    pub fn input_dim(&self) -> usize {
        self.weights.len()
    }

    pub fn units(&self) -> usize {
        self.bias.len()
    }

    fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut output = self.bias.clone();
        for (x, row) in input.iter().zip(&self.weights) {
            if *x == 0.0 {
                continue;
            }
            for (out, w) in output.iter_mut().zip(row) {
                *out += x * w;
            }
        }
        self.activation.apply(&mut output);
        output
    }
}

/// A sequential stack of dense layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseNetwork {
    input_dim: usize,
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Build a network, checking that the layer shapes chain together.
    pub fn new(input_dim: usize, layers: Vec<DenseLayer>) -> Result<Self> {
        let network = DenseNetwork { input_dim, layers };
        network.validate().map_err(AssistError::artifact)?;
        Ok(network)
    }

    /// Load a network from a JSON artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let network: DenseNetwork = artifact::read_json(path.as_ref())?;
        network.validate().map_err(|e| {
            AssistError::artifact(format!("{}: {e}", path.as_ref().display()))
        })?;
        log::info!(
            "Loaded dense network from {} ({} -> {}, {} layers)",
            path.as_ref().display(),
            network.input_dim,
            network.output_dim(),
            network.layers.len()
        );
        Ok(network)
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.layers.is_empty() {
            return Err("network has no layers".to_string());
        }

        let mut expected_inputs = self.input_dim;
        for (index, layer) in self.layers.iter().enumerate() {
            if layer.input_dim() != expected_inputs {
                return Err(format!(
                    "layer {index} expects {} inputs but receives {expected_inputs}",
                    layer.input_dim()
                ));
            }
            if layer.units() == 0 {
                return Err(format!("layer {index} has no units"));
            }
            if let Some(row) = layer.weights.iter().position(|row| row.len() != layer.units()) {
                return Err(format!(
                    "layer {index} weight row {row} has {} columns, expected {}",
                    layer.weights[row].len(),
                    layer.units()
                ));
            }
            expected_inputs = layer.units();
        }

        Ok(())
    }
}

impl Classifier for DenseNetwork {
    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn output_dim(&self) -> usize {
        self.layers.last().map_or(0, DenseLayer::units)
    }

    fn predict(&self, features: &[f32]) -> Result<Vec<f32>> {
        if features.len() != self.input_dim {
            return Err(AssistError::inference(format!(
                "expected {} features, got {}",
                self.input_dim,
                features.len()
            )));
        }

        let mut activations = features.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }

        Ok(activations)
    }
}
