//! Column transformer: records in, numeric model input out.
//!
//! Mirrors a fitted scikit-learn `ColumnTransformer`. Each step selects
//! columns by name and emits a block of features; blocks are concatenated in
//! step order. Columns not named by any step are dropped.
//!
//! ```json
//! {
//!   "steps": [
//!     {"kind": "standard_scaler", "columns": ["Age", "BMI"], "mean": [24.0, 15.0], "scale": [6.0, 1.5]},
//!     {"kind": "one_hot", "columns": ["Sex"], "categories": [["F", "M"]], "handle_unknown": "ignore"},
//!     {"kind": "passthrough", "columns": ["Height_for_Age_Z"]}
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact;
use crate::error::{AssistError, Result};
use crate::ml::table::{Cell, Record};

/// What a one-hot step does with a category it was not fitted on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategory {
    /// Fail the request.
    #[default]
    Error,
    /// Emit an all-zero block.
    Ignore,
}

/// One fitted transformation over a set of columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformStep {
    /// `(x - mean) / scale` per column.
    StandardScaler {
        columns: Vec<String>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    /// One indicator per fitted category, per column.
    OneHot {
        columns: Vec<String>,
        categories: Vec<Vec<Cell>>,
        #[serde(default)]
        handle_unknown: UnknownCategory,
    },
    /// Numeric values copied unchanged.
    Passthrough { columns: Vec<String> },
}

impl TransformStep {
    fn columns(&self) -> &[String] {
        match self {
            TransformStep::StandardScaler { columns, .. }
            | TransformStep::OneHot { columns, .. }
            | TransformStep::Passthrough { columns } => columns,
        }
    }

    /// Number of features this step emits.
    pub fn output_width(&self) -> usize {
        match self {
            TransformStep::OneHot { categories, .. } => categories.iter().map(Vec::len).sum(),
            other => other.columns().len(),
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        match self {
            TransformStep::StandardScaler {
                columns,
                mean,
                scale,
            } => {
                if mean.len() != columns.len() || scale.len() != columns.len() {
                    return Err(format!(
                        "standard_scaler has {} columns but {} means and {} scales",
                        columns.len(),
                        mean.len(),
                        scale.len()
                    ));
                }
            }
            TransformStep::OneHot {
                columns,
                categories,
                ..
            } => {
                if categories.len() != columns.len() {
                    return Err(format!(
                        "one_hot has {} columns but {} category lists",
                        columns.len(),
                        categories.len()
                    ));
                }
            }
            TransformStep::Passthrough { .. } => {}
        }
        Ok(())
    }

    fn apply(&self, record: &Record, output: &mut Vec<f32>) -> Result<()> {
        match self {
            TransformStep::StandardScaler {
                columns,
                mean,
                scale,
            } => {
                for ((column, mean), scale) in columns.iter().zip(mean).zip(scale) {
                    let value = record.number(column)?;
                    // sklearn leaves zero-variance columns unscaled.
                    let scale = if *scale == 0.0 { 1.0 } else { *scale };
                    output.push(encode_number(column, (value - mean) / scale)?);
                }
            }
            TransformStep::OneHot {
                columns,
                categories,
                handle_unknown,
            } => {
                for (column, known) in columns.iter().zip(categories) {
                    let cell = record.get(column).ok_or_else(|| {
                        AssistError::invalid_input(format!("Missing column: {column}"))
                    })?;
                    let hit = known.iter().position(|category| category == cell);
                    if hit.is_none() && *handle_unknown == UnknownCategory::Error {
                        return Err(AssistError::invalid_input(format!(
                            "Unknown category {cell} in column {column}"
                        )));
                    }
                    if hit.is_none() {
                        log::warn!("Ignoring unknown category {cell} in column {column}");
                    }
                    output.extend((0..known.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
                }
            }
            TransformStep::Passthrough { columns } => {
                for column in columns {
                    output.push(encode_number(column, record.number(column)?)?);
                }
            }
        }
        Ok(())
    }
}

/// Narrow to the model's `f32` input, rejecting values that do not fit.
fn encode_number(column: &str, value: f64) -> Result<f32> {
    let encoded = value as f32;
    if !encoded.is_finite() {
        return Err(AssistError::inference(format!(
            "{column} is out of range for the model: {value}"
        )));
    }
    Ok(encoded)
}

/// An ordered list of fitted steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransformer {
    steps: Vec<TransformStep>,
}

impl ColumnTransformer {
    pub fn new(steps: Vec<TransformStep>) -> Result<Self> {
        let transformer = ColumnTransformer { steps };
        transformer.validate().map_err(AssistError::artifact)?;
        Ok(transformer)
    }

    /// Load a fitted transformer from a JSON artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let transformer: ColumnTransformer = artifact::read_json(path.as_ref())?;
        transformer.validate().map_err(|e| {
            AssistError::artifact(format!("{}: {e}", path.as_ref().display()))
        })?;
        log::info!(
            "Loaded column transformer from {} ({} steps, {} features)",
            path.as_ref().display(),
            transformer.steps.len(),
            transformer.output_width()
        );
        Ok(transformer)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.steps.is_empty() {
            return Err("column transformer has no steps".to_string());
        }
        self.steps.iter().try_for_each(TransformStep::validate)
    }

    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    /// Total number of features produced per record.
    pub fn output_width(&self) -> usize {
        self.steps.iter().map(TransformStep::output_width).sum()
    }

    /// Encode one record.
    pub fn transform_record(&self, record: &Record) -> Result<Vec<f32>> {
        let mut output = Vec::with_capacity(self.output_width());
        for step in &self.steps {
            step.apply(record, &mut output)?;
        }
        Ok(output)
    }

    /// Encode every record, in order.
    pub fn transform(&self, records: &[Record]) -> Result<Vec<Vec<f32>>> {
        records
            .iter()
            .map(|record| self.transform_record(record))
            .collect()
    }
}
