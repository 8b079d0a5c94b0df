//! Feature engineering for the stunting model.

use crate::error::{AssistError, Result};
use crate::ml::{Cell, Record};
use crate::stunting::who::{self, Sex};

pub const AGE: &str = "Age";
pub const BODY_LENGTH: &str = "Body Length";
pub const BODY_WEIGHT: &str = "Body Weight";
pub const SEX: &str = "Sex";

pub const BMI: &str = "BMI";
pub const HEIGHT_FOR_AGE_Z: &str = "Height_for_Age_Z";
pub const WEIGHT_FOR_AGE_Z: &str = "Weight_for_Age_Z";
pub const WEIGHT_FOR_HEIGHT_Z: &str = "Weight_for_Height_Z";

/// Values derived from one child's measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthFeatures {
    pub sex: Sex,
    pub bmi: f64,
    pub height_for_age_z: f64,
    pub weight_for_age_z: f64,
    pub weight_for_height_z: f64,
}

impl GrowthFeatures {
    /// Derive the features from the raw columns of `record`.
    ///
    /// `Age` must be present and numeric but does not change the reference
    /// values used.
    pub fn from_record(record: &Record) -> Result<Self> {
        let sex = match record.get(SEX) {
            Some(Cell::Text(code)) => Sex::from_code(code)?,
            Some(other) => {
                return Err(AssistError::invalid_input(format!("Unknown sex: {other}")));
            }
            None => return Err(AssistError::invalid_input(format!("Missing column: {SEX}"))),
        };
        record.number(AGE)?;
        let length = record.number(BODY_LENGTH)?;
        let weight = record.number(BODY_WEIGHT)?;

        if length.is_nan() || length <= 0.0 {
            return Err(AssistError::invalid_input(format!(
                "{BODY_LENGTH} must be positive, got {length}"
            )));
        }

        Ok(Self {
            sex,
            bmi: who::bmi(weight, length),
            height_for_age_z: who::height_for_age_z(length, sex),
            weight_for_age_z: who::weight_for_age_z(weight, sex),
            weight_for_height_z: who::weight_for_height_z(weight, length, sex),
        })
    }

    /// Add the derived columns to `record`.
    pub fn insert_into(&self, record: &mut Record) {
        record.insert(BMI, Cell::Number(self.bmi));
        record.insert(HEIGHT_FOR_AGE_Z, Cell::Number(self.height_for_age_z));
        record.insert(WEIGHT_FOR_AGE_Z, Cell::Number(self.weight_for_age_z));
        record.insert(WEIGHT_FOR_HEIGHT_Z, Cell::Number(self.weight_for_height_z));
    }
}

/// Derive features for every row and return the augmented rows.
///
/// Every row is validated before any is returned, so a bad row anywhere
/// fails the whole request.
pub fn engineer(records: &[Record]) -> Result<(Vec<Record>, Vec<GrowthFeatures>)> {
    let features = records
        .iter()
        .map(GrowthFeatures::from_record)
        .collect::<Result<Vec<_>>>()?;

    let rows = records
        .iter()
        .zip(&features)
        .map(|(record, derived)| {
            let mut row = record.clone();
            derived.insert_into(&mut row);
            row
        })
        .collect();

    Ok((rows, features))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(sex: Cell, length: f64, weight: f64) -> Record {
        Record::new()
            .with(AGE, Cell::Number(24.0))
            .with(SEX, sex)
            .with(BODY_LENGTH, Cell::Number(length))
            .with(BODY_WEIGHT, Cell::Number(weight))
            .with("ASI Eksklusif", Cell::Text("Yes".into()))
    }

    #[test]
    fn test_engineer_adds_columns() {
        let (rows, features) =
            engineer(&[child(Cell::Text("M".into()), 87.1, 12.0)]).unwrap();

        assert_eq!(features[0].height_for_age_z, 0.0);
        assert_eq!(rows[0].number(HEIGHT_FOR_AGE_Z).unwrap(), 0.0);
        assert!(rows[0].get(BMI).is_some());
        assert!(rows[0].get(WEIGHT_FOR_AGE_Z).is_some());
        assert!(rows[0].get(WEIGHT_FOR_HEIGHT_Z).is_some());
        assert_eq!(rows[0].text("ASI Eksklusif").unwrap(), "Yes");
    }

    #[test]
    fn test_unknown_sex() {
        let err = engineer(&[
            child(Cell::Text("F".into()), 85.0, 11.0),
            child(Cell::Text("X".into()), 85.0, 11.0),
        ])
        .unwrap_err();
        assert_eq!(err.to_string(), "Unknown sex: X");

        let err = GrowthFeatures::from_record(&child(Cell::Number(1.0), 85.0, 11.0)).unwrap_err();
        assert_eq!(err.to_string(), "Unknown sex: 1");
    }

    #[test]
    fn test_invalid_measurements() {
        let err =
            GrowthFeatures::from_record(&child(Cell::Text("M".into()), 0.0, 11.0)).unwrap_err();
        assert!(err.to_string().contains("must be positive"));

        let missing_age = Record::new()
            .with(SEX, Cell::Text("M".into()))
            .with(BODY_LENGTH, Cell::Number(85.0))
            .with(BODY_WEIGHT, Cell::Number(11.0));
        let err = GrowthFeatures::from_record(&missing_age).unwrap_err();
        assert_eq!(err.to_string(), "Missing column: Age");
    }
}
