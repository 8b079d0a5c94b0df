//! WHO growth reference values and z-scores.
//!
//! Reference values are the WHO Child Growth Standards at 24 months. They are
//! applied to every child regardless of `Age`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AssistError, Result};

/// Child sex as coded in requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Parse the request code. Only `"M"` and `"F"` are accepted.
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            other => Err(AssistError::invalid_input(format!("Unknown sex: {other}"))),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    /// Reference values for this sex.
    pub fn reference(self) -> &'static GrowthReference {
        match self {
            Sex::Male => &BOYS_24_MONTHS,
            Sex::Female => &GIRLS_24_MONTHS,
        }
    }
}

impl FromStr for Sex {
    type Err = AssistError;

    fn from_str(s: &str) -> Result<Self> {
        Sex::from_code(s)
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Per-sex reference values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthReference {
    /// Height-for-age median, cm.
    pub hfa_median: f64,
    pub hfa_sd: f64,
    /// Weight-for-age median, kg.
    pub wfa_median: f64,
    pub wfa_sd: f64,
    /// Expected weight per cm of height.
    pub wfh_slope: f64,
    pub wfh_sd: f64,
}

pub const BOYS_24_MONTHS: GrowthReference = GrowthReference {
    hfa_median: 87.1,
    hfa_sd: 3.2,
    wfa_median: 11.5,
    wfa_sd: 1.5,
    wfh_slope: 0.10,
    wfh_sd: 1.2,
};

pub const GIRLS_24_MONTHS: GrowthReference = GrowthReference {
    hfa_median: 85.7,
    hfa_sd: 3.2,
    wfa_median: 10.8,
    wfa_sd: 1.4,
    wfh_slope: 0.095,
    wfh_sd: 1.1,
};

/// Body mass index from weight in kg and length in cm.
pub fn bmi(weight_kg: f64, length_cm: f64) -> f64 {
    let meters = length_cm / 100.0;
    weight_kg / (meters * meters)
}

pub fn height_for_age_z(height_cm: f64, sex: Sex) -> f64 {
    let reference = sex.reference();
    (height_cm - reference.hfa_median) / reference.hfa_sd
}

pub fn weight_for_age_z(weight_kg: f64, sex: Sex) -> f64 {
    let reference = sex.reference();
    (weight_kg - reference.wfa_median) / reference.wfa_sd
}

/// Simplified weight-for-height z-score: expected weight is linear in height.
pub fn weight_for_height_z(weight_kg: f64, height_cm: f64, sex: Sex) -> f64 {
    let reference = sex.reference();
    (weight_kg - reference.wfh_slope * height_cm) / reference.wfh_sd
}

/// WHO stunting class from a height-for-age z-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhoClassification {
    #[serde(rename = "Severely stunted")]
    SeverelyStunted,
    #[serde(rename = "Stunted")]
    Stunted,
    #[serde(rename = "Not stunted")]
    NotStunted,
}

impl WhoClassification {
    pub fn from_z(z: f64) -> Self {
        if z < -3.0 {
            WhoClassification::SeverelyStunted
        } else if z < -2.0 {
            WhoClassification::Stunted
        } else {
            WhoClassification::NotStunted
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WhoClassification::SeverelyStunted => "Severely stunted",
            WhoClassification::Stunted => "Stunted",
            WhoClassification::NotStunted => "Not stunted",
        }
    }
}

impl fmt::Display for WhoClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Four-band risk level used to pick follow-up recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Severe,
    Moderate,
    Mild,
    Normal,
}

impl RiskLevel {
    pub fn from_z(z: f64) -> Self {
        if z < -3.0 {
            RiskLevel::Severe
        } else if z < -2.0 {
            RiskLevel::Moderate
        } else if z < -1.0 {
            RiskLevel::Mild
        } else {
            RiskLevel::Normal
        }
    }
}
