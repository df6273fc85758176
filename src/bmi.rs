// ABOUTME: Pure BMI computation and classification engine
// ABOUTME: Computes body mass index from weight/height and maps it to a status bucket
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # BMI Engine
//!
//! Computes `weight_kg / (height_cm / 100)^2`, rounds the result to one
//! decimal place with round-half-to-even, and classifies the rounded value
//! into a [`BmiStatus`] bucket. The thresholds are upper-bound exclusive:
//! a BMI of exactly 25.0 is `Overweight`, not `Normal`.
//!
//! The engine is pure: no I/O, no side effects, deterministic for all
//! valid inputs.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// BMI classification bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiStatus {
    /// BMI below 18.5
    Underweight,
    /// BMI in [18.5, 25)
    Normal,
    /// BMI in [25, 30)
    Overweight,
    /// BMI of 30 or above
    Obese,
}

impl BmiStatus {
    /// Classify a (rounded) BMI value into its status bucket
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Underweight => "underweight",
            Self::Normal => "normal",
            Self::Overweight => "overweight",
            Self::Obese => "obese",
        }
    }

    /// Get display name for this status
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl Display for BmiStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for BmiStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "underweight" => Ok(Self::Underweight),
            "normal" => Ok(Self::Normal),
            "overweight" => Ok(Self::Overweight),
            "obese" => Ok(Self::Obese),
            _ => Err(AppError::invalid_input(format!("Invalid BMI status: {s}"))),
        }
    }
}

/// Result of a BMI computation: the rounded value and its classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BmiAssessment {
    /// BMI rounded to one decimal place
    pub bmi: f64,
    /// Classification of the rounded value
    pub status: BmiStatus,
}

/// Compute BMI from weight in kilograms and height in centimeters
///
/// The value is rounded to one decimal place (round-half-to-even) and
/// classified after rounding, so a raw BMI of 24.96 reports as 25.0
/// `Overweight`.
///
/// # Errors
///
/// Returns an error with `ErrorCode::InvalidInput` if either input is
/// non-finite, zero, or negative. Height is validated before the division,
/// so the computation is never undefined.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> AppResult<BmiAssessment> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(AppError::invalid_input(format!(
            "Weight must be a positive number of kilograms, got {weight_kg}"
        )));
    }
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(AppError::invalid_input(format!(
            "Height must be a positive number of centimeters, got {height_cm}"
        )));
    }

    let height_m = height_cm / 100.0;
    let bmi = round_to_tenth(weight_kg / (height_m * height_m));

    Ok(BmiAssessment {
        bmi,
        status: BmiStatus::from_bmi(bmi),
    })
}

/// Round to one decimal place, ties to even
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenarios() {
        let normal = compute_bmi(70.0, 170.0).unwrap();
        assert_eq!(normal.bmi, 24.2);
        assert_eq!(normal.status, BmiStatus::Normal);

        let underweight = compute_bmi(45.0, 160.0).unwrap();
        assert_eq!(underweight.bmi, 17.6);
        assert_eq!(underweight.status, BmiStatus::Underweight);

        let obese = compute_bmi(100.0, 170.0).unwrap();
        assert_eq!(obese.bmi, 34.6);
        assert_eq!(obese.status, BmiStatus::Obese);
    }

    #[test]
    fn test_thresholds_are_upper_bound_exclusive() {
        // 53.465 kg at 170 cm lands exactly on 18.5
        let boundary = compute_bmi(53.465, 170.0).unwrap();
        assert_eq!(boundary.bmi, 18.5);
        assert_eq!(boundary.status, BmiStatus::Normal);

        assert_eq!(BmiStatus::from_bmi(18.4), BmiStatus::Underweight);
        assert_eq!(BmiStatus::from_bmi(18.5), BmiStatus::Normal);
        assert_eq!(BmiStatus::from_bmi(24.9), BmiStatus::Normal);
        assert_eq!(BmiStatus::from_bmi(25.0), BmiStatus::Overweight);
        assert_eq!(BmiStatus::from_bmi(29.9), BmiStatus::Overweight);
        assert_eq!(BmiStatus::from_bmi(30.0), BmiStatus::Obese);
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        // .25 and .75 are exactly representable, so the tie rule is observable
        assert_eq!(round_to_tenth(24.25), 24.2);
        assert_eq!(round_to_tenth(24.75), 24.8);
        assert_eq!(round_to_tenth(17.578_125), 17.6);
    }

    #[test]
    fn test_classification_applies_to_rounded_value() {
        // Raw 24.96 rounds to 25.0 and must classify as Overweight
        let assessment = compute_bmi(24.96, 100.0).unwrap();
        assert_eq!(assessment.bmi, 25.0);
        assert_eq!(assessment.status, BmiStatus::Overweight);
    }

    #[test]
    fn test_compute_is_pure() {
        let first = compute_bmi(82.3, 179.0).unwrap();
        let second = compute_bmi(82.3, 179.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        for (weight, height) in [
            (0.0, 170.0),
            (-70.0, 170.0),
            (70.0, 0.0),
            (70.0, -170.0),
            (f64::NAN, 170.0),
            (70.0, f64::INFINITY),
        ] {
            let err = compute_bmi(weight, height).unwrap_err();
            assert_eq!(err.code, crate::errors::ErrorCode::InvalidInput);
        }
    }

    #[test]
    fn test_status_storage_round_trip() {
        for status in [
            BmiStatus::Underweight,
            BmiStatus::Normal,
            BmiStatus::Overweight,
            BmiStatus::Obese,
        ] {
            assert_eq!(status.as_str().parse::<BmiStatus>().unwrap(), status);
        }
        assert!("kurus".parse::<BmiStatus>().is_err());
    }
}
