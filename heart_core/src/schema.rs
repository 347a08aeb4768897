//! Feature schema shared by the form and the models.
//!
//! Models are positional: the order of [`Feature::ALL`] is the order of the
//! vector every predictor receives.

use crate::{Error, PatientInput, Result};
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Number of features in a patient record
pub const FEATURE_COUNT: usize = 13;

pub const AGE_RANGE: RangeInclusive<u32> = 20..=100;
pub const RESTING_BP_RANGE: RangeInclusive<u32> = 80..=200;
pub const CHOLESTEROL_RANGE: RangeInclusive<u32> = 100..=600;
pub const MAX_HEART_RATE_RANGE: RangeInclusive<u32> = 60..=220;
pub const OLDPEAK_RANGE: RangeInclusive<f64> = 0.0..=6.0;
pub const MAJOR_VESSELS_RANGE: RangeInclusive<u32> = 0..=3;

/// One column of the patient record, in schema order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    Age,
    Sex,
    ChestPainType,
    RestingBp,
    Cholesterol,
    FastingBloodSugar,
    RestingEcg,
    MaxHeartRate,
    ExerciseAngina,
    Oldpeak,
    StSlope,
    MajorVessels,
    Thalassemia,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Age,
        Feature::Sex,
        Feature::ChestPainType,
        Feature::RestingBp,
        Feature::Cholesterol,
        Feature::FastingBloodSugar,
        Feature::RestingEcg,
        Feature::MaxHeartRate,
        Feature::ExerciseAngina,
        Feature::Oldpeak,
        Feature::StSlope,
        Feature::MajorVessels,
        Feature::Thalassemia,
    ];

    /// Position of this feature in the record
    pub fn index(self) -> usize {
        self as usize
    }

    /// Machine name (also the batch CSV header)
    pub fn name(self) -> &'static str {
        match self {
            Feature::Age => "age",
            Feature::Sex => "sex",
            Feature::ChestPainType => "chest_pain_type",
            Feature::RestingBp => "resting_bp",
            Feature::Cholesterol => "cholesterol",
            Feature::FastingBloodSugar => "fasting_blood_sugar",
            Feature::RestingEcg => "resting_ecg",
            Feature::MaxHeartRate => "max_heart_rate",
            Feature::ExerciseAngina => "exercise_angina",
            Feature::Oldpeak => "oldpeak",
            Feature::StSlope => "st_slope",
            Feature::MajorVessels => "major_vessels",
            Feature::Thalassemia => "thalassemia",
        }
    }

    /// Prompt shown by the form
    pub fn label(self) -> &'static str {
        match self {
            Feature::Age => "Age",
            Feature::Sex => "Sex",
            Feature::ChestPainType => "Chest Pain Type",
            Feature::RestingBp => "Resting Blood Pressure (mm Hg)",
            Feature::Cholesterol => "Cholesterol (mg/dl)",
            Feature::FastingBloodSugar => "Fasting Blood Sugar > 120 mg/dl",
            Feature::RestingEcg => "Resting ECG",
            Feature::MaxHeartRate => "Maximum Heart Rate Achieved",
            Feature::ExerciseAngina => "Exercise Induced Angina",
            Feature::Oldpeak => "Oldpeak (ST depression)",
            Feature::StSlope => "Slope of Peak Exercise ST",
            Feature::MajorVessels => "Number of Major Vessels (0-3)",
            Feature::Thalassemia => "Thalassemia",
        }
    }
}

/// Check a numeric answer against the range its widget allows
pub fn check_range<T>(feature: Feature, value: T, range: &RangeInclusive<T>) -> Result<T>
where
    T: PartialOrd + Display,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(Error::OutOfRange {
            field: feature.name(),
            value: value.to_string(),
            min: format!("{:.1}", range.start()),
            max: format!("{:.1}", range.end()),
        })
    }
}

/// Parse a typed numeric answer and check it against its range
pub fn parse_in_range<T>(feature: Feature, input: &str, range: &RangeInclusive<T>) -> Result<T>
where
    T: FromStr + PartialOrd + Display,
{
    let value = input.trim().parse::<T>().map_err(|_| Error::InvalidNumber {
        field: feature.name(),
        value: input.to_string(),
    })?;
    check_range(feature, value, range)
}

impl PatientInput {
    /// Apply the form's numeric range limits.
    ///
    /// Input surfaces that cannot constrain values themselves (batch files)
    /// call this before encoding.
    pub fn check_ranges(&self) -> Result<()> {
        check_range(Feature::Age, self.age, &AGE_RANGE)?;
        check_range(Feature::RestingBp, self.resting_bp, &RESTING_BP_RANGE)?;
        check_range(Feature::Cholesterol, self.cholesterol, &CHOLESTEROL_RANGE)?;
        check_range(Feature::MaxHeartRate, self.max_heart_rate, &MAX_HEART_RATE_RANGE)?;
        check_range(Feature::Oldpeak, self.oldpeak, &OLDPEAK_RANGE)?;
        check_range(Feature::MajorVessels, self.major_vessels, &MAJOR_VESSELS_RANGE)?;
        Ok(())
    }
}
