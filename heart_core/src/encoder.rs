//! Feature encoder: form answers to the numeric codes the models were trained on.
//!
//! Every mapping is a total `match`; there is no fallback code because an
//! answer outside a table cannot be constructed.

use crate::schema::FEATURE_COUNT;
use crate::{
    ChestPainType, PatientInput, PatientRecord, RestingEcg, Sex, StSlope, Thalassemia, YesNo,
};

impl Sex {
    pub fn code(self) -> u8 {
        match self {
            Sex::Female => 0,
            Sex::Male => 1,
        }
    }
}

impl YesNo {
    pub fn code(self) -> u8 {
        match self {
            YesNo::No => 0,
            YesNo::Yes => 1,
        }
    }
}

impl ChestPainType {
    pub fn code(self) -> u8 {
        match self {
            ChestPainType::TypicalAngina => 0,
            ChestPainType::AtypicalAngina => 1,
            ChestPainType::NonAnginalPain => 2,
            ChestPainType::Asymptomatic => 3,
        }
    }
}

impl RestingEcg {
    pub fn code(self) -> u8 {
        match self {
            RestingEcg::Normal => 0,
            RestingEcg::StTWaveAbnormality => 1,
            RestingEcg::LeftVentricularHypertrophy => 2,
        }
    }
}

impl StSlope {
    pub fn code(self) -> u8 {
        match self {
            StSlope::Upsloping => 0,
            StSlope::Flat => 1,
            StSlope::Downsloping => 2,
        }
    }
}

impl Thalassemia {
    /// Thalassemia codes start at 1, unlike the other categoricals
    pub fn code(self) -> u8 {
        match self {
            Thalassemia::Normal => 1,
            Thalassemia::FixedDefect => 2,
            Thalassemia::ReversibleDefect => 3,
        }
    }
}

/// Encode one set of form answers into the model input vector
pub fn encode(input: &PatientInput) -> PatientRecord {
    let values: [f64; FEATURE_COUNT] = [
        f64::from(input.age),
        f64::from(input.sex.code()),
        f64::from(input.chest_pain_type.code()),
        f64::from(input.resting_bp),
        f64::from(input.cholesterol),
        f64::from(input.fasting_blood_sugar.code()),
        f64::from(input.resting_ecg.code()),
        f64::from(input.max_heart_rate),
        f64::from(input.exercise_angina.code()),
        input.oldpeak,
        f64::from(input.st_slope.code()),
        f64::from(input.major_vessels),
        f64::from(input.thalassemia.code()),
    ];

    let record = PatientRecord::from_features(values);
    tracing::debug!("Encoded patient record: {}", record);
    record
}
