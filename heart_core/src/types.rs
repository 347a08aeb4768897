//! Core domain types for the heart disease risk predictor.
//!
//! This module defines:
//! - The categorical answers offered by the form (one enum per selector)
//! - The model selector
//! - The raw patient input and the encoded patient record

use crate::schema::{Feature, FEATURE_COUNT};
use crate::{Error, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::Index;

// ============================================================================
// Categorical Labels
// ============================================================================

/// A closed set of human-readable choices offered by a single form selector.
///
/// `ALL` lists the variants in the order the form presents them; the first
/// entry is the form's default.
pub trait Categorical: Copy + Sized + 'static {
    /// Name used when reporting an unrecognised label
    const FIELD: &'static str;

    /// Every variant, in form order
    const ALL: &'static [Self];

    /// Display label, exactly as the form shows it
    fn label(self) -> &'static str;

    /// Additional accepted spellings (abbreviations)
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }

    /// Parse a label, ignoring case, whitespace and punctuation
    fn parse_label(input: &str) -> Result<Self> {
        let wanted = normalize_label(input);
        Self::ALL
            .iter()
            .copied()
            .find(|variant| {
                normalize_label(variant.label()) == wanted
                    || variant
                        .aliases()
                        .iter()
                        .any(|alias| normalize_label(alias) == wanted)
            })
            .ok_or_else(|| Error::UnknownLabel {
                field: Self::FIELD,
                value: input.to_string(),
            })
    }
}

fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// FromStr/Display/serde glue shared by every categorical enum
macro_rules! label_conversions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl std::str::FromStr for $ty {
                type Err = Error;

                fn from_str(s: &str) -> Result<Self> {
                    <$ty as Categorical>::parse_label(s)
                }
            }

            impl TryFrom<String> for $ty {
                type Error = Error;

                fn try_from(s: String) -> Result<Self> {
                    s.parse()
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> String {
                    value.label().to_string()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

/// Patient sex
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Categorical for Sex {
    const FIELD: &'static str = "sex";
    const ALL: &'static [Self] = &[Sex::Male, Sex::Female];

    fn label(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Sex::Male => &["m"],
            Sex::Female => &["f"],
        }
    }
}

/// Answer to a yes/no question (fasting blood sugar, exercise angina)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum YesNo {
    #[default]
    Yes,
    No,
}

impl YesNo {
    /// Parse the answer to one yes/no question, naming that question on failure
    pub fn parse_for(field: &'static str, input: &str) -> Result<Self> {
        Self::parse_label(input).map_err(|e| e.for_field(field))
    }
}

impl Categorical for YesNo {
    const FIELD: &'static str = "yes/no";
    const ALL: &'static [Self] = &[YesNo::Yes, YesNo::No];

    fn label(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            YesNo::Yes => &["y", "true"],
            YesNo::No => &["n", "false"],
        }
    }
}

/// Chest pain type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChestPainType {
    #[default]
    TypicalAngina,
    AtypicalAngina,
    NonAnginalPain,
    Asymptomatic,
}

impl Categorical for ChestPainType {
    const FIELD: &'static str = "chest pain type";
    const ALL: &'static [Self] = &[
        ChestPainType::TypicalAngina,
        ChestPainType::AtypicalAngina,
        ChestPainType::NonAnginalPain,
        ChestPainType::Asymptomatic,
    ];

    fn label(self) -> &'static str {
        match self {
            ChestPainType::TypicalAngina => "Typical Angina",
            ChestPainType::AtypicalAngina => "Atypical Angina",
            ChestPainType::NonAnginalPain => "Non-anginal Pain",
            ChestPainType::Asymptomatic => "Asymptomatic",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            ChestPainType::TypicalAngina => &["ta", "typical"],
            ChestPainType::AtypicalAngina => &["ata", "atypical"],
            ChestPainType::NonAnginalPain => &["nap", "non-anginal"],
            ChestPainType::Asymptomatic => &["asy"],
        }
    }
}

/// Resting electrocardiogram result
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RestingEcg {
    #[default]
    Normal,
    StTWaveAbnormality,
    LeftVentricularHypertrophy,
}

impl Categorical for RestingEcg {
    const FIELD: &'static str = "resting ECG";
    const ALL: &'static [Self] = &[
        RestingEcg::Normal,
        RestingEcg::StTWaveAbnormality,
        RestingEcg::LeftVentricularHypertrophy,
    ];

    fn label(self) -> &'static str {
        match self {
            RestingEcg::Normal => "Normal",
            RestingEcg::StTWaveAbnormality => "ST-T Wave Abnormality",
            RestingEcg::LeftVentricularHypertrophy => "Left Ventricular Hypertrophy",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            RestingEcg::Normal => &[],
            RestingEcg::StTWaveAbnormality => &["st", "st-t"],
            RestingEcg::LeftVentricularHypertrophy => &["lvh"],
        }
    }
}

/// Slope of the peak exercise ST segment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StSlope {
    #[default]
    Upsloping,
    Flat,
    Downsloping,
}

impl Categorical for StSlope {
    const FIELD: &'static str = "ST slope";
    const ALL: &'static [Self] = &[StSlope::Upsloping, StSlope::Flat, StSlope::Downsloping];

    fn label(self) -> &'static str {
        match self {
            StSlope::Upsloping => "Upsloping",
            StSlope::Flat => "Flat",
            StSlope::Downsloping => "Downsloping",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            StSlope::Upsloping => &["up"],
            StSlope::Flat => &[],
            StSlope::Downsloping => &["down"],
        }
    }
}

/// Thalassemia stress-test result
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Thalassemia {
    #[default]
    Normal,
    FixedDefect,
    ReversibleDefect,
}

impl Categorical for Thalassemia {
    const FIELD: &'static str = "thalassemia";
    const ALL: &'static [Self] = &[
        Thalassemia::Normal,
        Thalassemia::FixedDefect,
        Thalassemia::ReversibleDefect,
    ];

    fn label(self) -> &'static str {
        match self {
            Thalassemia::Normal => "Normal",
            Thalassemia::FixedDefect => "Fixed Defect",
            Thalassemia::ReversibleDefect => "Reversible Defect",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Thalassemia::Normal => &[],
            Thalassemia::FixedDefect => &["fixed"],
            Thalassemia::ReversibleDefect => &["reversible"],
        }
    }
}

// ============================================================================
// Model Selector
// ============================================================================

/// The four classifier families a user can choose from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModelKind {
    #[default]
    LogisticRegression,
    SupportVectorMachine,
    DecisionTree,
    RandomForest,
}

impl Categorical for ModelKind {
    const FIELD: &'static str = "model";
    const ALL: &'static [Self] = &[
        ModelKind::LogisticRegression,
        ModelKind::SupportVectorMachine,
        ModelKind::DecisionTree,
        ModelKind::RandomForest,
    ];

    fn label(self) -> &'static str {
        match self {
            ModelKind::LogisticRegression => "Logistic Regression",
            ModelKind::SupportVectorMachine => "Support Vector Machine",
            ModelKind::DecisionTree => "Decision Tree",
            ModelKind::RandomForest => "Random Forest",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            ModelKind::LogisticRegression => &["lr", "logistic"],
            ModelKind::SupportVectorMachine => &["svm", "svc"],
            ModelKind::DecisionTree => &["dt", "tree"],
            ModelKind::RandomForest => &["rf", "forest"],
        }
    }
}

label_conversions!(
    Sex,
    YesNo,
    ChestPainType,
    RestingEcg,
    StSlope,
    Thalassemia,
    ModelKind,
);

// ============================================================================
// Patient Input and Record
// ============================================================================

/// Raw answers collected by the form for one request.
///
/// Field names double as CSV headers for batch input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    pub age: u32,
    pub sex: Sex,
    pub chest_pain_type: ChestPainType,
    pub resting_bp: u32,
    pub cholesterol: u32,
    #[serde(deserialize_with = "fasting_blood_sugar_answer")]
    pub fasting_blood_sugar: YesNo,
    pub resting_ecg: RestingEcg,
    pub max_heart_rate: u32,
    #[serde(deserialize_with = "exercise_angina_answer")]
    pub exercise_angina: YesNo,
    pub oldpeak: f64,
    pub st_slope: StSlope,
    pub major_vessels: u32,
    pub thalassemia: Thalassemia,
}

fn yes_no_answer<'de, D>(deserializer: D, feature: Feature) -> std::result::Result<YesNo, D::Error>
where
    D: Deserializer<'de>,
{
    let label = String::deserialize(deserializer)?;
    YesNo::parse_for(feature.name(), &label).map_err(D::Error::custom)
}

fn fasting_blood_sugar_answer<'de, D>(deserializer: D) -> std::result::Result<YesNo, D::Error>
where
    D: Deserializer<'de>,
{
    yes_no_answer(deserializer, Feature::FastingBloodSugar)
}

fn exercise_angina_answer<'de, D>(deserializer: D) -> std::result::Result<YesNo, D::Error>
where
    D: Deserializer<'de>,
{
    yes_no_answer(deserializer, Feature::ExerciseAngina)
}

/// The form's initial values
impl Default for PatientInput {
    fn default() -> Self {
        Self {
            age: 45,
            sex: Sex::default(),
            chest_pain_type: ChestPainType::default(),
            resting_bp: 120,
            cholesterol: 200,
            fasting_blood_sugar: YesNo::default(),
            resting_ecg: RestingEcg::default(),
            max_heart_rate: 150,
            exercise_angina: YesNo::default(),
            oldpeak: 1.0,
            st_slope: StSlope::default(),
            major_vessels: 0,
            thalassemia: Thalassemia::default(),
        }
    }
}

/// The positional feature vector handed to a predictor
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PatientRecord([f64; FEATURE_COUNT]);

impl PatientRecord {
    /// Wrap an already-encoded vector (schema order)
    pub fn from_features(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn features(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }
}

impl Index<Feature> for PatientRecord {
    type Output = f64;

    fn index(&self, feature: Feature) -> &f64 {
        &self.0[feature.index()]
    }
}

impl fmt::Display for PatientRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            // Oldpeak is fractional: shortest exact form, always with a decimal point
            if Feature::ALL[i] == Feature::Oldpeak {
                write!(f, "{:?}", value)?;
            } else {
                write!(f, "{}", value)?;
            }
        }
        f.write_str("]")
    }
}
