//! Model dispatch: route an encoded record to the selected predictor and
//! translate its label into a verdict.

use crate::encoder::encode;
use crate::registry::ModelRegistry;
use crate::{Error, ModelKind, PatientInput, PatientRecord, Result};
use serde::Serialize;
use std::fmt;

/// The two outcomes shown to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Verdict {
    LowRisk,
    HighRisk,
}

impl Verdict {
    /// Map a predictor's class label; only 0 and 1 are defined
    pub fn from_label(label: u8) -> Option<Self> {
        match label {
            0 => Some(Verdict::LowRisk),
            1 => Some(Verdict::HighRisk),
            _ => None,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Verdict::LowRisk => "Low Risk",
            Verdict::HighRisk => "High Risk",
        }
    }

    /// Advisory sentence rendered under the headline
    pub fn advice(self) -> &'static str {
        match self {
            Verdict::LowRisk => "You appear to be healthy. Keep maintaining your lifestyle!",
            Verdict::HighRisk => {
                "You might be at risk for heart disease. Please consult a healthcare provider."
            }
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.headline())
    }
}

/// Outcome of one prediction request
#[derive(Clone, Debug)]
pub struct RiskAssessment {
    pub model: ModelKind,
    pub record: PatientRecord,
    pub verdict: Verdict,
}

/// Run the selected predictor on an encoded record.
///
/// A label other than 0 or 1 is an integration error and fails the request.
pub fn dispatch(
    registry: &ModelRegistry,
    model: ModelKind,
    record: &PatientRecord,
) -> Result<Verdict> {
    let label = registry.get(model).predict(record)?;

    let verdict = Verdict::from_label(label).ok_or_else(|| Error::UnexpectedLabel {
        model: model.to_string(),
        label,
    })?;

    tracing::info!(model = %model, label, verdict = %verdict, "Prediction complete");
    Ok(verdict)
}

/// Encode the form answers and dispatch them to `model`
pub fn assess_risk(
    registry: &ModelRegistry,
    model: ModelKind,
    input: &PatientInput,
) -> Result<RiskAssessment> {
    let record = encode(input);
    let verdict = dispatch(registry, model, &record)?;

    Ok(RiskAssessment {
        model,
        record,
        verdict,
    })
}
