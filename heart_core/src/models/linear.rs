//! Linear models: logistic regression and the shared standardization step.

use crate::predictor::Predictor;
use crate::schema::FEATURE_COUNT;
use crate::{Error, PatientRecord, Result};
use serde::{Deserialize, Serialize};

/// Per-feature standardization fitted alongside a model: `(x - mean) / scale`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Standardizer {
    pub mean: [f64; FEATURE_COUNT],
    pub scale: [f64; FEATURE_COUNT],
}

impl Standardizer {
    pub fn validate(&self) -> Result<()> {
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err(Error::InvalidModel("scaler mean must be finite".into()));
        }
        if self.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err(Error::InvalidModel(
                "scaler scale must be finite and non-zero".into(),
            ));
        }
        Ok(())
    }

    pub fn apply(&self, x: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            out[i] = (x[i] - self.mean[i]) / self.scale[i];
        }
        out
    }
}

/// Features as the model sees them (standardized when a scaler is present)
pub(crate) fn model_input(
    scaler: Option<&Standardizer>,
    record: &PatientRecord,
) -> [f64; FEATURE_COUNT] {
    match scaler {
        Some(scaler) => scaler.apply(record.features()),
        None => *record.features(),
    }
}

pub(crate) fn dot(a: &[f64; FEATURE_COUNT], b: &[f64; FEATURE_COUNT]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Binary logistic regression
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: [f64; FEATURE_COUNT],
    pub intercept: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<Standardizer>,
}

impl LogisticRegression {
    pub fn validate(&self) -> Result<()> {
        if self.coefficients.iter().any(|c| !c.is_finite()) || !self.intercept.is_finite() {
            return Err(Error::InvalidModel(
                "logistic regression weights must be finite".into(),
            ));
        }
        if let Some(scaler) = &self.scaler {
            scaler.validate()?;
        }
        Ok(())
    }

    /// Signed distance from the decision boundary (log-odds)
    pub fn decision_function(&self, record: &PatientRecord) -> f64 {
        let x = model_input(self.scaler.as_ref(), record);
        dot(&self.coefficients, &x) + self.intercept
    }

    /// Probability of the positive class
    pub fn probability(&self, record: &PatientRecord) -> f64 {
        1.0 / (1.0 + (-self.decision_function(record)).exp())
    }
}

impl Predictor for LogisticRegression {
    fn predict(&self, record: &PatientRecord) -> Result<u8> {
        let score = self.decision_function(record);
        if score.is_nan() {
            return Err(Error::Prediction(
                "logistic regression produced a NaN score".into(),
            ));
        }
        Ok(u8::from(score > 0.0))
    }
}
