//! Kernel support vector machine (binary, dual form).

use super::linear::{dot, model_input, Standardizer};
use crate::predictor::Predictor;
use crate::schema::FEATURE_COUNT;
use crate::{Error, PatientRecord, Result};
use serde::{Deserialize, Serialize};

/// Kernel function with its hyperparameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Kernel {
    Linear,
    Rbf { gamma: f64 },
    Poly { gamma: f64, coef0: f64, degree: u32 },
    Sigmoid { gamma: f64, coef0: f64 },
}

impl Kernel {
    pub fn eval(&self, a: &[f64; FEATURE_COUNT], b: &[f64; FEATURE_COUNT]) -> f64 {
        match *self {
            Kernel::Linear => dot(a, b),
            Kernel::Rbf { gamma } => {
                let dist2: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum();
                (-gamma * dist2).exp()
            }
            Kernel::Poly {
                gamma,
                coef0,
                degree,
            } => (gamma * dot(a, b) + coef0).powi(degree as i32),
            Kernel::Sigmoid { gamma, coef0 } => (gamma * dot(a, b) + coef0).tanh(),
        }
    }

    fn validate(&self) -> Result<()> {
        let gamma = match *self {
            Kernel::Linear => return Ok(()),
            Kernel::Rbf { gamma } => gamma,
            Kernel::Poly { gamma, coef0, .. } | Kernel::Sigmoid { gamma, coef0 } => {
                if !coef0.is_finite() {
                    return Err(Error::InvalidModel("kernel coef0 must be finite".into()));
                }
                gamma
            }
        };
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(Error::InvalidModel(
                "kernel gamma must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Support vector classifier: `sum(alpha_i * K(sv_i, x)) + b > 0` is class 1
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SupportVectorMachine {
    pub kernel: Kernel,
    pub support_vectors: Vec<[f64; FEATURE_COUNT]>,
    pub dual_coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<Standardizer>,
}

impl SupportVectorMachine {
    pub fn validate(&self) -> Result<()> {
        if self.support_vectors.is_empty() {
            return Err(Error::InvalidModel("SVM has no support vectors".into()));
        }
        if self.support_vectors.len() != self.dual_coefficients.len() {
            return Err(Error::InvalidModel(format!(
                "SVM has {} support vectors but {} dual coefficients",
                self.support_vectors.len(),
                self.dual_coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.dual_coefficients.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidModel("SVM coefficients must be finite".into()));
        }
        self.kernel.validate()?;
        if let Some(scaler) = &self.scaler {
            scaler.validate()?;
        }
        Ok(())
    }

    pub fn decision_function(&self, record: &PatientRecord) -> f64 {
        let x = model_input(self.scaler.as_ref(), record);
        self.support_vectors
            .iter()
            .zip(self.dual_coefficients.iter())
            .map(|(sv, alpha)| alpha * self.kernel.eval(sv, &x))
            .sum::<f64>()
            + self.intercept
    }
}

impl Predictor for SupportVectorMachine {
    fn predict(&self, record: &PatientRecord) -> Result<u8> {
        let score = self.decision_function(record);
        if score.is_nan() {
            return Err(Error::Prediction("SVM produced a NaN score".into()));
        }
        Ok(u8::from(score > 0.0))
    }
}
