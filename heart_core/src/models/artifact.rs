//! Model artifact files.
//!
//! Each artifact is a JSON document tagged with its model family:
//!
//! ```json
//! { "kind": "logistic_regression", "coefficients": [..13 values..], "intercept": -0.4 }
//! ```

use super::linear::LogisticRegression;
use super::svm::SupportVectorMachine;
use super::tree::{DecisionTree, RandomForest};
use crate::predictor::Predictor;
use crate::{Error, ModelKind, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A deserialized model of any supported family
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression(LogisticRegression),
    SupportVectorMachine(SupportVectorMachine),
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
}

impl ModelArtifact {
    /// The selector this artifact serves
    pub fn kind(&self) -> ModelKind {
        match self {
            ModelArtifact::LogisticRegression(_) => ModelKind::LogisticRegression,
            ModelArtifact::SupportVectorMachine(_) => ModelKind::SupportVectorMachine,
            ModelArtifact::DecisionTree(_) => ModelKind::DecisionTree,
            ModelArtifact::RandomForest(_) => ModelKind::RandomForest,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            ModelArtifact::LogisticRegression(m) => m.validate(),
            ModelArtifact::SupportVectorMachine(m) => m.validate(),
            ModelArtifact::DecisionTree(m) => m.validate(),
            ModelArtifact::RandomForest(m) => m.validate(),
        }
    }

    pub fn into_predictor(self) -> Box<dyn Predictor> {
        match self {
            ModelArtifact::LogisticRegression(m) => Box::new(m),
            ModelArtifact::SupportVectorMachine(m) => Box::new(m),
            ModelArtifact::DecisionTree(m) => Box::new(m),
            ModelArtifact::RandomForest(m) => Box::new(m),
        }
    }
}

/// Read, parse and validate an artifact file.
///
/// Every failure is reported as [`Error::ModelLoad`] carrying the path.
pub fn load_artifact(path: &Path) -> Result<ModelArtifact> {
    let load_error = |reason: String| Error::ModelLoad {
        path: path.to_path_buf(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    let artifact: ModelArtifact =
        serde_json::from_str(&contents).map_err(|e| load_error(e.to_string()))?;
    artifact.validate().map_err(|e| load_error(e.to_string()))?;

    tracing::debug!("Parsed {} artifact from {:?}", artifact.kind(), path);
    Ok(artifact)
}
