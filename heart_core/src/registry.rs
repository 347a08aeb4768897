//! The fixed table of loaded predictors, one per model selector.
//!
//! Built once at startup and only ever read afterwards.

use crate::config::ModelsConfig;
use crate::models::load_artifact;
use crate::predictor::Predictor;
use crate::{Categorical, Error, ModelKind, Result};

pub struct ModelRegistry {
    logistic_regression: Box<dyn Predictor>,
    support_vector_machine: Box<dyn Predictor>,
    decision_tree: Box<dyn Predictor>,
    random_forest: Box<dyn Predictor>,
}

impl ModelRegistry {
    /// Build a registry from already-constructed predictors
    pub fn new(
        logistic_regression: Box<dyn Predictor>,
        support_vector_machine: Box<dyn Predictor>,
        decision_tree: Box<dyn Predictor>,
        random_forest: Box<dyn Predictor>,
    ) -> Self {
        Self {
            logistic_regression,
            support_vector_machine,
            decision_tree,
            random_forest,
        }
    }

    /// Load all four artifacts.
    ///
    /// Fails if any artifact is missing, malformed, or holds a different
    /// model family than its slot expects. There is no partial registry.
    pub fn load(config: &ModelsConfig) -> Result<Self> {
        tracing::info!("Loading models from {}", config.dir.display());

        let load = |kind: ModelKind| -> Result<Box<dyn Predictor>> {
            let path = config.artifact_path(kind);
            let artifact = load_artifact(&path)?;
            if artifact.kind() != kind {
                return Err(Error::ModelLoad {
                    path,
                    reason: format!("expected a {} artifact, found {}", kind, artifact.kind()),
                });
            }
            tracing::info!(model = %kind, path = %path.display(), "Model loaded");
            Ok(artifact.into_predictor())
        };

        let registry = Self::new(
            load(ModelKind::LogisticRegression)?,
            load(ModelKind::SupportVectorMachine)?,
            load(ModelKind::DecisionTree)?,
            load(ModelKind::RandomForest)?,
        );

        tracing::info!(count = ModelKind::ALL.len(), "All models loaded");
        Ok(registry)
    }

    /// The predictor serving `kind`
    pub fn get(&self, kind: ModelKind) -> &dyn Predictor {
        match kind {
            ModelKind::LogisticRegression => self.logistic_regression.as_ref(),
            ModelKind::SupportVectorMachine => self.support_vector_machine.as_ref(),
            ModelKind::DecisionTree => self.decision_tree.as_ref(),
            ModelKind::RandomForest => self.random_forest.as_ref(),
        }
    }
}
