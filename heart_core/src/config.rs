//! Configuration file support for heartrisk.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/heartrisk/config.toml`.

use crate::{Categorical, Error, ModelKind, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub prediction: PredictionConfig,
}

/// Where the four model artifacts live
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_models_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_logistic_regression_file")]
    pub logistic_regression: String,

    #[serde(default = "default_support_vector_machine_file")]
    pub support_vector_machine: String,

    #[serde(default = "default_decision_tree_file")]
    pub decision_tree: String,

    #[serde(default = "default_random_forest_file")]
    pub random_forest: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: default_models_dir(),
            logistic_regression: default_logistic_regression_file(),
            support_vector_machine: default_support_vector_machine_file(),
            decision_tree: default_decision_tree_file(),
            random_forest: default_random_forest_file(),
        }
    }
}

impl ModelsConfig {
    /// Artifact file name configured for `kind`
    pub fn file_name(&self, kind: ModelKind) -> &str {
        match kind {
            ModelKind::LogisticRegression => &self.logistic_regression,
            ModelKind::SupportVectorMachine => &self.support_vector_machine,
            ModelKind::DecisionTree => &self.decision_tree,
            ModelKind::RandomForest => &self.random_forest,
        }
    }

    /// Full path of the artifact backing `kind`
    pub fn artifact_path(&self, kind: ModelKind) -> PathBuf {
        self.dir.join(self.file_name(kind))
    }
}

/// Prediction defaults
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PredictionConfig {
    /// Model used when none is selected explicitly
    #[serde(default)]
    pub default_model: ModelKind,
}

// Default value functions
fn default_models_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("heartrisk")
        .join("models")
}

fn default_logistic_regression_file() -> String {
    "L_model".into()
}

fn default_support_vector_machine_file() -> String {
    "svm_model".into()
}

fn default_decision_tree_file() -> String {
    "DT_model".into()
}

fn default_random_forest_file() -> String {
    "RF_model".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("heartrisk")
            .join("config.toml")
    }

    /// Reject settings that could never locate an artifact
    pub fn validate(&self) -> Result<()> {
        for kind in ModelKind::ALL {
            if self.models.file_name(*kind).trim().is_empty() {
                return Err(Error::Config(format!(
                    "empty artifact file name for {}",
                    kind
                )));
            }
        }
        Ok(())
    }
}
