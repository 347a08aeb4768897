//! Decision trees and random forests over a flat node array.
//!
//! Node 0 is the root. A split sends `x[feature] <= threshold` to `left`,
//! everything else to `right`. Children always sit after their parent, so a
//! walk from the root terminates.

use crate::predictor::{argmax, Predictor};
use crate::schema::FEATURE_COUNT;
use crate::{Error, PatientRecord, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Training-sample weight of each class that reached this leaf
    Leaf { value: [f64; 2] },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::InvalidModel("decision tree has no nodes".into()));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(Error::InvalidModel(format!(
                            "node {} splits on feature {} (only {} features)",
                            i, feature, FEATURE_COUNT
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(Error::InvalidModel(format!(
                            "node {} has a non-finite threshold",
                            i
                        )));
                    }
                    for child in [left, right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(Error::InvalidModel(format!(
                                "node {} points to invalid child {}",
                                i, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    let total = value[0] + value[1];
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) || total <= 0.0 {
                        return Err(Error::InvalidModel(format!(
                            "leaf {} must hold non-negative weights with a positive total",
                            i
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Class distribution of the leaf the record falls into
    pub fn predict_proba(&self, record: &PatientRecord) -> Result<[f64; 2]> {
        let x = record.features();
        let mut index = 0;

        // A well-formed tree reaches a leaf in fewer steps than it has nodes
        for _ in 0..self.nodes.len() {
            let node = self.nodes.get(index).ok_or_else(|| {
                Error::Prediction(format!("decision tree has no node {}", index))
            })?;

            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = x.get(feature).ok_or_else(|| {
                        Error::Prediction(format!("decision tree reads missing feature {}", feature))
                    })?;
                    index = if *value <= threshold { left } else { right };
                }
                TreeNode::Leaf { value } => {
                    let total = value[0] + value[1];
                    return Ok([value[0] / total, value[1] / total]);
                }
            }
        }

        Err(Error::Prediction("decision tree walk did not reach a leaf".into()))
    }
}

impl Predictor for DecisionTree {
    fn predict(&self, record: &PatientRecord) -> Result<u8> {
        Ok(argmax(&self.predict_proba(record)?))
    }
}

/// Ensemble of trees; class probabilities are averaged across trees
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(Error::InvalidModel("random forest has no trees".into()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate()
                .map_err(|e| Error::InvalidModel(format!("tree {}: {}", i, e)))?;
        }
        Ok(())
    }

    pub fn predict_proba(&self, record: &PatientRecord) -> Result<[f64; 2]> {
        let mut sum = [0.0; 2];
        for tree in &self.trees {
            let proba = tree.predict_proba(record)?;
            sum[0] += proba[0];
            sum[1] += proba[1];
        }
        let n = self.trees.len() as f64;
        Ok([sum[0] / n, sum[1] / n])
    }
}

impl Predictor for RandomForest {
    fn predict(&self, record: &PatientRecord) -> Result<u8> {
        if self.trees.is_empty() {
            return Err(Error::Prediction("random forest has no trees".into()));
        }
        Ok(argmax(&self.predict_proba(record)?))
    }
}
