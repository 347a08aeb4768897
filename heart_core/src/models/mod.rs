//! Classifier families and their on-disk artifacts.

pub mod artifact;
pub mod linear;
pub mod svm;
pub mod tree;

pub use artifact::{load_artifact, ModelArtifact};
pub use linear::{LogisticRegression, Standardizer};
pub use svm::{Kernel, SupportVectorMachine};
pub use tree::{DecisionTree, RandomForest, TreeNode};
