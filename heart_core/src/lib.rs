#![forbid(unsafe_code)]

//! Core library for the heart disease risk predictor.
//!
//! This crate provides:
//! - Domain types (form answers, model selector, patient record)
//! - Feature schema and encoder
//! - Classifier families and their JSON artifacts
//! - Model registry and dispatch to a verdict
//! - Configuration, logging and batch CSV input

pub mod types;
pub mod error;
pub mod schema;
pub mod encoder;
pub mod predictor;
pub mod models;
pub mod registry;
pub mod dispatch;
pub mod config;
pub mod logging;
pub mod batch;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use schema::{Feature, FEATURE_COUNT};
pub use encoder::encode;
pub use predictor::Predictor;
pub use registry::ModelRegistry;
pub use dispatch::{assess_risk, dispatch, RiskAssessment, Verdict};
pub use config::Config;
pub use batch::read_patients;
