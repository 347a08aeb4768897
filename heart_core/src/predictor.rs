//! The capability every classifier exposes to the dispatcher.

use crate::{PatientRecord, Result};

/// A pre-trained binary classifier.
///
/// Implementations are immutable once loaded, so a shared reference can be
/// used from any thread.
pub trait Predictor: Send + Sync {
    /// Classify a single record, returning the raw class label
    fn predict(&self, record: &PatientRecord) -> Result<u8>;
}

/// Index of the larger class weight; ties resolve to class 0
pub(crate) fn argmax(weights: &[f64; 2]) -> u8 {
    if weights[1] > weights[0] {
        1
    } else {
        0
    }
}
