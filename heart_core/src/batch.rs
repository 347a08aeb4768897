//! Batch input: many patients from one CSV file.
//!
//! Headers are the feature names (`age`, `sex`, `chest_pain_type`, ...);
//! categorical cells hold the same labels the form offers.

use crate::{Error, PatientInput, Result};
use std::io::Read;
use std::path::Path;

/// Read and range-check every row of a patient CSV file
pub fn read_patients(path: &Path) -> Result<Vec<PatientInput>> {
    let file = std::fs::File::open(path)?;
    let patients = read_patients_from(file)?;
    tracing::info!("Read {} patients from {:?}", patients.len(), path);
    Ok(patients)
}

/// Read patients from any CSV source.
///
/// The first bad row aborts the read; its 1-based data row number is reported.
pub fn read_patients_from<R: Read>(reader: R) -> Result<Vec<PatientInput>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut patients = Vec::new();
    for (i, row) in reader.deserialize::<PatientInput>().enumerate() {
        let row_number = i + 1;
        let patient = row?;
        patient
            .check_ranges()
            .map_err(|e| Error::InvalidRow {
                row: row_number,
                source: Box::new(e),
            })?;
        patients.push(patient);
    }

    Ok(patients)
}
