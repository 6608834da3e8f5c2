//! Initial repository contents.
//!
//! Seed data is trusted: it is decoded with serde straight into the typed model rather than run
//! through the structural validator. Decoding is still strict about types, and identifiers must
//! be unique, so a bad seed file fails at startup instead of surfacing later.

use crate::config::SeedSource;
use crate::constants::BUNDLED_PATIENTS_JSON;
use crate::patient::Patient;
use crate::{PatientError, PatientResult};
use std::collections::HashSet;
use std::fs;

/// Loads the seed patients selected by `source`.
///
/// # Errors
///
/// Returns [`PatientError`] if the seed file cannot be read, does not match the patient schema,
/// or reuses an identifier.
pub fn load_patients(source: &SeedSource) -> PatientResult<Vec<Patient>> {
    match source {
        SeedSource::Bundled => parse_patients(BUNDLED_PATIENTS_JSON),
        SeedSource::Empty => Ok(Vec::new()),
        SeedSource::File(path) => {
            let contents = fs::read_to_string(path).map_err(PatientError::FileRead)?;
            parse_patients(&contents)
        }
    }
}

/// Parses a JSON array of patients in wire form.
///
/// Schema errors name the failing path (e.g. `[3].entries[0].healthCheckRating`).
pub fn parse_patients(json_text: &str) -> PatientResult<Vec<Patient>> {
    let mut deserializer = serde_json::Deserializer::from_str(json_text);

    let patients: Vec<Patient> = match serde_path_to_error::deserialize(&mut deserializer) {
        Ok(parsed) => parsed,
        Err(err) => {
            let path = err.path().to_string();
            let path = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            return Err(PatientError::SeedSchema {
                path,
                source: err.into_inner(),
            });
        }
    };

    deserializer
        .end()
        .map_err(|source| PatientError::SeedSchema {
            path: "<root>".into(),
            source,
        })?;

    check_unique_ids(&patients)?;
    Ok(patients)
}

fn check_unique_ids(patients: &[Patient]) -> PatientResult<()> {
    let mut patient_ids = HashSet::new();
    let mut entry_ids = HashSet::new();

    for patient in patients {
        if !patient_ids.insert(patient.id.as_str()) {
            return Err(PatientError::InvalidInput(format!(
                "duplicate patient id in seed data: {}",
                patient.id
            )));
        }
        for entry in &patient.entries {
            if !entry_ids.insert(entry.id.as_str()) {
                return Err(PatientError::InvalidInput(format!(
                    "duplicate entry id in seed data: {}",
                    entry.id
                )));
            }
        }
    }

    Ok(())
}
