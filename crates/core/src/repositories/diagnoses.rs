//! Diagnosis catalogue.
//!
//! A fixed, read-only list of known diagnosis codes. Entry validation does not consult it;
//! diagnosis codes on entries are accepted as given.

use crate::constants::BUNDLED_DIAGNOSES_JSON;
use crate::entry::DiagnosisCode;
use crate::{PatientError, PatientResult};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub code: DiagnosisCode,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latin: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct DiagnosisCatalogue {
    diagnoses: Vec<Diagnosis>,
}

impl DiagnosisCatalogue {
    pub fn new(diagnoses: Vec<Diagnosis>) -> Self {
        Self { diagnoses }
    }

    /// Loads the catalogue compiled into the binary.
    pub fn bundled() -> PatientResult<Self> {
        let diagnoses = serde_json::from_str(BUNDLED_DIAGNOSES_JSON).map_err(catalogue_error)?;
        Ok(Self::new(diagnoses))
    }

    /// All diagnoses in catalogue order.
    pub fn list_all(&self) -> &[Diagnosis] {
        &self.diagnoses
    }

    pub fn find(&self, code: &str) -> Option<&Diagnosis> {
        self.diagnoses.iter().find(|d| d.code.as_str() == code)
    }
}

fn catalogue_error(source: serde_json::Error) -> PatientError {
    PatientError::SeedSchema {
        path: "diagnoses".into(),
        source,
    }
}
