//! Patient records and their projections.

use crate::entry::Entry;
use crate::NonEmptyText;
use chrono::NaiveDate;
use patientor_uuid::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed gender enumeration. Wire values are lowercase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Convert to the wire string.
    pub fn to_wire(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Parse from the wire string. Matching is exact.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_wire())
    }
}

/// A full patient record, including the identity code.
///
/// `entries` is append-only and keeps insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: RecordId,
    pub name: NonEmptyText,
    pub date_of_birth: NaiveDate,
    pub ssn: String,
    pub gender: Gender,
    pub occupation: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Patient {
    /// Builds the stored record for a validated new patient.
    pub fn from_new(id: RecordId, patient: NewPatient) -> Self {
        Self {
            id,
            name: patient.name,
            date_of_birth: patient.date_of_birth,
            ssn: patient.ssn,
            gender: patient.gender,
            occupation: patient.occupation,
            entries: patient.entries,
        }
    }
}

/// A validated patient that has not been stored yet, so it has no identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: NonEmptyText,
    pub date_of_birth: NaiveDate,
    pub ssn: String,
    pub gender: Gender,
    pub occupation: String,
    pub entries: Vec<Entry>,
}

/// A patient with the identity code removed. Built on read from the live record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonSensitivePatient {
    pub id: RecordId,
    pub name: NonEmptyText,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub occupation: String,
    pub entries: Vec<Entry>,
}

impl From<&Patient> for NonSensitivePatient {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            name: patient.name.clone(),
            date_of_birth: patient.date_of_birth,
            gender: patient.gender,
            occupation: patient.occupation.clone(),
            entries: patient.entries.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_patient() -> Patient {
        serde_json::from_value(json!({
            "id": "d2773598-f723-11e9-8f0b-362b9e155667",
            "name": "Martin Riggs",
            "dateOfBirth": "1979-01-30",
            "ssn": "300179-77A",
            "gender": "male",
            "occupation": "Cop",
            "entries": []
        }))
        .unwrap()
    }

    #[test]
    fn test_gender_wire_round_trip() {
        for gender in Gender::ALL {
            assert_eq!(Gender::from_wire(gender.to_wire()), Some(gender));
        }
        assert_eq!(Gender::from_wire("Male"), None);
        assert_eq!(Gender::from_wire(""), None);
    }

    #[test]
    fn test_patient_deserialises_camel_case() {
        let patient = sample_patient();
        assert_eq!(patient.name.as_str(), "Martin Riggs");
        assert_eq!(patient.date_of_birth.to_string(), "1979-01-30");
        assert_eq!(patient.gender, Gender::Male);
    }

    #[test]
    fn test_patient_rejects_blank_name() {
        let result = serde_json::from_value::<Patient>(json!({
            "id": "p-1",
            "name": "  ",
            "dateOfBirth": "1979-01-30",
            "ssn": "x",
            "gender": "male",
            "occupation": "Cop"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_non_sensitive_projection_drops_ssn() {
        let patient = sample_patient();
        let projected = NonSensitivePatient::from(&patient);
        let value = serde_json::to_value(&projected).unwrap();

        assert!(value.get("ssn").is_none());
        assert!(!value.to_string().contains("300179-77A"));
        assert_eq!(value["id"], json!("d2773598-f723-11e9-8f0b-362b9e155667"));
        assert_eq!(value["dateOfBirth"], json!("1979-01-30"));
    }
}
