//! Medical visit entries.
//!
//! An entry is a tagged union over three variants. All variants share a common base (description,
//! date, specialist, diagnosis codes); the `type` tag selects which additional fields apply.
//!
//! On the wire the base fields and the variant fields sit side by side in one flat object:
//!
//! ```json
//! {
//!   "id": "b4f4eca1-2aa7-4b13-9a18-4a5535c3c8da",
//!   "type": "HealthCheck",
//!   "date": "2019-10-20",
//!   "specialist": "MD House",
//!   "description": "Yearly control visit.",
//!   "diagnosisCodes": [],
//!   "healthCheckRating": 0
//! }
//! ```
//!
//! The Rust model splits that object into [`EntryBase`] and [`EntryKind`] so the variant is
//! checked exhaustively, and a variant can never carry another variant's fields.

use chrono::NaiveDate;
use patientor_uuid::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a diagnosis classification, e.g. `"S62.5"`.
///
/// Opaque: codes are not checked against the diagnosis catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosisCode(String);

impl DiagnosisCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiagnosisCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Traffic-light style health rating. `Healthy` is best.
///
/// Serialised as its integer value (0-3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HealthCheckRating {
    Healthy = 0,
    LowRisk = 1,
    HighRisk = 2,
    CriticalRisk = 3,
}

impl HealthCheckRating {
    pub fn from_value(value: u64) -> Option<Self> {
        match value {
            0 => Some(Self::Healthy),
            1 => Some(Self::LowRisk),
            2 => Some(Self::HighRisk),
            3 => Some(Self::CriticalRisk),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

impl Serialize for HealthCheckRating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.value())
    }
}

impl<'de> Deserialize<'de> for HealthCheckRating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RatingVisitor;

        impl serde::de::Visitor<'_> for RatingVisitor {
            type Value = HealthCheckRating;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer health check rating between 0 and 3")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                HealthCheckRating::from_value(v)
                    .ok_or_else(|| E::custom(format!("health check rating out of range: {v}")))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .ok()
                    .and_then(HealthCheckRating::from_value)
                    .ok_or_else(|| E::custom(format!("health check rating out of range: {v}")))
            }
        }

        deserializer.deserialize_u64(RatingVisitor)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SickLeave {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discharge {
    pub date: NaiveDate,
    pub criteria: String,
}

/// Fields shared by every entry variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryBase {
    pub description: String,
    pub date: NaiveDate,
    pub specialist: String,
    #[serde(default)]
    pub diagnosis_codes: Vec<DiagnosisCode>,
}

/// Variant-specific entry fields, tagged by `type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntryKind {
    #[serde(rename_all = "camelCase")]
    HealthCheck {
        health_check_rating: HealthCheckRating,
    },
    #[serde(rename_all = "camelCase")]
    OccupationalHealthcare {
        employer_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sick_leave: Option<SickLeave>,
    },
    Hospital {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        discharge: Option<Discharge>,
    },
}

impl EntryKind {
    /// The wire value of the `type` tag.
    pub fn tag(&self) -> &'static str {
        match self {
            EntryKind::HealthCheck { .. } => "HealthCheck",
            EntryKind::OccupationalHealthcare { .. } => "OccupationalHealthcare",
            EntryKind::Hospital { .. } => "Hospital",
        }
    }
}

/// A validated entry that has not been stored yet, so it has no identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    #[serde(flatten)]
    pub base: EntryBase,
    #[serde(flatten)]
    pub kind: EntryKind,
}

/// A stored entry. Immutable once appended to a patient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: RecordId,
    #[serde(flatten)]
    pub base: EntryBase,
    #[serde(flatten)]
    pub kind: EntryKind,
}

impl Entry {
    pub fn from_new(id: RecordId, entry: NewEntry) -> Self {
        Self {
            id,
            base: entry.base,
            kind: entry.kind,
        }
    }
}
