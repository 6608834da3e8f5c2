//! Structural validation of untyped payloads.
//!
//! The two entry points, [`validate_new_patient`] and [`validate_new_entry`], take a decoded but
//! otherwise arbitrary JSON value and either narrow it field by field into a typed domain value
//! or fail with the first [`ValidationError`] encountered. Nothing here logs, allocates ids or
//! touches the repository.
//!
//! Rules shared by both entry points:
//! - the input must be a JSON object;
//! - required keys are checked for presence before any value is inspected;
//! - text fields must be JSON strings;
//! - dates must be strings holding a calendar date: `YYYY-MM-DD`, an RFC 3339 timestamp or a
//!   local date-time without offset (for timestamps only the date part is kept).
//!
//! `diagnosisCodes` is deliberately permissive. A missing or `null` value becomes an empty list,
//! and the codes themselves are not checked against the diagnosis catalogue. The only check is
//! the one the typed model needs: the value must be an array of strings.

use crate::entry::{
    DiagnosisCode, Discharge, EntryBase, EntryKind, HealthCheckRating, NewEntry, SickLeave,
};
use crate::error::{ValidationError, ValidationResult};
use crate::patient::{Gender, NewPatient};
use crate::NonEmptyText;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

type Object = Map<String, Value>;

const PATIENT_FIELDS: [&str; 5] = ["name", "dateOfBirth", "ssn", "gender", "occupation"];
const ENTRY_FIELDS: [&str; 4] = ["type", "date", "specialist", "description"];
const LOCAL_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Narrows an untyped payload into a [`NewPatient`].
///
/// The returned patient always has an empty `entries` list; the identifier is assigned later by
/// the repository.
///
/// # Errors
///
/// - [`ValidationError::NotAnObject`] if `input` is not a JSON object.
/// - [`ValidationError::MissingFields`] listing every absent mandatory key.
/// - [`ValidationError::MissingOrInvalidField`] for a non-string (or blank `name`) text field.
/// - [`ValidationError::InvalidDate`] for an unparseable `dateOfBirth`.
/// - [`ValidationError::InvalidEnum`] for a `gender` outside the fixed set.
pub fn validate_new_patient(input: &Value) -> ValidationResult<NewPatient> {
    let object = as_object(input)?;

    let missing: Vec<&'static str> = PATIENT_FIELDS
        .into_iter()
        .filter(|field| !object.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    Ok(NewPatient {
        name: parse_name(&object["name"])?,
        date_of_birth: parse_date("dateOfBirth", &object["dateOfBirth"])?,
        ssn: parse_string("ssn", &object["ssn"])?,
        gender: parse_gender(&object["gender"])?,
        occupation: parse_string("occupation", &object["occupation"])?,
        entries: Vec::new(),
    })
}

/// Narrows an untyped payload into a [`NewEntry`] of one of the three known variants.
///
/// # Errors
///
/// - [`ValidationError::NotAnObject`] if `input` is not a JSON object.
/// - [`ValidationError::MissingField`] for the first absent key among `type`, `date`,
///   `specialist`, `description`, or an absent variant-required key.
/// - [`ValidationError::MissingOrInvalidField`] / [`ValidationError::InvalidDate`] for a badly
///   typed common field.
/// - [`ValidationError::UnknownEntryType`] for a `type` other than the three known tags.
/// - [`ValidationError::InvalidRating`], [`ValidationError::InvalidSickLeave`] or
///   [`ValidationError::InvalidDischarge`] for malformed variant fields.
pub fn validate_new_entry(input: &Value) -> ValidationResult<NewEntry> {
    let object = as_object(input)?;

    for field in ENTRY_FIELDS {
        if !object.contains_key(field) {
            return Err(ValidationError::MissingField(field));
        }
    }

    let base = EntryBase {
        description: parse_string("description", &object["description"])?,
        date: parse_date("date", &object["date"])?,
        specialist: parse_string("specialist", &object["specialist"])?,
        diagnosis_codes: parse_diagnosis_codes(object)?,
    };

    let tag = &object["type"];
    let kind = match tag.as_str() {
        Some("HealthCheck") => {
            let rating = object
                .get("healthCheckRating")
                .ok_or(ValidationError::MissingField("healthCheckRating"))?;
            EntryKind::HealthCheck {
                health_check_rating: parse_health_check_rating(rating)?,
            }
        }
        Some("OccupationalHealthcare") => {
            let employer = object
                .get("employerName")
                .ok_or(ValidationError::MissingField("employerName"))?;
            EntryKind::OccupationalHealthcare {
                employer_name: parse_string("employerName", employer)?,
                sick_leave: parse_sick_leave(object)?,
            }
        }
        Some("Hospital") => EntryKind::Hospital {
            discharge: parse_discharge(object)?,
        },
        _ => return Err(ValidationError::UnknownEntryType(describe(tag))),
    };

    Ok(NewEntry { base, kind })
}

/// Parses a calendar date from `YYYY-MM-DD`, an RFC 3339 timestamp or an ISO 8601 local
/// date-time without offset (`2020-01-01T08:15:00`, `2020-01-01T08:15`).
///
/// Returns `None` for anything else, including the empty string.
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            LOCAL_DATE_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|dt| dt.date())
        })
}

fn as_object(input: &Value) -> ValidationResult<&Object> {
    input.as_object().ok_or(ValidationError::NotAnObject)
}

/// Strings are echoed raw in error messages; everything else as JSON text.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_string(field: &'static str, value: &Value) -> ValidationResult<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ValidationError::MissingOrInvalidField {
            field,
            value: describe(value),
        })
}

fn parse_name(value: &Value) -> ValidationResult<NonEmptyText> {
    value
        .as_str()
        .and_then(|s| NonEmptyText::new(s).ok())
        .ok_or_else(|| ValidationError::MissingOrInvalidField {
            field: "name",
            value: describe(value),
        })
}

fn parse_date(field: &'static str, value: &Value) -> ValidationResult<NaiveDate> {
    value
        .as_str()
        .and_then(parse_calendar_date)
        .ok_or_else(|| ValidationError::InvalidDate {
            field,
            value: describe(value),
        })
}

fn parse_gender(value: &Value) -> ValidationResult<Gender> {
    value
        .as_str()
        .and_then(Gender::from_wire)
        .ok_or_else(|| ValidationError::InvalidEnum {
            field: "gender",
            value: describe(value),
        })
}

fn parse_health_check_rating(value: &Value) -> ValidationResult<HealthCheckRating> {
    let integral = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && (0.0..=3.0).contains(f))
                .map(|f| f as u64)
        }),
        _ => None,
    };

    integral
        .and_then(HealthCheckRating::from_value)
        .ok_or_else(|| ValidationError::InvalidRating(describe(value)))
}

fn parse_diagnosis_codes(object: &Object) -> ValidationResult<Vec<DiagnosisCode>> {
    let invalid = |value: &Value| ValidationError::MissingOrInvalidField {
        field: "diagnosisCodes",
        value: describe(value),
    };

    match object.get("diagnosisCodes") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value @ Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(DiagnosisCode::new)
                    .ok_or_else(|| invalid(value))
            })
            .collect(),
        Some(other) => Err(invalid(other)),
    }
}

fn parse_sick_leave(object: &Object) -> ValidationResult<Option<SickLeave>> {
    let Some(value) = object.get("sickLeave") else {
        return Ok(None);
    };
    let group = value
        .as_object()
        .ok_or(ValidationError::InvalidSickLeave("sickLeave"))?;

    let date_in = |field: &'static str| {
        group
            .get(field)
            .and_then(Value::as_str)
            .and_then(parse_calendar_date)
            .ok_or(ValidationError::InvalidSickLeave(field))
    };

    Ok(Some(SickLeave {
        start_date: date_in("startDate")?,
        end_date: date_in("endDate")?,
    }))
}

fn parse_discharge(object: &Object) -> ValidationResult<Option<Discharge>> {
    let Some(value) = object.get("discharge") else {
        return Ok(None);
    };
    let group = value
        .as_object()
        .ok_or(ValidationError::InvalidDischarge("discharge"))?;

    let date = group
        .get("date")
        .and_then(Value::as_str)
        .and_then(parse_calendar_date)
        .ok_or(ValidationError::InvalidDischarge("date"))?;
    let criteria = group
        .get("criteria")
        .and_then(Value::as_str)
        .ok_or(ValidationError::InvalidDischarge("criteria"))?;

    Ok(Some(Discharge {
        date,
        criteria: criteria.to_owned(),
    }))
}
