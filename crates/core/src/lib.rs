//! # Patientor Core
//!
//! Core business logic for the patientor patient record service.
//!
//! This crate contains pure data operations:
//! - Typed domain model: [`Patient`], [`NonSensitivePatient`], [`Entry`] and its variants
//! - The structural validator that turns untyped JSON into [`NewPatient`] / [`NewEntry`]
//! - The in-memory [`PatientRepository`] and the read-only [`DiagnosisCatalogue`]
//! - Seed loading and startup configuration
//!
//! **No API concerns**: HTTP routing, status codes and wire encoding belong in `api-rest`.
//!
//! Typical flow: decode a request body into a `serde_json::Value`, pass it to
//! [`validate_new_patient`] or [`validate_new_entry`], then hand the typed result to the
//! repository.

pub mod config;
pub mod constants;
pub mod entry;
pub mod error;
pub mod patient;
pub mod repositories;
pub mod seed;
pub mod validation;

pub use config::{seed_source_from_env_value, CoreConfig, SeedSource};
pub use constants::DEFAULT_REST_ADDR;
pub use entry::{
    DiagnosisCode, Discharge, Entry, EntryBase, EntryKind, HealthCheckRating, NewEntry, SickLeave,
};
pub use error::{PatientError, PatientResult, ValidationError, ValidationResult};
pub use patient::{Gender, NewPatient, NonSensitivePatient, Patient};
pub use repositories::diagnoses::{Diagnosis, DiagnosisCatalogue};
pub use repositories::patients::PatientRepository;
pub use validation::{validate_new_entry, validate_new_patient};

pub use patientor_types::{NonEmptyText, TextError};
pub use patientor_uuid::{IdGenerator, RecordId, SequentialIdGenerator, UuidGenerator};
