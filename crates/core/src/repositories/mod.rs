//! In-memory repositories.
//!
//! - [`patients`]: the patient collection and its entry histories.
//! - [`diagnoses`]: the read-only diagnosis catalogue.

pub mod diagnoses;
pub mod patients;
