//! Record identifiers and identifier generation.
//!
//! Patients and entries are identified by opaque strings. Identifiers are assigned once, by the
//! patient repository, and never change afterwards.
//!
//! This crate provides:
//! - [`RecordId`], a wrapper that guarantees a usable (non-blank, trimmed) identifier.
//! - The [`IdGenerator`] capability, injected into the repository so that tests can use
//!   deterministic identifiers.
//! - Two generators: [`UuidGenerator`] for production (random v4 UUIDs in hyphenated form, the
//!   same shape as the bundled seed data) and [`SequentialIdGenerator`] for tests and tooling.
//!
//! Externally supplied identifiers (URL paths, seed files) are parsed with [`RecordId::parse`];
//! no particular format is required because seed data may come from elsewhere.

mod service;

// Re-export public types
pub use service::{IdGenerator, RecordId, SequentialIdGenerator, Uuid, UuidGenerator};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
