//! Internal implementation of record identifiers and generators.

use crate::{UuidError, UuidResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// An opaque identifier for a patient or an entry.
///
/// Once constructed the identifier is guaranteed to be non-empty and free of leading or
/// trailing whitespace. Beyond that the value is opaque: equality is plain string equality.
///
/// # Construction
/// - [`RecordId::parse`] validates an externally supplied identifier.
/// - An [`IdGenerator`] allocates fresh identifiers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RecordId(String);

impl RecordId {
    /// Validates and wraps an identifier string.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is empty, or has surrounding whitespace.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if input.is_empty() || input.trim() != input {
            return Err(UuidError::InvalidInput(format!(
                "identifier must be non-empty without surrounding whitespace, got: '{}'",
                input
            )));
        }
        Ok(Self(input.to_owned()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Source of fresh, globally unique identifiers.
///
/// Called once per new patient and once per new entry. Implementations must never return the
/// same identifier twice over the lifetime of the generator.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> RecordId;
}

/// Generates random version 4 UUIDs in hyphenated lowercase form.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl UuidGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> RecordId {
        RecordId(Uuid::new_v4().hyphenated().to_string())
    }
}

/// Generates `<prefix>-0001`, `<prefix>-0002`, ... in order.
///
/// Deterministic, so suitable for tests and for tooling that never persists identifiers.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose identifiers start with `prefix`.
    ///
    /// A blank prefix falls back to `"id"`.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = if prefix.trim().is_empty() {
            "id".to_string()
        } else {
            prefix.trim().to_string()
        };
        Self {
            prefix,
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> RecordId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        RecordId(format!("{}-{:04}", self.prefix, n))
    }
}
