//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! nothing reads process-wide environment variables while a request is being handled.

use crate::constants::{SEED_BUNDLED, SEED_NONE};
use crate::{PatientError, PatientResult};
use std::path::PathBuf;

/// Where the patient repository takes its initial records from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeedSource {
    /// The data set compiled into the binary.
    Bundled,
    /// Start with no patients.
    Empty,
    /// A JSON file holding an array of patients in wire form.
    File(PathBuf),
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    seed_source: SeedSource,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::InvalidInput`] if a seed file is configured but does not exist.
    pub fn new(seed_source: SeedSource) -> PatientResult<Self> {
        if let SeedSource::File(path) = &seed_source {
            if !path.is_file() {
                return Err(PatientError::InvalidInput(format!(
                    "seed file does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(Self { seed_source })
    }

    pub fn seed_source(&self) -> &SeedSource {
        &self.seed_source
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            seed_source: SeedSource::Bundled,
        }
    }
}

/// Parse the seed source from an optional string value.
///
/// `None`, empty/whitespace and `bundled` select the bundled data; `none` starts empty; any other
/// value is taken as a file path.
pub fn seed_source_from_env_value(value: Option<String>) -> PatientResult<SeedSource> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let source = match value.as_deref() {
        None => SeedSource::Bundled,
        Some(v) if v.eq_ignore_ascii_case(SEED_BUNDLED) => SeedSource::Bundled,
        Some(v) if v.eq_ignore_ascii_case(SEED_NONE) => SeedSource::Empty,
        Some(v) => SeedSource::File(PathBuf::from(v)),
    };

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_seed_source_defaults_to_bundled() {
        for value in [None, Some("   "), Some("bundled"), Some("Bundled")] {
            let source = seed_source_from_env_value(value.map(String::from)).unwrap();
            assert_eq!(source, SeedSource::Bundled);
        }
    }

    #[test]
    fn test_seed_source_none_and_path() {
        let source = seed_source_from_env_value(Some("none".into())).unwrap();
        assert_eq!(source, SeedSource::Empty);

        let source = seed_source_from_env_value(Some(" /data/patients.json ".into())).unwrap();
        let expected = PathBuf::from("/data/patients.json");
        assert_eq!(source, SeedSource::File(expected));
    }

    #[test]
    fn test_config_rejects_missing_seed_file() {
        let missing = PathBuf::from("/definitely/not/here.json");
        let err = CoreConfig::new(SeedSource::File(missing)).expect_err("should reject");
        match err {
            PatientError::InvalidInput(msg) => assert!(msg.contains("does not exist")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_config_accepts_existing_seed_file() {
        let file = NamedTempFile::new().expect("Failed to create temp file");
        let source = SeedSource::File(file.path().to_path_buf());
        let cfg = CoreConfig::new(source.clone()).expect("CoreConfig::new should succeed");
        assert_eq!(cfg.seed_source(), &source);
    }

    #[test]
    fn test_default_config_uses_bundled_seed() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.seed_source(), &SeedSource::Bundled);
    }
}
