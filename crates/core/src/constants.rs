//! Constants used throughout the patientor core crate.

/// Bundled seed patients, compiled into the binary.
pub const BUNDLED_PATIENTS_JSON: &str = include_str!("../data/patients.json");

/// Bundled diagnosis catalogue, compiled into the binary.
pub const BUNDLED_DIAGNOSES_JSON: &str = include_str!("../data/diagnoses.json");

/// Environment variable selecting the seed source.
pub const SEED_ENV_VAR: &str = "PATIENTOR_SEED";

/// Seed setting that selects the bundled data set.
pub const SEED_BUNDLED: &str = "bundled";

/// Seed setting that starts with an empty repository.
pub const SEED_NONE: &str = "none";

/// Environment variable for the REST listen address.
pub const REST_ADDR_ENV_VAR: &str = "PATIENTOR_REST_ADDR";

/// Default REST listen address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3001";
