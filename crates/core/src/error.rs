/// Reasons an untyped payload was rejected by the structural validator.
///
/// Every variant is a local, synchronous and permanent failure: retrying with the same input
/// gives the same error. `Display` is the human-readable reason, naming the offending field and,
/// where there is one, the offending value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("incorrect or missing data: expected an object")]
    NotAnObject,
    #[error("incorrect data: some fields are missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("{0} missing")]
    MissingField(&'static str),
    #[error("invalid value for {field}: {value}")]
    MissingOrInvalidField { field: &'static str, value: String },
    #[error("incorrect or missing date for {field}: {value}")]
    InvalidDate { field: &'static str, value: String },
    #[error("invalid or missing {field}: {value}")]
    InvalidEnum { field: &'static str, value: String },
    #[error("value of health check rating incorrect: {0}")]
    InvalidRating(String),
    #[error("invalid sick leave: {0}")]
    InvalidSickLeave(&'static str),
    #[error("invalid discharge: {0}")]
    InvalidDischarge(&'static str),
    #[error("incorrect entry type: {0}")]
    UnknownEntryType(String),
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read seed file: {0}")]
    FileRead(std::io::Error),
    #[error("seed data schema mismatch at {path}: {source}")]
    SeedSchema {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
