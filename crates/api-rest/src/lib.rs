//! # API REST
//!
//! HTTP transport for the patientor core.
//!
//! Request bodies are decoded into untyped `serde_json::Value`s and handed to the core
//! validators; this crate only maps the outcomes onto status codes:
//! - validation failure: `400 Bad Request` with a plain-text reason
//! - unknown patient: `404 Not Found`
//!
//! Routes:
//! - `GET  /api/ping`
//! - `GET  /api/patients` (identity codes removed)
//! - `GET  /api/patients/:id`
//! - `POST /api/patients`
//! - `POST /api/patients/:id/entries`
//! - `GET  /api/diagnoses`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use patientor_core::{
    validate_new_entry, validate_new_patient, Diagnosis, DiagnosisCatalogue, NonSensitivePatient,
    Patient, PatientRepository, ValidationError,
};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across REST API handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub patients: Arc<PatientRepository>,
    pub diagnoses: Arc<DiagnosisCatalogue>,
}

impl AppState {
    pub fn new(patients: PatientRepository, diagnoses: DiagnosisCatalogue) -> Self {
        Self {
            patients: Arc::new(patients),
            diagnoses: Arc::new(diagnoses),
        }
    }
}

/// Failures a handler can report.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    NotFound,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                format!("Something went wrong. Error: {err}"),
            )
                .into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

/// Builds the REST router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ping", get(ping))
        .route("/api/patients", get(list_patients).post(create_patient))
        .route("/api/patients/:id", get(get_patient))
        .route("/api/patients/:id/entries", post(add_entry))
        .route("/api/diagnoses", get(list_diagnoses))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the REST API on `listener` until the server fails.
///
/// # Errors
///
/// Returns an error if the HTTP server fails while running.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

#[axum::debug_handler]
async fn ping() -> &'static str {
    "pong"
}

/// Lists every patient with identity codes removed.
#[axum::debug_handler]
async fn list_patients(State(state): State<AppState>) -> Json<Vec<NonSensitivePatient>> {
    Json(state.patients.list_non_sensitive())
}

/// Returns the full record for one patient.
///
/// # Errors
/// Returns `404 Not Found` if no patient has the given id.
#[axum::debug_handler]
async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    state
        .patients
        .get_by_id(&id)
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Validates and stores a new patient.
///
/// # Errors
/// Returns `400 Bad Request` with the validation reason if the body is rejected.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Patient>, ApiError> {
    let new_patient = validate_new_patient(&body).inspect_err(|e| {
        tracing::warn!("rejected patient payload: {}", e);
    })?;

    let patient = state.patients.add_patient(new_patient);
    tracing::info!("created patient {}", patient.id);
    Ok(Json(patient))
}

/// Validates an entry and appends it to a patient's history.
///
/// # Errors
/// Returns `400 Bad Request` if the body is rejected, or `404 Not Found` if the patient does not
/// exist. Validation runs first, so a bad body for an unknown patient is a 400.
#[axum::debug_handler]
async fn add_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Patient>, ApiError> {
    let new_entry = validate_new_entry(&body).inspect_err(|e| {
        tracing::warn!("rejected entry payload for patient {}: {}", id, e);
    })?;

    state
        .patients
        .add_entry(&id, new_entry)
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[axum::debug_handler]
async fn list_diagnoses(State(state): State<AppState>) -> Json<Vec<Diagnosis>> {
    Json(state.diagnoses.list_all().to_vec())
}
