use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use patientor_core::constants::{REST_ADDR_ENV_VAR, SEED_ENV_VAR};
use patientor_core::{
    CoreConfig, DEFAULT_REST_ADDR, DiagnosisCatalogue, PatientRepository, UuidGenerator,
    seed_source_from_env_value,
};

/// Main entry point for the patientor service
///
/// Resolves configuration once, seeds the in-memory repository and serves the REST API.
///
/// # Environment Variables
/// - `PATIENTOR_REST_ADDR`: REST server address (default: "0.0.0.0:3001")
/// - `PATIENTOR_SEED`: `bundled` (default), `none`, or a path to a JSON seed file
/// - `RUST_LOG`: tracing filter, on top of the `info` defaults below
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the seed data or diagnosis catalogue cannot be loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patientor_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("patientor_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let seed_source = seed_source_from_env_value(std::env::var(SEED_ENV_VAR).ok())?;
    let cfg = CoreConfig::new(seed_source)?;

    let patients = PatientRepository::from_config(&cfg, Arc::new(UuidGenerator::new()))?;
    let diagnoses = DiagnosisCatalogue::bundled()?;
    let state = AppState::new(patients, diagnoses);

    let addr = std::env::var(REST_ADDR_ENV_VAR).unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
    tracing::info!("++ Starting patientor REST on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    api_rest::serve(listener, state).await?;

    Ok(())
}
