use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use floe::{LockSnowflakeGenerator, WallClock};
use serde::Serialize;

/// Shared state: one lock-based generator per service instance.
///
/// The generator supplies its own mutual exclusion, so handlers running on
/// any number of Tokio workers can call into it directly.
#[derive(Clone)]
pub struct AppState {
    generator: Arc<LockSnowflakeGenerator<WallClock>>,
}

impl AppState {
    pub fn new(generator: LockSnowflakeGenerator<WallClock>) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}

// IDs and coordinates are serialized as decimal strings, never as JSON
// numbers: the packed value exceeds safe-integer precision in common
// decoders.
#[derive(Serialize)]
struct IdResponse {
    id: Option<String>,
}

#[derive(Serialize)]
struct WorkerResponse {
    worker: String,
}

#[derive(Serialize)]
struct DatacenterResponse {
    datacenter: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/id", get(next_id))
        .route("/worker", get(worker))
        .route("/datacenter", get(datacenter))
        .fallback(not_found)
        .with_state(state)
}

/// `GET /id` — mint the next ID.
///
/// An internal generator failure is not propagated as an HTTP error; the
/// response carries a null id and the failure is logged.
async fn next_id(State(state): State<AppState>) -> Json<IdResponse> {
    let id = match state.generator.try_next_id() {
        Ok(id) => Some(id.to_string()),
        Err(e) => {
            tracing::error!(error = %e, "failed to mint id");
            None
        }
    };
    Json(IdResponse { id })
}

/// `GET /worker` — the configured worker coordinate.
async fn worker(State(state): State<AppState>) -> Json<WorkerResponse> {
    Json(WorkerResponse {
        worker: state.generator.worker_id().to_string(),
    })
}

/// `GET /datacenter` — the configured datacenter coordinate.
async fn datacenter(State(state): State<AppState>) -> Json<DatacenterResponse> {
    Json(DatacenterResponse {
        datacenter: state.generator.datacenter_id().to_string(),
    })
}

async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not Found".to_string(),
        }),
    )
}
