use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// `local` or `s3`.
    pub storage: &'static str,
}

/// GET /health: service, database and object store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = places_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        storage: state.object_store.provider(),
    })
}

/// `/health`, always answered with 200.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
