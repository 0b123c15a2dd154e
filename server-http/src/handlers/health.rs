use crate::api::HealthResponse;
use crate::state::AppState;
use axum::{extract::State, Json};

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "OK".into(),
        objects: state.store.len().await,
    })
}
