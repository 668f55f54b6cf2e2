use super::super::dto::HealthResponse;
use super::super::state::ServerState;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses(
        (status = 200, description = "Service liveness and backend session state", body = HealthResponse)
    )
)]
pub async fn health_handler(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    let sessions = state.dispatcher().sessions();
    Json(HealthResponse {
        status: "ok".to_string(),
        connected: sessions.is_connected(),
        endpoint: sessions.credential_summary(),
    })
}
