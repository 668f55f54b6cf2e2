use super::super::dto::{AuthRequest, AuthResponse, ErrorResponse};
use super::super::state::ServerState;
use crate::application::session::SessionError;
use crate::domain::types::SessionCredential;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::info;

/// Replaces the backend credential for the whole process. Every connected
/// client shares the resulting session; there is no per-client isolation.
#[utoipa::path(
    post,
    path = "/auth",
    tag = "service",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Session established with the new credential", body = AuthResponse),
        (status = 401, description = "Backend rejected the credential", body = ErrorResponse),
        (status = 502, description = "Backend handshake failed", body = ErrorResponse)
    )
)]
pub async fn auth_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<ErrorResponse>)> {
    let credential = SessionCredential {
        endpoint_url: payload.endpoint_url,
        secret_token: payload.secret_token,
        default_scope: payload.default_scope,
    };
    let summary = credential.summary();

    match state
        .dispatcher()
        .sessions()
        .ensure_connected(Some(credential))
        .await
    {
        Ok(_) => {
            info!(endpoint = %summary.endpoint_url, "backend credentials replaced via REST");
            Ok(Json(AuthResponse {
                connected: true,
                endpoint: summary,
            }))
        }
        Err(error @ SessionError::AuthRejected(_)) => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: error.to_string(),
            }),
        )),
        Err(error) => Err((
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: error.to_string(),
            }),
        )),
    }
}
