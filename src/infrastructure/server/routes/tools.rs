use super::super::dto::CatalogResponse;
use super::super::state::ServerState;
use crate::domain::types::ToolResponse;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

#[utoipa::path(
    get,
    path = "/tools",
    tag = "tools",
    responses(
        (status = 200, description = "Tool catalog in stable order", body = CatalogResponse)
    )
)]
pub async fn catalog_handler(State(state): State<Arc<ServerState>>) -> Json<CatalogResponse> {
    let tools = state.dispatcher().registry().list();
    debug!(tool_count = tools.len(), "serving /tools request");
    Json(CatalogResponse { tools })
}

/// Direct invocation endpoint. The response is always an envelope with HTTP
/// 200; failures are reported in-band through the `isError` flag.
#[utoipa::path(
    post,
    path = "/tools/{name}",
    tag = "tools",
    params(
        ("name" = String, Path, description = "Registered tool name")
    ),
    responses(
        (status = 200, description = "Invocation envelope; isError marks failures", body = ToolResponse)
    )
)]
pub async fn invoke_handler(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Json<ToolResponse> {
    let arguments = match payload {
        Ok(Json(value)) => Some(value),
        Err(rejection) => {
            debug!(tool = %name, %rejection, "invocation body was not JSON");
            None
        }
    };
    let envelope = state.dispatcher().invoke(&name, arguments).await;
    Json(ToolResponse::from(envelope))
}
