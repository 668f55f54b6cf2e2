use super::docs::ApiDoc;
use super::error::ServerError;
use super::routes;
use super::state::ServerState;
use crate::application::dispatch::Dispatcher;
use crate::application::session::SessionError;
use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the full application router. Exposed so tests can mount it on an
/// ephemeral listener.
pub fn app(dispatcher: Arc<Dispatcher>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let state = Arc::new(ServerState::new(dispatcher));
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health::health_handler))
        .route("/auth", post(routes::auth::auth_handler))
        .route("/tools", get(routes::tools::catalog_handler))
        .route("/tools/{name}", post(routes::tools::invoke_handler))
        .layer(cors)
        .with_state(state)
}

pub(super) async fn serve(dispatcher: Arc<Dispatcher>, addr: SocketAddr) -> Result<(), ServerError> {
    // Connecting at startup is best effort; the catalog and health probe are
    // served even while disconnected.
    match dispatcher.sessions().ensure_connected(None).await {
        Ok(_) => info!("backend session established at startup"),
        Err(SessionError::NoCredentials) => {
            info!("no startup credentials; serving catalog until POST /auth supplies them");
        }
        Err(error) => warn!(%error, "startup connection attempt failed; continuing disconnected"),
    }

    info!(%addr, "binding REST listener");
    let app = app(dispatcher);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, "REST server ready to accept connections");

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(ServerError::Serve)
}
