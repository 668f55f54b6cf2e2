use super::routes;
use crate::domain::types::{
    ContentChunk, CredentialSummary, ErrorKind, ParamKind, ParameterSpec, ToolDescriptor,
    ToolResponse,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health_handler,
        routes::auth::auth_handler,
        routes::tools::catalog_handler,
        routes::tools::invoke_handler,
    ),
    components(schemas(
        super::dto::HealthResponse,
        super::dto::AuthRequest,
        super::dto::AuthResponse,
        super::dto::CatalogResponse,
        super::dto::ErrorResponse,
        ToolResponse,
        ContentChunk,
        ToolDescriptor,
        ParameterSpec,
        ParamKind,
        ErrorKind,
        CredentialSummary,
    )),
    tags(
        (name = "service", description = "Health probe and session credentials"),
        (name = "tools", description = "Tool catalog and invocation")
    )
)]
pub struct ApiDoc;
