use crate::domain::types::{CredentialSummary, ToolDescriptor};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<CredentialSummary>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub endpoint_url: String,
    pub secret_token: String,
    #[serde(default)]
    pub default_scope: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub connected: bool,
    pub endpoint: CredentialSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    pub tools: Vec<ToolDescriptor>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
