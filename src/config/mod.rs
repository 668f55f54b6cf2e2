use crate::domain::types::SessionCredential;
use std::env;
use tracing::warn;

pub const ENDPOINT_VAR: &str = "FORGEBRIDGE_URL";
pub const TOKEN_VAR: &str = "FORGEBRIDGE_TOKEN";
pub const DEFAULT_PROJECT_VAR: &str = "FORGEBRIDGE_DEFAULT_PROJECT";

/// Process-level configuration. Credentials sourced from the environment are
/// the lowest-precedence source; a credential supplied later through the
/// `set_credentials` tool or `POST /auth` replaces them for the whole process.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub credential: Option<SessionCredential>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let endpoint = non_empty(env::var(ENDPOINT_VAR).ok());
        let token = non_empty(env::var(TOKEN_VAR).ok());
        let default_scope = non_empty(env::var(DEFAULT_PROJECT_VAR).ok());

        let credential = match (endpoint, token) {
            (Some(endpoint_url), Some(secret_token)) => Some(SessionCredential {
                endpoint_url,
                secret_token,
                default_scope,
            }),
            (None, None) => None,
            _ => {
                warn!(
                    "ignoring partial backend credentials; both {ENDPOINT_VAR} and {TOKEN_VAR} must be set"
                );
                None
            }
        };

        Self { credential }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
