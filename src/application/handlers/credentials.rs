use crate::application::dispatch::{ManagerTool, ToolFailure};
use crate::application::session::SessionManager;
use crate::application::validate::ValidatedArguments;
use crate::domain::types::SessionCredential;
use async_trait::async_trait;
use tracing::info;

/// Replaces the process-wide backend credential. This is the one tool that
/// works while disconnected; the replacement affects every connected client.
pub struct SetCredentials;

#[async_trait]
impl ManagerTool for SetCredentials {
    async fn run(
        &self,
        args: &ValidatedArguments,
        sessions: &SessionManager,
    ) -> Result<String, ToolFailure> {
        let credential = SessionCredential {
            endpoint_url: args.require_text("endpointUrl")?.to_string(),
            secret_token: args.require_text("secretToken")?.to_string(),
            default_scope: args.text("defaultScope")?.map(str::to_string),
        };
        let summary = credential.summary();

        sessions.ensure_connected(Some(credential)).await?;
        info!(endpoint = %summary.endpoint_url, "backend credentials replaced");
        Ok(format!("Connected to {}.", summary.endpoint_url))
    }
}
