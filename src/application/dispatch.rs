use crate::application::registry::{Registry, ToolBinding};
use crate::application::session::{SessionError, SessionManager};
use crate::application::validate::{self, ArgumentError, ValidatedArguments};
use crate::domain::types::{Envelope, ErrorKind};
use crate::infrastructure::backend::{BackendError, SessionHandle};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Any way a handler can fail once dispatch has begun. The dispatcher maps
/// each variant to an envelope kind; nothing propagates past `invoke`.
#[derive(Debug, Error)]
pub enum ToolFailure {
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ToolFailure {
    pub fn kind(&self) -> ErrorKind {
        match self {
            // A present-but-misshapen argument surfaces the same way a
            // backend type complaint would.
            ToolFailure::Argument(_) | ToolFailure::Backend(_) => ErrorKind::BackendError,
            ToolFailure::Session(SessionError::NoCredentials) => ErrorKind::NotConnected,
            ToolFailure::Session(SessionError::AuthRejected(_)) => ErrorKind::AuthFailure,
            ToolFailure::Session(SessionError::Handshake(_)) => ErrorKind::BackendError,
        }
    }
}

/// A tool that operates on an established backend session. Handlers are pure
/// mappings from (arguments, session) to rendered text; they never touch
/// transport state, so the same set serves both adapters.
#[async_trait]
pub trait SessionTool: Send + Sync {
    async fn run(
        &self,
        args: &ValidatedArguments,
        session: &SessionHandle,
    ) -> Result<String, ToolFailure>;
}

/// A tool that operates on the session manager itself and therefore works
/// while disconnected. `set_credentials` is the only current implementor.
#[async_trait]
pub trait ManagerTool: Send + Sync {
    async fn run(
        &self,
        args: &ValidatedArguments,
        sessions: &SessionManager,
    ) -> Result<String, ToolFailure>;
}

/// Routes validated invocations to handlers and folds every outcome into the
/// uniform envelope. Shared by both transport adapters.
pub struct Dispatcher {
    registry: Registry,
    sessions: Arc<SessionManager>,
}

impl Dispatcher {
    pub fn new(registry: Registry, sessions: Arc<SessionManager>) -> Self {
        Self { registry, sessions }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub async fn invoke(&self, name: &str, raw_arguments: Option<Value>) -> Envelope {
        let Some(tool) = self.registry.lookup(name) else {
            return Envelope::failure(ErrorKind::UnknownTool, format!("unknown tool '{name}'"));
        };

        let args = match validate::validate(&tool.descriptor, raw_arguments.as_ref()) {
            Ok(args) => args,
            Err(error) => {
                debug!(tool = name, %error, "invocation rejected by validator");
                return Envelope::failure(ErrorKind::InvalidArguments, error.to_string());
            }
        };

        let outcome = match &tool.binding {
            ToolBinding::Manager(handler) => handler.run(&args, &self.sessions).await,
            ToolBinding::Session(handler) => match self.sessions.ensure_connected(None).await {
                Ok(session) => handler.run(&args, &session).await,
                Err(error) => Err(ToolFailure::Session(error)),
            },
        };

        match outcome {
            Ok(text) => Envelope::success(text),
            Err(failure) => {
                warn!(tool = name, %failure, "tool invocation failed");
                Envelope::failure(failure.kind(), failure.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::registry;
    use crate::application::session::BackendConnector;
    use crate::domain::types::SessionCredential;

    struct UnreachableConnector;

    #[async_trait]
    impl BackendConnector for UnreachableConnector {
        async fn connect(
            &self,
            _credential: &SessionCredential,
        ) -> Result<SessionHandle, SessionError> {
            Err(SessionError::Handshake("connection refused".to_string()))
        }
    }

    fn dispatcher() -> Dispatcher {
        let sessions = Arc::new(SessionManager::new(Arc::new(UnreachableConnector), None));
        Dispatcher::new(registry::catalog(), sessions)
    }

    #[tokio::test]
    async fn unknown_tool_yields_unknown_tool_envelope() {
        let envelope = dispatcher()
            .invoke("no_such_tool", Some(serde_json::json!({})))
            .await;
        assert!(!envelope.ok);
        assert_eq!(envelope.error_kind, Some(ErrorKind::UnknownTool));
        assert!(envelope.content.contains("no_such_tool"));
    }

    #[tokio::test]
    async fn missing_fields_yield_invalid_arguments_envelope() {
        let envelope = dispatcher()
            .invoke("create_work_item", Some(serde_json::json!({})))
            .await;
        assert!(!envelope.ok);
        assert_eq!(envelope.error_kind, Some(ErrorKind::InvalidArguments));
        assert!(envelope.content.contains("project"));
        assert!(envelope.content.contains("type"));
        assert!(envelope.content.contains("title"));
    }

    #[tokio::test]
    async fn session_tools_report_not_connected_before_any_credential() {
        let envelope = dispatcher()
            .invoke("list_projects", Some(serde_json::json!({})))
            .await;
        assert!(!envelope.ok);
        assert_eq!(envelope.error_kind, Some(ErrorKind::NotConnected));
    }

    #[tokio::test]
    async fn validation_runs_before_any_connection_attempt() {
        // A tool invocation with bad arguments must fail on the arguments,
        // not on the missing session.
        let envelope = dispatcher().invoke("get_work_item", None).await;
        assert_eq!(envelope.error_kind, Some(ErrorKind::InvalidArguments));
    }
}
