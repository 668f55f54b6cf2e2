use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;

/// Declared value shape for a single tool parameter. The validator checks
/// presence only; the kind is advisory metadata surfaced in the catalog and
/// enforced lazily when a handler reads the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Boolean,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    pub key: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

impl ParameterSpec {
    pub const fn required(key: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            key,
            kind,
            required: true,
            description,
        }
    }

    pub const fn optional(key: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            key,
            kind,
            required: false,
            description,
        }
    }
}

/// Immutable description of one callable tool. Built once at startup and
/// served verbatim by both transports; catalog order is part of the contract.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub summary: &'static str,
    pub input_contract: Vec<ParameterSpec>,
}

/// One invocation as received from either transport: a tool name plus the
/// raw, not-yet-validated argument object.
#[derive(Debug, Deserialize)]
pub struct InvocationRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ErrorKind {
    UnknownTool,
    InvalidArguments,
    NotConnected,
    AuthFailure,
    BackendError,
}

/// The uniform outcome of every invocation. Success or failure, this is the
/// only shape a transport adapter ever receives from the dispatcher.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub ok: bool,
    pub content: String,
    pub error_kind: Option<ErrorKind>,
}

impl Envelope {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            ok: true,
            content: content.into(),
            error_kind: None,
        }
    }

    pub fn failure(kind: ErrorKind, content: impl Into<String>) -> Self {
        Self {
            ok: false,
            content: content.into(),
            error_kind: Some(kind),
        }
    }
}

/// Wire form of [`Envelope`], shared by the stdio and REST adapters.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ToolResponse {
    pub content: Vec<ContentChunk>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContentChunk {
    #[serde(rename = "type")]
    pub chunk_type: String,
    pub text: String,
}

impl From<Envelope> for ToolResponse {
    fn from(envelope: Envelope) -> Self {
        Self {
            content: vec![ContentChunk {
                chunk_type: "text".to_string(),
                text: envelope.content,
            }],
            is_error: (!envelope.ok).then_some(true),
        }
    }
}

/// Credential for the backend session. The secret token never appears in
/// `Debug` output or anywhere downstream of [`SessionCredential::summary`].
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential {
    pub endpoint_url: String,
    pub secret_token: String,
    pub default_scope: Option<String>,
}

impl SessionCredential {
    pub fn summary(&self) -> CredentialSummary {
        CredentialSummary {
            endpoint_url: self.endpoint_url.clone(),
            default_scope: self.default_scope.clone(),
        }
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredential")
            .field("endpoint_url", &self.endpoint_url)
            .field("secret_token", &"<redacted>")
            .field("default_scope", &self.default_scope)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialSummary {
    pub endpoint_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_scope: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_serializes_without_error_flag() {
        let wire = ToolResponse::from(Envelope::success("2 project(s)"));
        let value = serde_json::to_value(&wire).expect("serialize");
        assert_eq!(
            value,
            json!({ "content": [{ "type": "text", "text": "2 project(s)" }] })
        );
    }

    #[test]
    fn failure_envelope_sets_error_flag() {
        let wire = ToolResponse::from(Envelope::failure(ErrorKind::UnknownTool, "unknown tool"));
        let value = serde_json::to_value(&wire).expect("serialize");
        assert_eq!(value["isError"], json!(true));
        assert_eq!(value["content"][0]["text"], json!("unknown tool"));
    }

    #[test]
    fn invocation_request_allows_absent_arguments() {
        let request: InvocationRequest =
            serde_json::from_str(r#"{"name":"list_projects"}"#).expect("parse");
        assert_eq!(request.name, "list_projects");
        assert!(request.arguments.is_none());
    }

    #[test]
    fn credential_debug_redacts_the_token() {
        let credential = SessionCredential {
            endpoint_url: "https://tracker.example.com/org".to_string(),
            secret_token: "hunter2".to_string(),
            default_scope: Some("Fabrikam".to_string()),
        };
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("tracker.example.com"));
    }
}
