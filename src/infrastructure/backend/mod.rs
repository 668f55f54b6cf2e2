mod builds;
mod error;
mod repos;
mod work_items;

pub use builds::{Build, BuildsClient};
pub use error::BackendError;
pub use repos::{PullRequest, ReposClient, Repository};
pub use work_items::{WorkItem, WorkItemDraft, WorkItemFilter, WorkItemPatch, WorkItemsClient};

use crate::application::session::{BackendConnector, SessionError};
use crate::domain::types::SessionCredential;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Shared plumbing for every sub-client: one HTTP client, the normalized
/// base URL, and the precomputed authorization header.
pub(crate) struct BackendCore {
    http: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl BackendCore {
    fn new(credential: &SessionCredential) -> Result<Self, SessionError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|error| SessionError::Handshake(error.to_string()))?;
        Ok(Self {
            http,
            base_url: credential.endpoint_url.trim_end_matches('/').to_string(),
            auth_header: format!(
                "Basic {}",
                STANDARD.encode(format!(":{}", credential.secret_token))
            ),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Lightweight authenticated request proving the credential works.
    async fn probe(&self) -> Result<(), SessionError> {
        let response = self
            .http
            .get(self.url("/_apis/session"))
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(|error| SessionError::Handshake(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(SessionError::AuthRejected(format!(
                "backend returned {status}"
            )))
        } else {
            Err(SessionError::Handshake(format!(
                "handshake returned {status}"
            )))
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, BackendError> {
        let mut request = self.http.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.send(request, path).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let request = self.http.post(self.url(path)).json(body);
        let response = self.send(request, path).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let request = self.http.patch(self.url(path)).json(body);
        let response = self.send(request, path).await?;
        Ok(response.json().await?)
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response, BackendError> {
        let response = request
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            debug!(path, status = status.as_u16(), "backend call completed");
            return Ok(response);
        }
        let message = summarize(response.text().await.unwrap_or_default());
        Err(BackendError::Status {
            status: status.as_u16(),
            path: path.to_string(),
            message,
        })
    }
}

/// Collection envelope the tracker API wraps every listing in.
#[derive(Debug, Deserialize)]
pub(crate) struct Collection<T> {
    pub value: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Live authenticated connection plus its derived sub-clients. Owned by the
/// session manager; handlers borrow it for one call and must not retain it,
/// since credential replacement swaps the whole handle.
pub struct SessionHandle {
    core: Arc<BackendCore>,
    work_items: WorkItemsClient,
    builds: BuildsClient,
    repos: ReposClient,
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle").finish_non_exhaustive()
    }
}

impl SessionHandle {
    /// Builds a handle for the credential without touching the network.
    /// The handshake itself lives in [`HttpConnector::connect`].
    pub fn for_credential(credential: &SessionCredential) -> Result<Self, SessionError> {
        let core = Arc::new(BackendCore::new(credential)?);
        Ok(Self {
            work_items: WorkItemsClient::new(core.clone()),
            builds: BuildsClient::new(core.clone()),
            repos: ReposClient::new(core.clone()),
            core,
        })
    }

    pub fn work_items(&self) -> &WorkItemsClient {
        &self.work_items
    }

    pub fn builds(&self) -> &BuildsClient {
        &self.builds
    }

    pub fn repos(&self) -> &ReposClient {
        &self.repos
    }

    pub async fn projects(&self) -> Result<Vec<Project>, BackendError> {
        let collection: Collection<Project> = self.core.get_json("/_apis/projects", &[]).await?;
        Ok(collection.value)
    }
}

/// Production connector: builds a handle and performs the authenticated
/// handshake against the tracker API.
pub struct HttpConnector;

#[async_trait]
impl BackendConnector for HttpConnector {
    async fn connect(
        &self,
        credential: &SessionCredential,
    ) -> Result<SessionHandle, SessionError> {
        let handle = SessionHandle::for_credential(credential)?;
        handle.core.probe().await?;
        Ok(handle)
    }
}

fn summarize(body: String) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.is_empty() {
        return "(empty response body)".to_string();
    }
    if flat.chars().count() > 200 {
        let clipped: String = flat.chars().take(200).collect();
        return format!("{clipped}...");
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slashes() {
        let credential = SessionCredential {
            endpoint_url: "https://tracker.example.com/org///".to_string(),
            secret_token: "pat".to_string(),
            default_scope: None,
        };
        let core = BackendCore::new(&credential).expect("core builds");
        assert_eq!(
            core.url("/_apis/projects"),
            "https://tracker.example.com/org/_apis/projects"
        );
    }

    #[test]
    fn summarize_collapses_and_clips_bodies() {
        assert_eq!(summarize(String::new()), "(empty response body)");
        assert_eq!(summarize("line one\n  line two".to_string()), "line one line two");
        let long = "x".repeat(400);
        let clipped = summarize(long);
        assert_eq!(clipped.chars().count(), 203);
        assert!(clipped.ends_with("..."));
    }
}
