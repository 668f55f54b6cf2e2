use super::error::BackendError;
use super::{BackendCore, Collection};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub id: u64,
    pub title: String,
    pub status: String,
    pub source_branch: String,
    pub target_branch: String,
    #[serde(default)]
    pub created_by: Option<String>,
}

pub struct ReposClient {
    core: Arc<BackendCore>,
}

impl ReposClient {
    pub(super) fn new(core: Arc<BackendCore>) -> Self {
        Self { core }
    }

    pub async fn list(&self, project: &str) -> Result<Vec<Repository>, BackendError> {
        let collection: Collection<Repository> = self
            .core
            .get_json(&format!("/{project}/_apis/repositories"), &[])
            .await?;
        Ok(collection.value)
    }

    pub async fn pull_requests(
        &self,
        project: &str,
        repository: &str,
        status: Option<&str>,
    ) -> Result<Vec<PullRequest>, BackendError> {
        let mut query = Vec::new();
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        let collection: Collection<PullRequest> = self
            .core
            .get_json(
                &format!("/{project}/_apis/repositories/{repository}/pull-requests"),
                &query,
            )
            .await?;
        Ok(collection.value)
    }
}
