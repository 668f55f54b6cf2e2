use super::error::BackendError;
use super::{BackendCore, Collection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub id: u64,
    pub build_number: String,
    pub status: String,
    #[serde(default)]
    pub result: Option<String>,
    pub definition: BuildDefinitionRef,
    #[serde(default)]
    pub queue_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildDefinitionRef {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

pub struct BuildsClient {
    core: Arc<BackendCore>,
}

impl BuildsClient {
    pub(super) fn new(core: Arc<BackendCore>) -> Self {
        Self { core }
    }

    pub async fn list(&self, project: &str, top: Option<i64>) -> Result<Vec<Build>, BackendError> {
        let mut query = Vec::new();
        if let Some(top) = top {
            query.push(("top", top.to_string()));
        }
        let collection: Collection<Build> = self
            .core
            .get_json(&format!("/{project}/_apis/builds"), &query)
            .await?;
        Ok(collection.value)
    }

    pub async fn queue(&self, project: &str, definition: i64) -> Result<Build, BackendError> {
        self.core
            .post_json(
                &format!("/{project}/_apis/builds"),
                &json!({ "definition": { "id": definition } }),
            )
            .await
    }
}
