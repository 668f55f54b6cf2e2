use super::error::BackendError;
use super::{BackendCore, Collection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub state: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub changed_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemDraft {
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update; only the populated fields are sent.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl WorkItemPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.state.is_none()
    }
}

#[derive(Debug, Default)]
pub struct WorkItemFilter {
    pub item_type: Option<String>,
    pub query: Option<String>,
    pub assigned_to: Option<String>,
    pub include_closed: bool,
}

pub struct WorkItemsClient {
    core: Arc<BackendCore>,
}

impl WorkItemsClient {
    pub(super) fn new(core: Arc<BackendCore>) -> Self {
        Self { core }
    }

    pub async fn list(
        &self,
        project: &str,
        filter: &WorkItemFilter,
    ) -> Result<Vec<WorkItem>, BackendError> {
        let mut query = Vec::new();
        if let Some(item_type) = &filter.item_type {
            query.push(("type", item_type.clone()));
        }
        if let Some(text) = &filter.query {
            query.push(("query", text.clone()));
        }
        if let Some(assignee) = &filter.assigned_to {
            query.push(("assignedTo", assignee.clone()));
        }
        if filter.include_closed {
            query.push(("includeClosed", "true".to_string()));
        }
        let collection: Collection<WorkItem> = self
            .core
            .get_json(&format!("/{project}/_apis/work-items"), &query)
            .await?;
        Ok(collection.value)
    }

    pub async fn get(&self, id: i64) -> Result<WorkItem, BackendError> {
        self.core
            .get_json(&format!("/_apis/work-items/{id}"), &[])
            .await
    }

    pub async fn create(
        &self,
        project: &str,
        draft: &WorkItemDraft,
    ) -> Result<WorkItem, BackendError> {
        self.core
            .post_json(&format!("/{project}/_apis/work-items"), draft)
            .await
    }

    pub async fn update(&self, id: i64, patch: &WorkItemPatch) -> Result<WorkItem, BackendError> {
        self.core
            .patch_json(&format!("/_apis/work-items/{id}"), patch)
            .await
    }
}
