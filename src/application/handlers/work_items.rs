use crate::application::dispatch::{SessionTool, ToolFailure};
use crate::application::validate::ValidatedArguments;
use crate::infrastructure::backend::{
    SessionHandle, WorkItem, WorkItemDraft, WorkItemFilter, WorkItemPatch,
};
use async_trait::async_trait;

pub struct ListWorkItems;

#[async_trait]
impl SessionTool for ListWorkItems {
    async fn run(
        &self,
        args: &ValidatedArguments,
        session: &SessionHandle,
    ) -> Result<String, ToolFailure> {
        let project = args.require_text("project")?;
        let filter = WorkItemFilter {
            item_type: args.text("type")?.map(str::to_string),
            query: args.text("query")?.map(str::to_string),
            assigned_to: args.text("assignedTo")?.map(str::to_string),
            include_closed: args.flag("includeClosed")?.unwrap_or(false),
        };

        let items = session.work_items().list(project, &filter).await?;
        if items.is_empty() {
            return Ok(format!("No work items in '{project}' matched the query."));
        }

        let mut lines = vec![format!("{} work item(s) in '{project}':", items.len())];
        for item in &items {
            lines.push(format!(
                "  #{} [{}] {} ({}, {})",
                item.id,
                item.state,
                item.title,
                item.item_type,
                item.assigned_to.as_deref().unwrap_or("unassigned"),
            ));
        }
        Ok(lines.join("\n"))
    }
}

pub struct GetWorkItem;

#[async_trait]
impl SessionTool for GetWorkItem {
    async fn run(
        &self,
        args: &ValidatedArguments,
        session: &SessionHandle,
    ) -> Result<String, ToolFailure> {
        let id = args.require_integer("id")?;
        let item = session.work_items().get(id).await?;
        Ok(render_work_item(&item))
    }
}

pub struct CreateWorkItem;

#[async_trait]
impl SessionTool for CreateWorkItem {
    async fn run(
        &self,
        args: &ValidatedArguments,
        session: &SessionHandle,
    ) -> Result<String, ToolFailure> {
        let project = args.require_text("project")?;
        let draft = WorkItemDraft {
            item_type: args.require_text("type")?.to_string(),
            title: args.require_text("title")?.to_string(),
            description: args.text("description")?.map(str::to_string),
        };

        let item = session.work_items().create(project, &draft).await?;
        Ok(format!(
            "Created work item #{} in '{project}': {}",
            item.id, item.title
        ))
    }
}

pub struct UpdateWorkItem;

#[async_trait]
impl SessionTool for UpdateWorkItem {
    async fn run(
        &self,
        args: &ValidatedArguments,
        session: &SessionHandle,
    ) -> Result<String, ToolFailure> {
        let id = args.require_integer("id")?;
        let patch = WorkItemPatch {
            title: args.text("title")?.map(str::to_string),
            description: args.text("description")?.map(str::to_string),
            state: args.text("state")?.map(str::to_string),
        };
        if patch.is_empty() {
            return Ok(format!(
                "Nothing to update on work item #{id}; supply title, description, or state."
            ));
        }

        let item = session.work_items().update(id, &patch).await?;
        Ok(format!(
            "Updated work item #{}: '{}' is now {}",
            item.id, item.title, item.state
        ))
    }
}

fn render_work_item(item: &WorkItem) -> String {
    let mut lines = vec![
        format!("Work item #{}: {}", item.id, item.title),
        format!("  Type: {}", item.item_type),
        format!("  State: {}", item.state),
        format!(
            "  Assigned to: {}",
            item.assigned_to.as_deref().unwrap_or("unassigned")
        ),
    ];
    if let Some(changed) = item.changed_date {
        lines.push(format!(
            "  Last changed: {}",
            changed.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    if let Some(description) = &item.description {
        lines.push(format!("  Description: {description}"));
    }
    lines.join("\n")
}
