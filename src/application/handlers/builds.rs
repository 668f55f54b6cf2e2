use crate::application::dispatch::{SessionTool, ToolFailure};
use crate::application::validate::ValidatedArguments;
use crate::infrastructure::backend::SessionHandle;
use async_trait::async_trait;

pub struct ListBuilds;

#[async_trait]
impl SessionTool for ListBuilds {
    async fn run(
        &self,
        args: &ValidatedArguments,
        session: &SessionHandle,
    ) -> Result<String, ToolFailure> {
        let project = args.require_text("project")?;
        let top = args.integer("top")?;

        let builds = session.builds().list(project, top).await?;
        if builds.is_empty() {
            return Ok(format!("No builds found for '{project}'."));
        }

        let mut lines = vec![format!("{} build(s) in '{project}':", builds.len())];
        for build in &builds {
            let outcome = build.result.as_deref().unwrap_or(&build.status);
            let definition = build.definition.name.as_deref().unwrap_or("unnamed");
            let mut line = format!("  {} [{}] {}", build.build_number, outcome, definition);
            if let Some(queued) = build.queue_time {
                line.push_str(&format!(", queued {}", queued.format("%Y-%m-%d %H:%M UTC")));
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }
}

pub struct QueueBuild;

#[async_trait]
impl SessionTool for QueueBuild {
    async fn run(
        &self,
        args: &ValidatedArguments,
        session: &SessionHandle,
    ) -> Result<String, ToolFailure> {
        let project = args.require_text("project")?;
        let definition = args.require_integer("definition")?;

        let build = session.builds().queue(project, definition).await?;
        Ok(format!(
            "Queued build {} (id {}) for definition {} in '{project}'.",
            build.build_number, build.id, definition
        ))
    }
}
