use crate::application::dispatch::{SessionTool, ToolFailure};
use crate::application::validate::ValidatedArguments;
use crate::infrastructure::backend::SessionHandle;
use async_trait::async_trait;

pub struct ListProjects;

#[async_trait]
impl SessionTool for ListProjects {
    async fn run(
        &self,
        _args: &ValidatedArguments,
        session: &SessionHandle,
    ) -> Result<String, ToolFailure> {
        let projects = session.projects().await?;
        if projects.is_empty() {
            return Ok("No projects are visible to this session.".to_string());
        }

        let mut lines = vec![format!("{} project(s):", projects.len())];
        for project in &projects {
            match &project.description {
                Some(text) => lines.push(format!("  {}: {}", project.name, text)),
                None => lines.push(format!("  {}", project.name)),
            }
        }
        Ok(lines.join("\n"))
    }
}
