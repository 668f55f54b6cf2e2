use crate::application::dispatch::{SessionTool, ToolFailure};
use crate::application::validate::ValidatedArguments;
use crate::infrastructure::backend::SessionHandle;
use async_trait::async_trait;

pub struct ListRepositories;

#[async_trait]
impl SessionTool for ListRepositories {
    async fn run(
        &self,
        args: &ValidatedArguments,
        session: &SessionHandle,
    ) -> Result<String, ToolFailure> {
        let project = args.require_text("project")?;

        let repositories = session.repos().list(project).await?;
        if repositories.is_empty() {
            return Ok(format!("No repositories found in '{project}'."));
        }

        let mut lines = vec![format!(
            "{} repositor{} in '{project}':",
            repositories.len(),
            if repositories.len() == 1 { "y" } else { "ies" }
        )];
        for repository in &repositories {
            let branch = repository.default_branch.as_deref().unwrap_or("(no default branch)");
            lines.push(format!("  {} {}", repository.name, branch));
        }
        Ok(lines.join("\n"))
    }
}

pub struct ListPullRequests;

#[async_trait]
impl SessionTool for ListPullRequests {
    async fn run(
        &self,
        args: &ValidatedArguments,
        session: &SessionHandle,
    ) -> Result<String, ToolFailure> {
        let project = args.require_text("project")?;
        let repository = args.require_text("repository")?;
        let status = args.text("status")?;

        let pull_requests = session
            .repos()
            .pull_requests(project, repository, status)
            .await?;
        if pull_requests.is_empty() {
            return Ok(format!("No pull requests matched in '{repository}'."));
        }

        let mut lines = vec![format!(
            "{} pull request(s) in '{repository}':",
            pull_requests.len()
        )];
        for pr in &pull_requests {
            lines.push(format!(
                "  !{} [{}] {} ({} into {}, by {})",
                pr.id,
                pr.status,
                pr.title,
                pr.source_branch,
                pr.target_branch,
                pr.created_by.as_deref().unwrap_or("unknown"),
            ));
        }
        Ok(lines.join("\n"))
    }
}
