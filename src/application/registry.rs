use crate::application::dispatch::{ManagerTool, SessionTool};
use crate::application::handlers::{builds, credentials, projects, repos, work_items};
use crate::domain::types::{ParamKind, ParameterSpec, ToolDescriptor};
use std::sync::Arc;

/// How a tool's handler is wired: most need the live session, the credential
/// tool needs the manager itself.
pub enum ToolBinding {
    Session(Arc<dyn SessionTool>),
    Manager(Arc<dyn ManagerTool>),
}

pub struct RegisteredTool {
    pub descriptor: ToolDescriptor,
    pub binding: ToolBinding,
}

/// Fixed catalog of callable tools. Built once at startup; list order is
/// declaration order and is part of the external contract.
pub struct Registry {
    tools: Vec<RegisteredTool>,
}

impl Registry {
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|tool| tool.descriptor.clone()).collect()
    }

    pub fn lookup(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|tool| tool.descriptor.name == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn session_tool(
    name: &'static str,
    summary: &'static str,
    input_contract: Vec<ParameterSpec>,
    handler: impl SessionTool + 'static,
) -> RegisteredTool {
    RegisteredTool {
        descriptor: ToolDescriptor {
            name,
            summary,
            input_contract,
        },
        binding: ToolBinding::Session(Arc::new(handler)),
    }
}

fn manager_tool(
    name: &'static str,
    summary: &'static str,
    input_contract: Vec<ParameterSpec>,
    handler: impl ManagerTool + 'static,
) -> RegisteredTool {
    RegisteredTool {
        descriptor: ToolDescriptor {
            name,
            summary,
            input_contract,
        },
        binding: ToolBinding::Manager(Arc::new(handler)),
    }
}

/// The full tool catalog. Adding a tool means adding one entry here plus its
/// handler; the dispatcher never grows tool-specific control flow.
pub fn catalog() -> Registry {
    Registry {
        tools: vec![
            manager_tool(
                "set_credentials",
                "Connect to a backend, replacing any existing session for every client",
                vec![
                    ParameterSpec::required(
                        "endpointUrl",
                        ParamKind::String,
                        "Base URL of the backend organization",
                    ),
                    ParameterSpec::required(
                        "secretToken",
                        ParamKind::String,
                        "Personal access token used to authenticate",
                    ),
                    ParameterSpec::optional(
                        "defaultScope",
                        ParamKind::String,
                        "Project used when none is given explicitly",
                    ),
                ],
                credentials::SetCredentials,
            ),
            session_tool(
                "list_projects",
                "List the projects visible to the current session",
                vec![],
                projects::ListProjects,
            ),
            session_tool(
                "list_work_items",
                "List work items in a project, optionally filtered",
                vec![
                    ParameterSpec::required(
                        "project",
                        ParamKind::String,
                        "Project name or identifier",
                    ),
                    ParameterSpec::optional(
                        "type",
                        ParamKind::String,
                        "Restrict to one work item type, e.g. Task or Bug",
                    ),
                    ParameterSpec::optional(
                        "query",
                        ParamKind::String,
                        "Free-text filter applied by the backend",
                    ),
                    ParameterSpec::optional(
                        "assignedTo",
                        ParamKind::String,
                        "Restrict to items assigned to this user",
                    ),
                    ParameterSpec::optional(
                        "includeClosed",
                        ParamKind::Boolean,
                        "Include items in closed states",
                    ),
                ],
                work_items::ListWorkItems,
            ),
            session_tool(
                "get_work_item",
                "Show one work item in full",
                vec![ParameterSpec::required(
                    "id",
                    ParamKind::Number,
                    "Work item identifier",
                )],
                work_items::GetWorkItem,
            ),
            session_tool(
                "create_work_item",
                "Create a work item in a project",
                vec![
                    ParameterSpec::required(
                        "project",
                        ParamKind::String,
                        "Project name or identifier",
                    ),
                    ParameterSpec::required(
                        "type",
                        ParamKind::String,
                        "Work item type, e.g. Task or Bug",
                    ),
                    ParameterSpec::required("title", ParamKind::String, "Title of the new item"),
                    ParameterSpec::optional(
                        "description",
                        ParamKind::String,
                        "Longer description body",
                    ),
                ],
                work_items::CreateWorkItem,
            ),
            session_tool(
                "update_work_item",
                "Update the title, description, or state of a work item",
                vec![
                    ParameterSpec::required("id", ParamKind::Number, "Work item identifier"),
                    ParameterSpec::optional("title", ParamKind::String, "New title"),
                    ParameterSpec::optional(
                        "description",
                        ParamKind::String,
                        "New description body",
                    ),
                    ParameterSpec::optional("state", ParamKind::String, "New workflow state"),
                ],
                work_items::UpdateWorkItem,
            ),
            session_tool(
                "list_builds",
                "List recent builds for a project",
                vec![
                    ParameterSpec::required(
                        "project",
                        ParamKind::String,
                        "Project name or identifier",
                    ),
                    ParameterSpec::optional(
                        "top",
                        ParamKind::Number,
                        "Maximum number of builds to return",
                    ),
                ],
                builds::ListBuilds,
            ),
            session_tool(
                "queue_build",
                "Queue a new build for a pipeline definition",
                vec![
                    ParameterSpec::required(
                        "project",
                        ParamKind::String,
                        "Project name or identifier",
                    ),
                    ParameterSpec::required(
                        "definition",
                        ParamKind::Number,
                        "Identifier of the pipeline definition",
                    ),
                ],
                builds::QueueBuild,
            ),
            session_tool(
                "list_repositories",
                "List the repositories in a project",
                vec![ParameterSpec::required(
                    "project",
                    ParamKind::String,
                    "Project name or identifier",
                )],
                repos::ListRepositories,
            ),
            session_tool(
                "list_pull_requests",
                "List pull requests in a repository",
                vec![
                    ParameterSpec::required(
                        "project",
                        ParamKind::String,
                        "Project name or identifier",
                    ),
                    ParameterSpec::required(
                        "repository",
                        ParamKind::String,
                        "Repository name or identifier",
                    ),
                    ParameterSpec::optional(
                        "status",
                        ParamKind::String,
                        "Filter by status, e.g. active or completed",
                    ),
                ],
                repos::ListPullRequests,
            ),
        ],
    }
}
