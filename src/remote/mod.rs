pub mod todoist;
pub mod worker;

#[cfg(test)]
pub mod fake;

use crate::domain::task::deserialize_id;
use crate::domain::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use todoist::TodoistClient;
pub use worker::{Command, Outcome, Worker, WorkerHandle};

/// Failure talking to the task service
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The board project hasn't been found, so there is nowhere to create into
    #[error("no board project found")]
    NoProject,
}

pub type RemoteResult<T> = Result<T, RemoteError>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
}

/// Body of a task-creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub content: String,
    pub project_id: String,
    pub labels: Vec<String>,
    /// Natural-language schedule, interpreted by the service ("every sat 9am")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
}

/// The remote to-do service the board is a view over
pub trait TodoService {
    fn list_projects(&self) -> RemoteResult<Vec<Project>>;
    fn list_labels(&self) -> RemoteResult<Vec<Label>>;
    fn create_label(&self, name: &str) -> RemoteResult<Label>;
    fn list_tasks(&self, project_id: &str) -> RemoteResult<Vec<Task>>;
    fn update_due(&self, task_id: &str, due: DateTime<Utc>) -> RemoteResult<()>;
    fn close_task(&self, task_id: &str) -> RemoteResult<()>;
    fn delete_task(&self, task_id: &str) -> RemoteResult<()>;
    fn add_comment(&self, task_id: &str, content: &str) -> RemoteResult<()>;
    fn create_task(&self, task: &NewTask) -> RemoteResult<Task>;
}

/// Find the id of the project named `name` (case-insensitive)
pub fn resolve_project(service: &dyn TodoService, name: &str) -> RemoteResult<Option<String>> {
    let projects = service.list_projects()?;
    let found = projects
        .into_iter()
        .find(|project| project.name.eq_ignore_ascii_case(name))
        .map(|project| project.id);

    match &found {
        Some(id) => info!(project = name, id = %id, "resolved board project"),
        None => info!(project = name, "board project not found, nothing will be fetched"),
    }
    Ok(found)
}

/// Return the name of the label matching `name` case-insensitively,
/// creating the label when none exists
pub fn ensure_label(service: &dyn TodoService, name: &str) -> RemoteResult<String> {
    let labels = service.list_labels()?;
    if let Some(existing) = labels
        .into_iter()
        .find(|label| label.name.eq_ignore_ascii_case(name))
    {
        debug!(label = %existing.name, "reusing existing label");
        return Ok(existing.name);
    }

    let created = service.create_label(name)?;
    info!(label = %created.name, "created assignee label");
    Ok(created.name)
}

#[cfg(test)]
mod tests {
    use super::fake::{Call, FakeService};
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_project_case_insensitive() {
        let service = FakeService::new();
        service.add_project("p1", "Groceries");
        service.add_project("p2", "chores");

        assert_eq!(resolve_project(&service, "Chores").unwrap(), Some("p2".to_string()));
        assert_eq!(resolve_project(&service, "Garden").unwrap(), None);
    }

    #[test]
    fn test_ensure_label_reuses_existing() {
        let service = FakeService::new();
        service.add_label("l1", "joy");

        assert_eq!(ensure_label(&service, "Joy").unwrap(), "joy");
        assert_eq!(service.calls(), vec![Call::ListLabels]);
    }

    #[test]
    fn test_ensure_label_creates_missing() {
        let service = FakeService::new();

        assert_eq!(ensure_label(&service, "Rhea").unwrap(), "Rhea");
        assert_eq!(
            service.calls(),
            vec![Call::ListLabels, Call::CreateLabel("Rhea".to_string())]
        );

        // Second call finds the label created by the first
        ensure_label(&service, "rhea").unwrap();
        assert_eq!(service.calls().len(), 3);
    }

    #[test]
    fn test_new_task_body_omits_missing_schedule() {
        let task = NewTask {
            content: "Dishes".to_string(),
            project_id: "p1".to_string(),
            labels: vec!["Joy".to_string()],
            due_string: None,
        };
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"content": "Dishes", "project_id": "p1", "labels": ["Joy"]})
        );
    }
}
