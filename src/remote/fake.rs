//! In-memory task service that records every call

use super::{Label, NewTask, Project, RemoteError, RemoteResult, TodoService};
use crate::domain::{Due, Task};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListProjects,
    ListLabels,
    CreateLabel(String),
    ListTasks(String),
    UpdateDue(String, DateTime<Utc>),
    Close(String),
    Delete(String),
    Comment(String, String),
    Create(NewTask),
}

#[derive(Default)]
struct State {
    projects: Vec<Project>,
    labels: Vec<Label>,
    tasks: Vec<Task>,
    calls: Vec<Call>,
    failing: HashSet<&'static str>,
    next_id: u32,
}

#[derive(Clone, Default)]
pub struct FakeService {
    state: Arc<Mutex<State>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_project(&self, id: &str, name: &str) {
        self.lock().projects.push(Project {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    pub fn add_label(&self, id: &str, name: &str) {
        self.lock().labels.push(Label {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    pub fn add_task(&self, task: Task) {
        self.lock().tasks.push(task);
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Make every call to `operation` fail with HTTP 500
    pub fn fail(&self, operation: &'static str) {
        self.lock().failing.insert(operation);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn record(&self, operation: &'static str, call: Call) -> RemoteResult<std::sync::MutexGuard<'_, State>> {
        let mut state = self.lock();
        state.calls.push(call);
        if state.failing.contains(operation) {
            return Err(RemoteError::Status {
                status: 500,
                body: format!("{} failed", operation),
            });
        }
        Ok(state)
    }
}

fn not_found(task_id: &str) -> RemoteError {
    RemoteError::Status {
        status: 404,
        body: format!("task {} not found", task_id),
    }
}

impl TodoService for FakeService {
    fn list_projects(&self) -> RemoteResult<Vec<Project>> {
        Ok(self.record("list_projects", Call::ListProjects)?.projects.clone())
    }

    fn list_labels(&self) -> RemoteResult<Vec<Label>> {
        Ok(self.record("list_labels", Call::ListLabels)?.labels.clone())
    }

    fn create_label(&self, name: &str) -> RemoteResult<Label> {
        let mut state = self.record("create_label", Call::CreateLabel(name.to_string()))?;
        state.next_id += 1;
        let label = Label {
            id: format!("label-{}", state.next_id),
            name: name.to_string(),
        };
        state.labels.push(label.clone());
        Ok(label)
    }

    fn list_tasks(&self, project_id: &str) -> RemoteResult<Vec<Task>> {
        let state = self.record("list_tasks", Call::ListTasks(project_id.to_string()))?;
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.project_id.as_deref() == Some(project_id))
            .cloned()
            .collect())
    }

    fn update_due(&self, task_id: &str, due: DateTime<Utc>) -> RemoteResult<()> {
        let mut state = self.record("update_due", Call::UpdateDue(task_id.to_string(), due))?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| not_found(task_id))?;
        task.due = Some(Due::at(due, &chrono_tz::UTC));
        Ok(())
    }

    fn close_task(&self, task_id: &str) -> RemoteResult<()> {
        let mut state = self.record("close_task", Call::Close(task_id.to_string()))?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id != task_id);
        if state.tasks.len() == before {
            return Err(not_found(task_id));
        }
        Ok(())
    }

    fn delete_task(&self, task_id: &str) -> RemoteResult<()> {
        let mut state = self.record("delete_task", Call::Delete(task_id.to_string()))?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id != task_id);
        if state.tasks.len() == before {
            return Err(not_found(task_id));
        }
        Ok(())
    }

    fn add_comment(&self, task_id: &str, content: &str) -> RemoteResult<()> {
        let state = self.record(
            "add_comment",
            Call::Comment(task_id.to_string(), content.to_string()),
        )?;
        // Comments attach to closed tasks too, but not to deleted ones
        if state.tasks.iter().all(|task| task.id != task_id) && !state.calls.contains(&Call::Close(task_id.to_string())) {
            return Err(not_found(task_id));
        }
        Ok(())
    }

    fn create_task(&self, task: &NewTask) -> RemoteResult<Task> {
        let mut state = self.record("create_task", Call::Create(task.clone()))?;
        state.next_id += 1;
        let created = Task {
            id: format!("task-{}", state.next_id),
            content: task.content.clone(),
            labels: task.labels.clone(),
            due: None,
            project_id: Some(task.project_id.clone()),
        };
        state.tasks.push(created.clone());
        Ok(created)
    }
}
