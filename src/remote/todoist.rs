use super::{Label, NewTask, Project, RemoteError, RemoteResult, TodoService};
use crate::domain::Task;
use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// REST endpoint of the hosted service
pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/rest/v2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bearer-authenticated client for the Todoist REST API
pub struct TodoistClient {
    http: Client,
    base_url: String,
    token: String,
}

impl TodoistClient {
    pub fn new(base_url: &str, token: &str) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed building HTTP client for the task service")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let response = request.bearer_auth(&self.token).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        warn!(status = status.as_u16(), body = %body, "task service rejected request");
        Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        })
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> RemoteResult<T> {
        debug!(path, "GET");
        Ok(self.send(self.http.get(self.url(path)))?.json()?)
    }

    fn post(&self, path: &str, body: Option<serde_json::Value>) -> RemoteResult<Response> {
        debug!(path, "POST");
        let request = self.http.post(self.url(path));
        let request = match body {
            Some(body) => request.json(&body),
            None => request,
        };
        self.send(request)
    }
}

impl TodoService for TodoistClient {
    fn list_projects(&self) -> RemoteResult<Vec<Project>> {
        self.get("projects")
    }

    fn list_labels(&self) -> RemoteResult<Vec<Label>> {
        self.get("labels")
    }

    fn create_label(&self, name: &str) -> RemoteResult<Label> {
        Ok(self.post("labels", Some(json!({ "name": name })))?.json()?)
    }

    fn list_tasks(&self, project_id: &str) -> RemoteResult<Vec<Task>> {
        self.get(&format!("tasks?project_id={}", project_id))
    }

    fn update_due(&self, task_id: &str, due: DateTime<Utc>) -> RemoteResult<()> {
        let due_datetime = due.to_rfc3339_opts(SecondsFormat::Secs, true);
        self.post(
            &format!("tasks/{}", task_id),
            Some(json!({ "due_datetime": due_datetime })),
        )?;
        Ok(())
    }

    fn close_task(&self, task_id: &str) -> RemoteResult<()> {
        self.post(&format!("tasks/{}/close", task_id), None)?;
        Ok(())
    }

    fn delete_task(&self, task_id: &str) -> RemoteResult<()> {
        debug!(task_id, "DELETE");
        self.send(self.http.delete(self.url(&format!("tasks/{}", task_id))))?;
        Ok(())
    }

    fn add_comment(&self, task_id: &str, content: &str) -> RemoteResult<()> {
        self.post(
            "comments",
            Some(json!({ "task_id": task_id, "content": content })),
        )?;
        Ok(())
    }

    fn create_task(&self, task: &NewTask) -> RemoteResult<Task> {
        debug!(content = %task.content, "POST tasks");
        // The request id lets the service drop a duplicate of a retried create
        let request = self
            .http
            .post(self.url("tasks"))
            .header("X-Request-Id", Uuid::new_v4().to_string())
            .json(task);
        Ok(self.send(request)?.json()?)
    }
}
