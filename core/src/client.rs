//! Stateless HTTP request builder and response parser for the task API.
//!
//! # Design
//! `TaskClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`. The
//! mapper runs on both sides: drafts are converted before serialization and
//! backend tasks are converted right after deserialization. Delete is the
//! exception on the way back: its payload is returned raw.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::mapper::{to_backend_shape, to_ui_shape};
use crate::outcome::{DeletedTask, TaskList, TaskPayload};
use crate::types::{BackendTask, TaskDraft};

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Environment variable overriding `DEFAULT_BASE_URL`.
pub const BASE_URL_ENV: &str = "TASK_API_URL";

pub const LIST_FAILED: &str = "Failed to fetch tasks";
pub const CREATE_FAILED: &str = "Failed to create task";
pub const UPDATE_FAILED: &str = "Failed to update task";
pub const DELETE_FAILED: &str = "Failed to delete task";

#[derive(Deserialize)]
struct ListEnvelope {
    data: Vec<BackendTask>,
    #[serde(default)]
    count: Option<usize>,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct DeleteEnvelope {
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Synchronous, stateless client for the task API.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: String,
}

impl Default for TaskClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Use `TASK_API_URL` when set and non-empty, else `DEFAULT_BASE_URL`.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/tasks", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_task(&self, draft: &TaskDraft) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/task", self.base_url),
            headers: json_headers(),
            body: Some(encode(draft)?),
        })
    }

    pub fn build_update_task(&self, id: &str, draft: &TaskDraft) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/task/{id}", self.base_url),
            headers: json_headers(),
            body: Some(encode(draft)?),
        })
    }

    pub fn build_delete_task(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/task/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<TaskList, ApiError> {
        check_status(&response, LIST_FAILED)?;
        let envelope: ListEnvelope = decode(&response.body)?;
        let tasks: Vec<_> = envelope.data.iter().map(to_ui_shape).collect();
        let count = envelope.count.unwrap_or(tasks.len());
        Ok(TaskList { tasks, count })
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<TaskPayload, ApiError> {
        check_status(&response, CREATE_FAILED)?;
        let envelope: DataEnvelope<BackendTask> = decode(&response.body)?;
        Ok(TaskPayload {
            task: to_ui_shape(&envelope.data),
        })
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<TaskPayload, ApiError> {
        check_status(&response, UPDATE_FAILED)?;
        let envelope: DataEnvelope<BackendTask> = decode(&response.body)?;
        Ok(TaskPayload {
            task: to_ui_shape(&envelope.data),
        })
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<DeletedTask, ApiError> {
        check_status(&response, DELETE_FAILED)?;
        // An empty 2xx body acknowledges the delete without a payload.
        if response.body.trim().is_empty() {
            return Ok(DeletedTask {
                task: serde_json::Value::Null,
            });
        }
        let envelope: DeleteEnvelope = decode(&response.body)?;
        Ok(DeletedTask {
            task: envelope.data,
        })
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode(draft: &TaskDraft) -> Result<String, ApiError> {
    serde_json::to_string(&to_backend_shape(draft)).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

/// Turn a non-2xx response into `ServerRejection`, preferring the body's
/// `message` over the per-operation default.
fn check_status(response: &HttpResponse, default_message: &str) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| default_message.to_string());
    Err(ApiError::ServerRejection {
        status: response.status,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TaskClient {
        TaskClient::new("http://localhost:5000/api")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn draft(title: &str, assigned_to: &str) -> TaskDraft {
        TaskDraft {
            title: Some(title.to_string()),
            assigned_to: assigned_to.to_string(),
            ..TaskDraft::default()
        }
    }

    #[test]
    fn build_list_tasks_produces_correct_request() {
        let req = client().build_list_tasks();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:5000/api/tasks");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_task_sends_backend_shape() {
        let req = client().build_create_task(&draft("", "Amy")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:5000/api/task");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Task for Amy");
        assert_eq!(body["assignedTo"], "Amy");
        assert_eq!(body["status"], "pending");
        assert_eq!(body["priority"], "medium");
        assert_eq!(body["description"], "");
    }

    #[test]
    fn build_update_task_addresses_id() {
        let mut input = draft("Fix", "Bob");
        input.status = "Completed".to_string();
        let req = client().build_update_task("abc123", &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:5000/api/task/abc123");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["status"], "completed");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_delete_task_has_no_body() {
        let req = client().build_delete_task("5");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:5000/api/task/5");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TaskClient::new("http://localhost:5000/api/");
        assert_eq!(client.build_list_tasks().path, "http://localhost:5000/api/tasks");
    }

    #[test]
    fn default_client_targets_default_base_url() {
        assert_eq!(TaskClient::default().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn parse_list_tasks_maps_each_task_in_order() {
        let body = r#"{"data":[
            {"_id":"2","assignedTo":"Zed","status":"completed","priority":"high","createdAt":"2024-02-01T00:00:00Z"},
            {"_id":"1","assignedTo":"Bob","status":"pending","priority":"low","createdAt":"2024-01-05T00:00:00Z"}
        ],"count":2}"#;
        let list = client().parse_list_tasks(response(200, body)).unwrap();
        assert_eq!(list.count, 2);
        assert_eq!(list.tasks[0].id, "2");
        assert_eq!(list.tasks[0].status, "Completed");
        assert_eq!(list.tasks[1].id, "1");
        assert_eq!(list.tasks[1].due_date, "05/01/2024");
    }

    #[test]
    fn parse_list_tasks_counts_when_server_omits_count() {
        let list = client()
            .parse_list_tasks(response(200, r#"{"data":[{"_id":"1"}]}"#))
            .unwrap();
        assert_eq!(list.count, 1);
    }

    #[test]
    fn parse_list_tasks_uses_default_message_without_body_message() {
        let err = client().parse_list_tasks(response(500, "{}")).unwrap_err();
        assert!(matches!(err, ApiError::ServerRejection { status: 500, .. }));
        assert_eq!(err.to_string(), "Failed to fetch tasks");
    }

    #[test]
    fn parse_list_tasks_bad_json() {
        let err = client().parse_list_tasks(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
    }

    #[test]
    fn parse_create_task_maps_created_resource() {
        let body = r#"{"data":{"_id":"9","assignedTo":"Amy","title":"Task for Amy","description":"","status":"pending","priority":"medium","createdAt":"2024-03-10T09:00:00Z"}}"#;
        let payload = client().parse_create_task(response(201, body)).unwrap();
        assert_eq!(payload.task.id, "9");
        assert_eq!(payload.task.priority, "Normal");
        assert_eq!(payload.task.comments, "Task for Amy");
    }

    #[test]
    fn parse_create_task_rejected_with_message() {
        let err = client()
            .parse_create_task(response(400, r#"{"message":"assignedTo is required"}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "assignedTo is required");
    }

    #[test]
    fn parse_update_task_not_found_uses_server_message() {
        let err = client()
            .parse_update_task(response(404, r#"{"message":"not found"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::ServerRejection { status: 404, .. }));
        assert_eq!(err.to_string(), "not found");
    }

    #[test]
    fn parse_update_task_non_json_error_body_uses_default() {
        let err = client().parse_update_task(response(502, "Bad Gateway")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to update task");
    }

    #[test]
    fn parse_delete_task_returns_raw_data() {
        let body = r#"{"data":{"_id":"5","status":"pending"}}"#;
        let deleted = client().parse_delete_task(response(200, body)).unwrap();
        assert_eq!(deleted.task["_id"], "5");
        assert_eq!(deleted.task["status"], "pending");
    }

    #[test]
    fn parse_delete_task_accepts_empty_body() {
        let deleted = client().parse_delete_task(response(204, "")).unwrap();
        assert!(deleted.task.is_null());
    }

    #[test]
    fn parse_delete_task_failure_default_message() {
        let err = client().parse_delete_task(response(404, "")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete task");
    }
}
