//! The four task operations, each one HTTP round-trip returning an `Outcome`.
//!
//! # Design
//! `TaskService` pairs a stateless `TaskClient` with a `Transport`. Every
//! failure (connection error, non-2xx status, undecodable body) is logged and
//! folded into `Outcome::Failure`; nothing escapes to the caller.

use tracing::{debug, error};

use crate::client::TaskClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::outcome::{DeletedTask, Outcome, TaskList, TaskPayload};
use crate::transport::{Transport, UreqTransport};
use crate::types::TaskDraft;

pub struct TaskService<T> {
    client: TaskClient,
    transport: T,
}

impl TaskService<UreqTransport> {
    /// Blocking service against `TASK_API_URL` or the default base URL.
    pub fn from_env() -> Self {
        Self::new(TaskClient::from_env(), UreqTransport::new())
    }
}

impl<T: Transport> TaskService<T> {
    pub fn new(client: TaskClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TaskClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_tasks(&self) -> Outcome<TaskList> {
        let result = self
            .send(self.client.build_list_tasks())
            .and_then(|response| self.client.parse_list_tasks(response));
        finish("list", result)
    }

    pub fn create_task(&self, draft: &TaskDraft) -> Outcome<TaskPayload> {
        let result = self
            .client
            .build_create_task(draft)
            .and_then(|request| self.send(request))
            .and_then(|response| self.client.parse_create_task(response));
        finish("create", result)
    }

    pub fn update_task(&self, id: &str, draft: &TaskDraft) -> Outcome<TaskPayload> {
        let result = self
            .client
            .build_update_task(id, draft)
            .and_then(|request| self.send(request))
            .and_then(|response| self.client.parse_update_task(response));
        finish("update", result)
    }

    pub fn delete_task(&self, id: &str) -> Outcome<DeletedTask> {
        let result = self
            .send(self.client.build_delete_task(id))
            .and_then(|response| self.client.parse_delete_task(response));
        finish("delete", result)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

fn finish<P>(operation: &'static str, result: Result<P, ApiError>) -> Outcome<P> {
    if let Err(e) = &result {
        error!(operation, error = %e, "task operation failed");
    }
    result.into()
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::error::TransportError;
    use crate::http::HttpMethod;

    /// Replays canned responses and records every request it receives.
    #[derive(Default)]
    pub(crate) struct StubTransport {
        pub(crate) requests: RefCell<Vec<HttpRequest>>,
        responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    }

    impl StubTransport {
        pub(crate) fn respond(self, status: u16, body: &str) -> Self {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
            self
        }

        pub(crate) fn fail(self, message: &str) -> Self {
            self.responses
                .borrow_mut()
                .push_back(Err(TransportError::new(message)));
            self
        }
    }

    impl Transport for StubTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::new("no canned response")))
        }
    }

    pub(crate) fn service(transport: StubTransport) -> TaskService<StubTransport> {
        TaskService::new(TaskClient::new("http://localhost:5000/api"), transport)
    }

    const BOB_LIST: &str = r#"{"data":[{"_id":"1","assignedTo":"Bob","status":"pending","priority":"low","createdAt":"2024-01-05T00:00:00Z"}],"count":1}"#;

    #[test]
    fn list_tasks_maps_scenario() {
        let svc = service(StubTransport::default().respond(200, BOB_LIST));
        let outcome = svc.list_tasks();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "tasks": [{
                    "id": "1",
                    "assignedTo": "Bob",
                    "status": "Not Started",
                    "dueDate": "05/01/2024",
                    "priority": "Low",
                    "comments": "No description",
                    "createdAt": "2024-01-05T00:00:00Z"
                }],
                "count": 1
            })
        );
        let requests = svc.transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].path, "http://localhost:5000/api/tasks");
    }

    #[test]
    fn list_tasks_twice_is_idempotent() {
        let svc = service(
            StubTransport::default()
                .respond(200, BOB_LIST)
                .respond(200, BOB_LIST),
        );
        assert_eq!(svc.list_tasks(), svc.list_tasks());
    }

    #[test]
    fn list_tasks_transport_failure_becomes_outcome() {
        let svc = service(StubTransport::default().fail("connection refused"));
        let outcome = svc.list_tasks();
        assert_eq!(outcome.error(), Some("network error: connection refused"));
    }

    #[test]
    fn create_task_synthesizes_title() {
        let created = r#"{"data":{"_id":"7","assignedTo":"Amy","title":"Task for Amy","description":"","status":"pending","priority":"medium","createdAt":"2024-03-10T09:00:00Z"}}"#;
        let svc = service(StubTransport::default().respond(201, created));
        let draft = TaskDraft {
            title: Some(String::new()),
            assigned_to: "Amy".to_string(),
            ..TaskDraft::default()
        };
        let outcome = svc.create_task(&draft);

        let sent = svc.transport.requests.borrow();
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Task for Amy");

        let task = &outcome.payload().unwrap().task;
        assert_eq!(task.id, "7");
        assert_eq!(task.comments, "Task for Amy");
    }

    #[test]
    fn update_task_not_found_surfaces_message() {
        let svc = service(StubTransport::default().respond(404, r#"{"message":"not found"}"#));
        let outcome = svc.update_task("missing", &TaskDraft::default());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({"success": false, "error": "not found"})
        );
        assert_eq!(
            svc.transport.requests.borrow()[0].path,
            "http://localhost:5000/api/task/missing"
        );
    }

    #[test]
    fn update_task_malformed_body_is_failure() {
        let svc = service(StubTransport::default().respond(200, r#"{"data":42}"#));
        let outcome = svc.update_task("1", &TaskDraft::default());
        assert!(outcome.error().unwrap().starts_with("malformed response"));
    }

    #[test]
    fn delete_task_returns_unmapped_payload() {
        let svc = service(StubTransport::default().respond(
            200,
            r#"{"data":{"_id":"5","status":"completed"}}"#,
        ));
        let outcome = svc.delete_task("5");
        let deleted = outcome.payload().unwrap();
        assert_eq!(deleted.task["status"], "completed");
        assert_eq!(svc.transport.requests.borrow()[0].method, HttpMethod::Delete);
    }
}
