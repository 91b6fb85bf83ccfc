//! Uniform result shape returned by every `TaskService` operation.
//!
//! Serializes as `{"success": true, ...payload}` or
//! `{"success": false, "error": "..."}`.

use serde::{Serialize, Serializer};

use crate::error::ApiError;
use crate::types::UiTask;

/// Success payload or a failure message. Never carries a structured error:
/// callers distinguish failures by message text only.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure { error: String },
}

impl<T> Outcome<T> {
    pub fn failure(error: impl Into<String>) -> Self {
        Outcome::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Outcome::Success(payload) => Some(payload),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure { error } => Some(error),
        }
    }
}

impl<T> From<Result<T, ApiError>> for Outcome<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(payload) => Outcome::Success(payload),
            Err(e) => Outcome::failure(e.to_string()),
        }
    }
}

#[derive(Serialize)]
struct SuccessRepr<'a, T> {
    success: bool,
    #[serde(flatten)]
    payload: &'a T,
}

#[derive(Serialize)]
struct FailureRepr<'a> {
    success: bool,
    error: &'a str,
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Success(payload) => SuccessRepr {
                success: true,
                payload,
            }
            .serialize(serializer),
            Outcome::Failure { error } => FailureRepr {
                success: false,
                error,
            }
            .serialize(serializer),
        }
    }
}

/// Payload of a successful list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskList {
    pub tasks: Vec<UiTask>,
    pub count: usize,
}

/// Payload of a successful create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPayload {
    pub task: UiTask,
}

/// Payload of a successful delete: the server's `data` exactly as returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeletedTask {
    pub task: serde_json::Value,
}
