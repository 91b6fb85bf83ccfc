//! Task records on both sides of the mapper.
//!
//! # Design
//! `BackendTask` mirrors the server's wire schema and `UiTask` the table
//! view's schema. They are defined independently from the mock-server crate;
//! integration tests catch schema drift. Status and priority stay `String` on
//! both sides because values outside the known sets must pass through the
//! mapper unchanged.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A task as stored and returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendTask {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request body for create and update. The server assigns `_id` and the
/// timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendTaskPayload {
    pub title: String,
    pub assigned_to: String,
    pub description: String,
    pub status: String,
    pub priority: String,
}

/// A task as displayed by the table view.
///
/// `due_date` is derived from the backend creation timestamp; the wire schema
/// has no due-date field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiTask {
    pub id: String,
    pub assigned_to: String,
    pub status: String,
    pub due_date: String,
    pub priority: String,
    pub comments: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

pub const DEFAULT_DRAFT_STATUS: &str = "Not Started";
pub const DEFAULT_DRAFT_PRIORITY: &str = "Normal";

/// Form-side task used as input to create and update.
///
/// `id` is set when the draft edits an existing task. `due_date` is carried
/// for the form only; the wire contract has nowhere to put it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub assigned_to: String,
    pub status: String,
    pub priority: String,
    pub due_date: Option<String>,
    pub description: Option<String>,
    pub comments: Option<String>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: None,
            assigned_to: String::new(),
            status: DEFAULT_DRAFT_STATUS.to_string(),
            priority: DEFAULT_DRAFT_PRIORITY.to_string(),
            due_date: None,
            description: None,
            comments: None,
        }
    }
}

impl TaskDraft {
    /// Reject drafts the form would not submit: blank title or assignee.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Err(ValidationError::MissingTitle);
        }
        if self.assigned_to.trim().is_empty() {
            return Err(ValidationError::MissingAssignee);
        }
        Ok(())
    }
}

/// Treat an empty string the same as a missing field.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
