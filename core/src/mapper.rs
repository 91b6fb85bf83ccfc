//! Translation between the backend task schema and the table view's schema.
//!
//! # Design
//! Each enum has two one-directional lookups rather than one shared table
//! keyed by both vocabularies, so the forward and backward value spaces can
//! never collide. Every lookup passes unknown values through unchanged.
//! All functions here are pure.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::{present, BackendTask, BackendTaskPayload, TaskDraft, UiTask};

pub const UNASSIGNED: &str = "Unassigned";
pub const NO_DESCRIPTION: &str = "No description";
pub const INVALID_DATE: &str = "Invalid Date";

/// UI status label → backend status value.
pub fn status_to_backend(status: &str) -> String {
    match status {
        "Not Started" => "pending",
        "In Progress" => "in-progress",
        "Completed" => "completed",
        other => other,
    }
    .to_string()
}

/// Backend status value → UI status label.
pub fn status_to_ui(status: &str) -> String {
    match status {
        "pending" => "Not Started",
        "in-progress" => "In Progress",
        "completed" => "Completed",
        other => other,
    }
    .to_string()
}

/// UI priority label → backend priority value.
pub fn priority_to_backend(priority: &str) -> String {
    match priority {
        "Low" => "low",
        "Normal" => "medium",
        "High" => "high",
        other => other,
    }
    .to_string()
}

/// Backend priority value → UI priority label.
pub fn priority_to_ui(priority: &str) -> String {
    match priority {
        "low" => "Low",
        "medium" => "Normal",
        "high" => "High",
        other => other,
    }
    .to_string()
}

/// Format a backend timestamp as a day-first `DD/MM/YYYY` date.
///
/// RFC 3339 timestamps are taken in UTC. Naive timestamps and bare
/// `YYYY-MM-DD` dates are accepted as-is. Anything else, including a missing
/// timestamp, yields `"Invalid Date"`.
pub fn format_due_date(timestamp: Option<&str>) -> String {
    timestamp
        .and_then(parse_date)
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Convert a displayed `DD/MM/YYYY` date into the `YYYY-MM-DD` form a date
/// input expects. Already-converted dates are returned unchanged; anything
/// else becomes an empty string.
pub fn format_date_for_input(date: &str) -> String {
    if date.contains('-') && date.len() == 10 {
        return date.to_string();
    }
    if date.contains('/') {
        let parts: Vec<&str> = date.split('/').collect();
        if let [day, month, year] = parts.as_slice() {
            return format!("{year}-{month:0>2}-{day:0>2}");
        }
    }
    String::new()
}

/// Backend task → UI task.
pub fn to_ui_shape(task: &BackendTask) -> UiTask {
    let comments = present(&task.description)
        .or_else(|| present(&task.title))
        .unwrap_or(NO_DESCRIPTION);

    UiTask {
        id: task.id.clone(),
        assigned_to: present(&task.assigned_to).unwrap_or(UNASSIGNED).to_string(),
        status: status_to_ui(&task.status),
        due_date: format_due_date(task.created_at.as_deref()),
        priority: priority_to_ui(&task.priority),
        comments: comments.to_string(),
        title: task.title.clone(),
        description: task.description.clone(),
        created_at: task.created_at.clone(),
        updated_at: task.updated_at.clone(),
    }
}

/// UI draft → backend request payload.
///
/// A missing title is synthesized from the assignee; the description falls
/// back to the draft's comments.
pub fn to_backend_shape(draft: &TaskDraft) -> BackendTaskPayload {
    let title = match present(&draft.title) {
        Some(title) => title.to_string(),
        None => format!("Task for {}", draft.assigned_to),
    };
    let description = present(&draft.description)
        .or_else(|| present(&draft.comments))
        .unwrap_or_default();

    BackendTaskPayload {
        title,
        assigned_to: draft.assigned_to.clone(),
        description: description.to_string(),
        status: status_to_backend(&draft.status),
        priority: priority_to_backend(&draft.priority),
    }
}

impl From<&UiTask> for TaskDraft {
    /// Seed the edit form from a displayed task.
    fn from(task: &UiTask) -> Self {
        let description = present(&task.description).unwrap_or(&task.comments);
        Self {
            id: Some(task.id.clone()),
            title: Some(task.title.clone().unwrap_or_default()),
            assigned_to: task.assigned_to.clone(),
            status: task.status.clone(),
            priority: task.priority.clone(),
            due_date: Some(format_date_for_input(&task.due_date)),
            description: Some(description.to_string()),
            comments: None,
        }
    }
}
