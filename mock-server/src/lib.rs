use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub const STATUSES: [&str; 3] = ["pending", "in-progress", "completed"];
pub const PRIORITIES: [&str; 3] = ["low", "medium", "high"];

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub status: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskList {
    pub data: Vec<Task>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

type Rejection = (StatusCode, Json<Message>);

/// Tasks in insertion order.
pub type Db = Arc<RwLock<Vec<Task>>>;

pub fn app() -> Router {
    router(Db::default())
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/api/tasks", get(list_tasks))
        .route("/api/task", post(create_task))
        .route("/api/task/{id}", put(update_task).delete(delete_task))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app().layer(TraceLayer::new_for_http())).await
}

fn reject(status: StatusCode, message: impl Into<String>) -> Rejection {
    (
        status,
        Json(Message {
            message: message.into(),
        }),
    )
}

fn not_found() -> Rejection {
    reject(StatusCode::NOT_FOUND, "Task not found")
}

/// Mongo-style 24 hex digit identifier.
fn new_id() -> String {
    Uuid::new_v4().simple().to_string()[..24].to_string()
}

fn required(field: &str, value: Option<String>) -> Result<String, Rejection> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(reject(StatusCode::BAD_REQUEST, format!("{field} is required"))),
    }
}

fn one_of(field: &str, value: String, allowed: &[&str]) -> Result<String, Rejection> {
    if allowed.contains(&value.as_str()) {
        Ok(value)
    } else {
        Err(reject(
            StatusCode::BAD_REQUEST,
            format!("{field} must be one of: {}", allowed.join(", ")),
        ))
    }
}

async fn list_tasks(State(db): State<Db>) -> Json<TaskList> {
    let tasks = db.read().await;
    Json(TaskList {
        data: tasks.clone(),
        count: tasks.len(),
    })
}

async fn create_task(
    State(db): State<Db>,
    Json(input): Json<CreateTask>,
) -> Result<(StatusCode, Json<Data<Task>>), Rejection> {
    let title = required("title", input.title)?;
    let assigned_to = required("assignedTo", input.assigned_to)?;
    let status = one_of("status", input.status.unwrap_or_else(|| "pending".into()), &STATUSES)?;
    let priority = one_of(
        "priority",
        input.priority.unwrap_or_else(|| "medium".into()),
        &PRIORITIES,
    )?;

    let now = Utc::now();
    let task = Task {
        id: new_id(),
        title,
        description: input.description.unwrap_or_default(),
        assigned_to,
        status,
        priority,
        created_at: now,
        updated_at: now,
    };
    tracing::debug!(id = %task.id, "task created");
    db.write().await.push(task.clone());
    Ok((StatusCode::CREATED, Json(Data { data: task })))
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Data<Task>>, Rejection> {
    let status = input
        .status
        .map(|s| one_of("status", s, &STATUSES))
        .transpose()?;
    let priority = input
        .priority
        .map(|p| one_of("priority", p, &PRIORITIES))
        .transpose()?;

    let mut tasks = db.write().await;
    let task = tasks.iter_mut().find(|t| t.id == id).ok_or_else(not_found)?;
    if let Some(title) = input.title {
        task.title = title;
    }
    if let Some(description) = input.description {
        task.description = description;
    }
    if let Some(assigned_to) = input.assigned_to {
        task.assigned_to = assigned_to;
    }
    if let Some(status) = status {
        task.status = status;
    }
    if let Some(priority) = priority {
        task.priority = priority;
    }
    task.updated_at = Utc::now();
    Ok(Json(Data { data: task.clone() }))
}

async fn delete_task(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Data<Task>>, Rejection> {
    let mut tasks = db.write().await;
    let index = tasks.iter().position(|t| t.id == id).ok_or_else(not_found)?;
    let removed = tasks.remove(index);
    tracing::debug!(id = %removed.id, "task deleted");
    Ok(Json(Data { data: removed }))
}
