//! Client core for the task board.
//!
//! # Overview
//! Maps tasks between the backend's wire schema and the table view's schema,
//! issues the four REST operations, and reconciles the displayed list after
//! each one.
//!
//! # Design
//! - `TaskClient` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network.
//! - `TaskService` executes requests through a `Transport` and folds every
//!   failure into the uniform `Outcome` shape.
//! - `mapper` and `reconcile` are pure and hold all the translation and
//!   list-update rules.
//! - `TaskBoard` owns the view state and guards against starting the same
//!   operation twice.

pub mod board;
pub mod client;
pub mod error;
pub mod http;
pub mod mapper;
pub mod outcome;
pub mod reconcile;
pub mod service;
pub mod transport;
pub mod types;

pub use board::{filter_tasks, PendingOp, TaskBoard};
pub use client::{TaskClient, DEFAULT_BASE_URL};
pub use error::{ApiError, BoardError, TransportError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mapper::{to_backend_shape, to_ui_shape};
pub use outcome::{DeletedTask, Outcome, TaskList, TaskPayload};
pub use reconcile::{apply_mutation_result, Mutation, Reconciliation};
pub use service::TaskService;
pub use transport::{Transport, UreqTransport};
pub use types::{BackendTask, BackendTaskPayload, TaskDraft, UiTask};
