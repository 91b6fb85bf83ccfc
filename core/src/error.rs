//! Error types for the task API client.
//!
//! # Design
//! `ApiError` keeps the failure categories apart for logging and tests, but
//! callers of `TaskService` only ever see its `Display` text inside
//! `Outcome::Failure`. `ServerRejection` therefore displays the bare server
//! message so it reaches the view unchanged.

use thiserror::Error;

/// Errors produced while building requests or interpreting responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    ServerRejection { status: u16, message: String },

    /// A 2xx body could not be decoded into the expected envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Connection-level failure reported by a `Transport`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("network error: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A task draft rejected before any request is issued.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a task title")]
    MissingTitle,
    #[error("Please enter who this task is assigned to")]
    MissingAssignee,
}

/// Reasons `TaskBoard` refuses to start an operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("{0} is already in progress")]
    Busy(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
