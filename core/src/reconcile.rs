//! Applies an operation's outcome to the displayed task list.
//!
//! After a mutation the list is patched locally instead of re-fetched. A
//! refresh replaces the list wholesale. Failures never touch the list; they
//! only surface their message.

use tracing::debug;

use crate::outcome::{DeletedTask, Outcome, TaskList, TaskPayload};
use crate::types::UiTask;

/// A completed operation together with its outcome.
///
/// Update and delete carry the id the request addressed; that id, not the
/// response payload, selects the list entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Refreshed(Outcome<TaskList>),
    Created(Outcome<TaskPayload>),
    Updated {
        id: String,
        outcome: Outcome<TaskPayload>,
    },
    Deleted {
        id: String,
        outcome: Outcome<DeletedTask>,
    },
}

impl Mutation {
    pub fn error(&self) -> Option<&str> {
        match self {
            Mutation::Refreshed(outcome) => outcome.error(),
            Mutation::Created(outcome) => outcome.error(),
            Mutation::Updated { outcome, .. } => outcome.error(),
            Mutation::Deleted { outcome, .. } => outcome.error(),
        }
    }
}

/// The list to display next and the error to surface, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub tasks: Vec<UiTask>,
    pub error: Option<String>,
}

pub fn apply_mutation_result(current: &[UiTask], mutation: &Mutation) -> Reconciliation {
    if let Some(error) = mutation.error() {
        return Reconciliation {
            tasks: current.to_vec(),
            error: Some(error.to_string()),
        };
    }

    let tasks = match mutation {
        Mutation::Refreshed(Outcome::Success(list)) => list.tasks.clone(),
        Mutation::Created(Outcome::Success(payload)) => {
            let mut tasks = current.to_vec();
            tasks.push(payload.task.clone());
            tasks
        }
        Mutation::Updated {
            id,
            outcome: Outcome::Success(payload),
        } => current
            .iter()
            .map(|task| {
                if task.id == *id {
                    payload.task.clone()
                } else {
                    task.clone()
                }
            })
            .collect(),
        Mutation::Deleted {
            id,
            outcome: Outcome::Success(_),
        } => current.iter().filter(|task| task.id != *id).cloned().collect(),
        // Failures returned above.
        _ => current.to_vec(),
    };

    debug!(before = current.len(), after = tasks.len(), "applied mutation");
    Reconciliation { tasks, error: None }
}
