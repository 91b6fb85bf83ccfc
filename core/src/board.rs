//! Table-view state: the displayed list, the last error, the search term and
//! the operations currently in flight.
//!
//! # Design
//! Hosts that run requests themselves call `begin` before issuing a request
//! and `complete` with the result. `refresh`, `save` and `delete` do both
//! around a `TaskService` call. An operation already in flight cannot be
//! started again; different operations may overlap and are applied in the
//! order they complete.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::error::BoardError;
use crate::outcome::Outcome;
use crate::reconcile::{apply_mutation_result, Mutation};
use crate::service::TaskService;
use crate::transport::Transport;
use crate::types::{TaskDraft, UiTask};

/// An operation that has been started but not completed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PendingOp {
    Refresh,
    Create,
    Update(String),
    Delete(String),
}

impl PendingOp {
    fn of(mutation: &Mutation) -> Self {
        match mutation {
            Mutation::Refreshed(_) => PendingOp::Refresh,
            Mutation::Created(_) => PendingOp::Create,
            Mutation::Updated { id, .. } => PendingOp::Update(id.clone()),
            Mutation::Deleted { id, .. } => PendingOp::Delete(id.clone()),
        }
    }
}

impl fmt::Display for PendingOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingOp::Refresh => write!(f, "refresh"),
            PendingOp::Create => write!(f, "create"),
            PendingOp::Update(id) => write!(f, "update of task {id}"),
            PendingOp::Delete(id) => write!(f, "delete of task {id}"),
        }
    }
}

/// Keep tasks whose assignee, status, priority or comments contain `term`,
/// ignoring case. An empty term keeps everything.
pub fn filter_tasks<'a>(tasks: &'a [UiTask], term: &str) -> Vec<&'a UiTask> {
    let needle = term.to_lowercase();
    tasks
        .iter()
        .filter(|task| {
            [&task.assigned_to, &task.status, &task.priority, &task.comments]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct TaskBoard {
    tasks: Vec<UiTask>,
    error: Option<String>,
    search: String,
    in_flight: HashSet<PendingOp>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[UiTask] {
        &self.tasks
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// True while a refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.contains(&PendingOp::Refresh)
    }

    pub fn is_pending(&self, op: &PendingOp) -> bool {
        self.in_flight.contains(op)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn visible_tasks(&self) -> Vec<&UiTask> {
        filter_tasks(&self.tasks, &self.search)
    }

    /// `(visible, total)` for the "N of M records" line.
    pub fn record_summary(&self) -> (usize, usize) {
        (self.visible_tasks().len(), self.tasks.len())
    }

    /// Mark `op` as in flight. A refresh also clears the previous error.
    pub fn begin(&mut self, op: PendingOp) -> Result<(), BoardError> {
        if self.in_flight.contains(&op) {
            return Err(BoardError::Busy(op.to_string()));
        }
        if op == PendingOp::Refresh {
            self.error = None;
        }
        debug!(%op, "operation started");
        self.in_flight.insert(op);
        Ok(())
    }

    /// Apply a finished operation and release its in-flight slot.
    pub fn complete(&mut self, mutation: Mutation) {
        self.in_flight.remove(&PendingOp::of(&mutation));
        let next = apply_mutation_result(&self.tasks, &mutation);
        self.tasks = next.tasks;
        if next.error.is_some() {
            self.error = next.error;
        }
    }

    /// Fetch the full list, replacing the local one on success. Also serves
    /// as the retry after a failed fetch.
    pub fn refresh<T: Transport>(&mut self, service: &TaskService<T>) -> Result<(), BoardError> {
        self.begin(PendingOp::Refresh)?;
        let outcome = service.list_tasks();
        self.complete(Mutation::Refreshed(outcome));
        Ok(())
    }

    /// Create the draft, or update it when it carries an id. Invalid drafts
    /// are rejected before any request is issued.
    pub fn save<T: Transport>(
        &mut self,
        service: &TaskService<T>,
        draft: &TaskDraft,
    ) -> Result<(), BoardError> {
        draft.validate()?;
        match draft.id.as_deref() {
            Some(id) => {
                self.begin(PendingOp::Update(id.to_string()))?;
                let outcome = service.update_task(id, draft);
                self.complete(Mutation::Updated {
                    id: id.to_string(),
                    outcome,
                });
            }
            None => {
                self.begin(PendingOp::Create)?;
                let outcome = service.create_task(draft);
                self.complete(Mutation::Created(outcome));
            }
        }
        Ok(())
    }

    pub fn delete<T: Transport>(
        &mut self,
        service: &TaskService<T>,
        id: &str,
    ) -> Result<(), BoardError> {
        self.begin(PendingOp::Delete(id.to_string()))?;
        let outcome = service.delete_task(id);
        self.complete(Mutation::Deleted {
            id: id.to_string(),
            outcome,
        });
        Ok(())
    }

    /// Outcome of the most recent operation as the view would report it.
    pub fn last_outcome(&self) -> Outcome<()> {
        match &self.error {
            Some(error) => Outcome::failure(error.clone()),
            None => Outcome::Success(()),
        }
    }
}
