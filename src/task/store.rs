//! In-memory task list and draft state
//!
//! `TaskListStore` is the only owner and mutator of task state. Operations
//! either apply completely or return a `StoreError` and leave state untouched.

use serde::Serialize;
use thiserror::Error;

use super::model::{Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The draft is empty or whitespace-only.
    #[error("task name cannot be empty")]
    InvalidInput,

    #[error("task #{0} not found")]
    NotFound(TaskId),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Point-in-time copy of the store for rendering or serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub total_count: usize,
    pub completed_count: usize,
    pub pending_name: String,
    pub can_submit: bool,
}

#[derive(Debug, Default)]
pub struct TaskListStore {
    tasks: Vec<Task>,
    pending_name: String,
    last_id: u64,
}

impl TaskListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_name(&self) -> &str {
        &self.pending_name
    }

    /// Replace the draft verbatim. Trimming only affects `can_submit`.
    pub fn set_pending_name(&mut self, text: impl Into<String>) {
        self.pending_name = text.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.pending_name.trim().is_empty()
    }

    /// Append a task named after the current draft and clear the draft.
    ///
    /// An empty or whitespace-only draft is rejected with
    /// [`StoreError::InvalidInput`] and the draft is kept as typed.
    pub fn add_task(&mut self) -> Result<TaskId> {
        if !self.can_submit() {
            tracing::warn!("rejected add with blank draft");
            return Err(StoreError::InvalidInput);
        }

        let id = self.next_id();
        let name = std::mem::take(&mut self.pending_name);
        tracing::debug!(%id, name = %name, "task added");
        self.tasks.push(Task::new(id, name));
        Ok(id)
    }

    /// Remove a task, keeping the relative order of the rest.
    pub fn remove_task(&mut self, id: TaskId) -> Result<Task> {
        let idx = self.position(id)?;
        let task = self.tasks.remove(idx);
        tracing::debug!(%id, "task removed");
        Ok(task)
    }

    /// Flip a task's completion flag. Returns the new value.
    pub fn toggle_completion(&mut self, id: TaskId) -> Result<bool> {
        let idx = self.position(id)?;
        let completed = self.tasks[idx].toggle();
        tracing::debug!(%id, completed, "task toggled");
        Ok(completed)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self.tasks.clone(),
            total_count: self.total_count(),
            completed_count: self.completed_count(),
            pending_name: self.pending_name.clone(),
            can_submit: self.can_submit(),
        }
    }

    fn position(&self, id: TaskId) -> Result<usize> {
        self.tasks.iter().position(|t| t.id == id).ok_or_else(|| {
            tracing::warn!(%id, "no such task");
            StoreError::NotFound(id)
        })
    }

    // Ids are never reused, even after the highest one is removed.
    fn next_id(&mut self) -> TaskId {
        self.last_id += 1;
        TaskId(self.last_id)
    }
}
