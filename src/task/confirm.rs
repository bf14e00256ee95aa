//! Two-step confirmation for task deletion
//!
//! A [`DeleteRequest`] is opened first and then resolved with exactly one
//! [`Decision`]. Only an accepted request reaches [`TaskListStore::remove_task`].

use super::model::{Task, TaskId};
use super::store::{Result, StoreError, TaskListStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Cancel,
}

impl Decision {
    /// Interpret a free-form answer. Only an explicit yes accepts.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Self::Accept,
            _ => Self::Cancel,
        }
    }
}

/// Outcome of a resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Removed(Task),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    id: TaskId,
    name: String,
}

impl DeleteRequest {
    /// Open a request for `id`. Fails with `NotFound` if the task is absent.
    pub fn new(store: &TaskListStore, id: TaskId) -> Result<Self> {
        let task = store.get(id).ok_or(StoreError::NotFound(id))?;
        Ok(Self {
            id,
            name: task.name.clone(),
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prompt(&self) -> String {
        format!("Delete task \"{}\"?", self.name.trim())
    }

    pub fn resolve(self, decision: Decision, store: &mut TaskListStore) -> Result<Resolution> {
        match decision {
            Decision::Accept => store.remove_task(self.id).map(Resolution::Removed),
            Decision::Cancel => {
                tracing::debug!(id = %self.id, "deletion cancelled");
                Ok(Resolution::Cancelled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(names: &[&str]) -> TaskListStore {
        let mut store = TaskListStore::new();
        for name in names {
            store.set_pending_name(*name);
            store.add_task().unwrap();
        }
        store
    }

    #[test]
    fn test_decision_from_answer() {
        assert_eq!(Decision::from_answer("y"), Decision::Accept);
        assert_eq!(Decision::from_answer("YES"), Decision::Accept);
        assert_eq!(Decision::from_answer(" Yes\n"), Decision::Accept);
        assert_eq!(Decision::from_answer("n"), Decision::Cancel);
        assert_eq!(Decision::from_answer(""), Decision::Cancel);
        assert_eq!(Decision::from_answer("yep"), Decision::Cancel);
    }

    #[test]
    fn test_request_missing_task() {
        let store = store_with(&["a"]);
        assert_eq!(
            DeleteRequest::new(&store, TaskId(9)),
            Err(StoreError::NotFound(TaskId(9)))
        );
    }

    #[test]
    fn test_accept_removes() {
        let mut store = store_with(&["X"]);
        let request = DeleteRequest::new(&store, TaskId(1)).unwrap();
        assert_eq!(request.name(), "X");
        let resolution = request.resolve(Decision::Accept, &mut store).unwrap();
        assert!(matches!(resolution, Resolution::Removed(t) if t.name == "X"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_cancel_keeps_task() {
        let mut store = store_with(&["X", "Y"]);
        let request = DeleteRequest::new(&store, TaskId(2)).unwrap();
        let resolution = request.resolve(Decision::Cancel, &mut store).unwrap();
        assert_eq!(resolution, Resolution::Cancelled);
        assert_eq!(store.total_count(), 2);
    }

    #[test]
    fn test_accept_after_task_vanished() {
        let mut store = store_with(&["X"]);
        let request = DeleteRequest::new(&store, TaskId(1)).unwrap();
        store.remove_task(TaskId(1)).unwrap();
        assert_eq!(
            request.resolve(Decision::Accept, &mut store),
            Err(StoreError::NotFound(TaskId(1)))
        );
    }

    #[test]
    fn test_prompt_mentions_name() {
        let store = store_with(&["Buy milk"]);
        let request = DeleteRequest::new(&store, TaskId(1)).unwrap();
        assert_eq!(request.prompt(), "Delete task \"Buy milk\"?");
    }
}
