//! Task data model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task identifier, issued by the store from a monotonically increasing counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    /// Accepts a bare number or one prefixed with `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.strip_prefix('#').unwrap_or(s).parse().map(TaskId)
    }
}

/// Completion state of a live task. `Removed` is not represented: a removed
/// task simply no longer exists in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Active,
    Completed,
}

impl TaskState {
    pub fn checkbox(&self) -> &'static str {
        match self {
            Self::Active => "[ ]",
            Self::Completed => "[x]",
        }
    }
}

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub completed: bool,
}

impl Task {
    pub(crate) fn new(id: TaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }

    pub fn state(&self) -> TaskState {
        if self.completed {
            TaskState::Completed
        } else {
            TaskState::Active
        }
    }

    pub(crate) fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{} {}", self.state().checkbox(), self.id, self.name)
    }
}
