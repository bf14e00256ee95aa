//! Task list state
//!
//! - Task records and identifiers
//! - The store that owns and mutates them
//! - The confirm-before-delete protocol used by every frontend

pub mod confirm;
pub mod model;
pub mod store;

pub use confirm::{Decision, DeleteRequest, Resolution};
pub use model::{Task, TaskId, TaskState};
pub use store::{Snapshot, StoreError, TaskListStore};
