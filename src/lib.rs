//! Taskpad library - task list state and its terminal frontends

pub mod cli;
pub mod config;
pub mod task;
pub mod tui;
