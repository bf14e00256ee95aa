//! CLI command implementations

pub mod definition;
pub mod script;

pub use definition::{Cli, Commands};
