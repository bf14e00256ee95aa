//! Command-line definitions

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::script::ScriptArgs;

#[derive(Parser)]
#[command(name = "taskpad")]
#[command(about = "Single-screen terminal to-do list")]
#[command(version)]
pub struct Cli {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true, env = "TASKPAD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a session from line-oriented commands (file or stdin)
    Script(ScriptArgs),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
