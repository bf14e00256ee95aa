//! Taskpad - single-screen terminal to-do list

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use taskpad::cli::{self, Cli, Commands};
use taskpad::config::Config;
use taskpad::tui;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("TASKPAD_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("taskpad=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completion { shell }) => {
            generate(shell, &mut Cli::command(), "taskpad", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Script(args)) => cli::script::run(args).await,
        None => {
            let config = match &cli.config {
                Some(path) => Config::load_from(path)?,
                None => Config::load()?,
            };
            tui::run(config).await
        }
    }
}
