//! `taskpad script` command implementation
//!
//! Drives a [`TaskListStore`] from line-oriented commands. Deletion follows the
//! same confirm protocol as the TUI: `remove <id>` opens a request and the
//! next line answers it.

use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::task::{Decision, DeleteRequest, Resolution, TaskId, TaskListStore};

#[derive(Args)]
pub struct ScriptArgs {
    /// Read commands from this file instead of stdin
    pub file: Option<PathBuf>,

    /// Print snapshots as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Replace the draft verbatim.
    Type(String),
    /// Submit the draft, optionally replacing it first.
    Add(Option<String>),
    Toggle(TaskId),
    Remove(TaskId),
    List,
    Counts,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs a task id")]
    MissingId { command: String },

    #[error("invalid task id '{0}'")]
    InvalidId(String),
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, ParseError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
        return Ok(None);
    }

    // Drafts are kept verbatim, so only the single separator after the
    // command word is consumed.
    let line = line.trim_start();
    let (word, rest) = match line.find(|c: char| c.is_ascii_whitespace()) {
        Some(at) => (&line[..at], Some(&line[at + 1..])),
        None => (line, None),
    };

    let command = match word {
        "type" => ScriptCommand::Type(rest.unwrap_or_default().to_string()),
        "add" => ScriptCommand::Add(rest.map(str::to_string)),
        "toggle" => ScriptCommand::Toggle(parse_id(word, rest)?),
        "remove" | "rm" => ScriptCommand::Remove(parse_id(word, rest)?),
        "list" | "ls" => ScriptCommand::List,
        "counts" => ScriptCommand::Counts,
        "help" => ScriptCommand::Help,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_id(command: &str, rest: Option<&str>) -> Result<TaskId, ParseError> {
    let raw = rest
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ParseError::MissingId {
            command: command.to_string(),
        })?;
    raw.parse()
        .map_err(|_| ParseError::InvalidId(raw.to_string()))
}

const HELP: &str = "\
commands:
  type <text>    set the draft
  add [text]     add the draft (or <text>) as a task
  toggle <id>    flip completion
  remove <id>    delete, answer the prompt with y/n
  list           show tasks and counters
  counts         show counters only";

pub struct ScriptSession {
    store: TaskListStore,
    pending: Option<DeleteRequest>,
    json: bool,
}

impl ScriptSession {
    pub fn new(json: bool) -> Self {
        Self {
            store: TaskListStore::new(),
            pending: None,
            json,
        }
    }

    pub fn store(&self) -> &TaskListStore {
        &self.store
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply one input line, writing any output to `out`.
    ///
    /// Store and parse errors are reported on `out` and do not fail the call;
    /// only write errors are returned.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> io::Result<()> {
        if let Some(request) = self.pending.take() {
            let decision = Decision::from_answer(line);
            return match request.resolve(decision, &mut self.store) {
                Ok(Resolution::Removed(task)) => writeln!(out, "removed #{} {}", task.id, task.name),
                Ok(Resolution::Cancelled) => writeln!(out, "cancelled"),
                Err(e) => writeln!(out, "error: {}", e),
            };
        }

        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(e) => {
                tracing::warn!("skipping line: {}", e);
                return writeln!(out, "error: {}", e);
            }
        };

        match command {
            ScriptCommand::Type(text) => {
                self.store.set_pending_name(text);
                Ok(())
            }
            ScriptCommand::Add(text) => {
                if let Some(text) = text {
                    self.store.set_pending_name(text);
                }
                match self.store.add_task() {
                    Ok(id) => {
                        let name = self.store.get(id).map(|t| t.name.as_str()).unwrap_or("");
                        writeln!(out, "added #{} {}", id, name)
                    }
                    Err(e) => writeln!(out, "error: {}", e),
                }
            }
            ScriptCommand::Toggle(id) => match self.store.toggle_completion(id) {
                Ok(true) => writeln!(out, "#{} completed", id),
                Ok(false) => writeln!(out, "#{} active", id),
                Err(e) => writeln!(out, "error: {}", e),
            },
            ScriptCommand::Remove(id) => match DeleteRequest::new(&self.store, id) {
                Ok(request) => {
                    writeln!(out, "{} [y/N]", request.prompt())?;
                    self.pending = Some(request);
                    Ok(())
                }
                Err(e) => writeln!(out, "error: {}", e),
            },
            ScriptCommand::List => self.print_list(out),
            ScriptCommand::Counts => self.print_counts(out),
            ScriptCommand::Help => writeln!(out, "{}", HELP),
        }
    }

    /// Cancel any unanswered deletion prompt.
    pub fn finish(&mut self, out: &mut impl Write) -> io::Result<()> {
        if let Some(request) = self.pending.take() {
            if let Err(e) = request.resolve(Decision::Cancel, &mut self.store) {
                return writeln!(out, "error: {}", e);
            }
            writeln!(out, "cancelled")?;
        }
        Ok(())
    }

    fn print_list(&self, out: &mut impl Write) -> io::Result<()> {
        if self.json {
            let snapshot = self.store.snapshot();
            return writeln!(out, "{}", serde_json::to_string(&snapshot)?);
        }

        if self.store.is_empty() {
            writeln!(out, "You don't have any tasks yet.")?;
        }
        for task in self.store.tasks() {
            writeln!(out, "{}", task)?;
        }
        self.print_counts(out)
    }

    fn print_counts(&self, out: &mut impl Write) -> io::Result<()> {
        if self.json {
            let counts = serde_json::json!({
                "total_count": self.store.total_count(),
                "completed_count": self.store.completed_count(),
            });
            return writeln!(out, "{}", counts);
        }
        writeln!(
            out,
            "created={} completed={}",
            self.store.total_count(),
            self.store.completed_count()
        )
    }
}

pub async fn run(args: ScriptArgs) -> Result<()> {
    let reader: Box<dyn BufRead> = match &args.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = ScriptSession::new(args.json);

    for line in reader.lines() {
        let line = line.context("Failed to read script input")?;
        session.execute(&line, &mut out)?;
    }
    session.finish(&mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_lines(session: &mut ScriptSession, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            session.execute(line, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_type_keeps_text_verbatim() {
        assert_eq!(
            parse_line("type   spaced  ").unwrap(),
            Some(ScriptCommand::Type("  spaced  ".to_string()))
        );
        assert_eq!(
            parse_line("type").unwrap(),
            Some(ScriptCommand::Type(String::new()))
        );
    }

    #[test]
    fn test_parse_add_variants() {
        assert_eq!(parse_line("add").unwrap(), Some(ScriptCommand::Add(None)));
        assert_eq!(
            parse_line("add Buy milk").unwrap(),
            Some(ScriptCommand::Add(Some("Buy milk".to_string())))
        );
        assert_eq!(
            parse_line("add ").unwrap(),
            Some(ScriptCommand::Add(Some(String::new())))
        );
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(
            parse_line("toggle 3").unwrap(),
            Some(ScriptCommand::Toggle(TaskId(3)))
        );
        assert_eq!(
            parse_line("rm #2").unwrap(),
            Some(ScriptCommand::Remove(TaskId(2)))
        );
        assert_eq!(
            parse_line("toggle"),
            Err(ParseError::MissingId {
                command: "toggle".to_string()
            })
        );
        assert_eq!(
            parse_line("remove x"),
            Err(ParseError::InvalidId("x".to_string()))
        );
    }

    #[test]
    fn test_parse_accepts_tab_separator() {
        assert_eq!(
            parse_line("toggle\t1").unwrap(),
            Some(ScriptCommand::Toggle(TaskId(1)))
        );
        assert_eq!(
            parse_line("type\tfoo ").unwrap(),
            Some(ScriptCommand::Type("foo ".to_string()))
        );
        assert_eq!(
            parse_line("add\t\tBuy milk").unwrap(),
            Some(ScriptCommand::Add(Some("\tBuy milk".to_string())))
        );
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# note").unwrap(), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_line("frobnicate"),
            Err(ParseError::UnknownCommand("frobnicate".to_string()))
        );
    }

    #[test]
    fn test_add_and_list() {
        let mut session = ScriptSession::new(false);
        let out = run_lines(&mut session, &["add Buy milk", "list"]);
        assert_eq!(out, "added #1 Buy milk\n[ ] #1 Buy milk\ncreated=1 completed=0\n");
    }

    #[test]
    fn test_blank_add_keeps_draft() {
        let mut session = ScriptSession::new(false);
        let out = run_lines(&mut session, &["type    ", "add"]);
        assert_eq!(out, "error: task name cannot be empty\n");
        assert!(session.store().is_empty());
        assert_eq!(session.store().pending_name(), "   ");
    }

    #[test]
    fn test_type_then_add() {
        let mut session = ScriptSession::new(false);
        let out = run_lines(&mut session, &["type Walk dog", "add"]);
        assert_eq!(out, "added #1 Walk dog\n");
        assert_eq!(session.store().pending_name(), "");
    }

    #[test]
    fn test_toggle_reports_state() {
        let mut session = ScriptSession::new(false);
        let out = run_lines(
            &mut session,
            &["add A", "add B", "toggle 1", "counts", "toggle 1", "toggle 7"],
        );
        assert_eq!(
            out,
            "added #1 A\nadded #2 B\n#1 completed\ncreated=2 completed=1\n#1 active\nerror: task #7 not found\n"
        );
    }

    #[test]
    fn test_remove_confirmed_then_again() {
        let mut session = ScriptSession::new(false);
        let out = run_lines(&mut session, &["add X", "remove 1", "y", "remove 1", "counts"]);
        assert_eq!(
            out,
            "added #1 X\nDelete task \"X\"? [y/N]\nremoved #1 X\nerror: task #1 not found\ncreated=0 completed=0\n"
        );
    }

    #[test]
    fn test_any_other_answer_cancels() {
        let mut session = ScriptSession::new(false);
        let out = run_lines(&mut session, &["add X", "remove 1", "add Y", "counts"]);
        assert!(out.contains("cancelled\n"));
        // The answer line is consumed, not executed.
        assert!(out.ends_with("created=1 completed=0\n"));
        assert!(!session.has_pending());
    }

    #[test]
    fn test_finish_cancels_pending() {
        let mut session = ScriptSession::new(false);
        run_lines(&mut session, &["add X", "remove 1"]);
        assert!(session.has_pending());

        let mut out = Vec::new();
        session.finish(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "cancelled\n");
        assert_eq!(session.store().total_count(), 1);
    }

    #[test]
    fn test_empty_list_message() {
        let mut session = ScriptSession::new(false);
        let out = run_lines(&mut session, &["list"]);
        assert_eq!(out, "You don't have any tasks yet.\ncreated=0 completed=0\n");
    }

    #[test]
    fn test_json_list() {
        let mut session = ScriptSession::new(true);
        let out = run_lines(&mut session, &["add A", "toggle 1", "list"]);
        let last = out.lines().last().unwrap();
        let value: serde_json::Value = serde_json::from_str(last).unwrap();
        assert_eq!(value["total_count"], 1);
        assert_eq!(value["completed_count"], 1);
        assert_eq!(value["tasks"][0]["name"], "A");
        assert_eq!(value["tasks"][0]["completed"], true);
    }

    #[test]
    fn test_parse_error_is_reported_and_skipped() {
        let mut session = ScriptSession::new(false);
        let out = run_lines(&mut session, &["bogus", "add A"]);
        assert_eq!(out, "error: unknown command 'bogus' (try 'help')\nadded #1 A\n");
    }
}
