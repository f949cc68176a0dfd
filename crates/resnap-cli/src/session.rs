//! Interactive session: a history of lookups, a save list, and the rotating
//! featured strip.
//!
//! Lookups run as spawned tasks and report back over a channel, so a new
//! search can start while an earlier one is still pending. Each report
//! carries the [`EntryId`] it was started for.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use resnap_core::{Condition, EntryId, History, LookupOutcome, Showcase};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::lookup::{photo_outcome, read_photo, search_outcome};
use crate::service::ServiceClient;

const HELP: &str = "\
commands:
  search <term>      look up a resale price by description
  photo <path>       identify the item in a photo and look it up
  condition <name>   set the condition for new lookups (New, Open box, Used, Broken, For parts or not working)
  save <id>          add a history entry to the saved list
  history            show all lookups, newest first
  saved              show saved items and their minimum total
  featured           show the featured items strip
  help               show this message
  quit               leave the session";

#[derive(Debug, PartialEq)]
pub(crate) enum SessionCommand {
    Search(String),
    Photo(PathBuf),
    SetCondition(Condition),
    Save(EntryId),
    History,
    Saved,
    Featured,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub(crate) fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => {
            if rest.is_empty() {
                return Err("usage: search <term>".to_string());
            }
            SessionCommand::Search(rest.to_string())
        }
        "photo" | "p" => {
            if rest.is_empty() {
                return Err("usage: photo <path>".to_string());
            }
            SessionCommand::Photo(PathBuf::from(rest))
        }
        "condition" | "c" => rest
            .parse::<Condition>()
            .map(SessionCommand::SetCondition)
            .map_err(|e| e.to_string())?,
        "save" => rest
            .parse::<u64>()
            .map(|id| SessionCommand::Save(EntryId::from(id)))
            .map_err(|_| "usage: save <id>".to_string())?,
        "history" | "h" => SessionCommand::History,
        "saved" => SessionCommand::Saved,
        "featured" => SessionCommand::Featured,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(command))
}

/// Result of one spawned lookup.
#[derive(Debug)]
pub(crate) struct LookupReport {
    pub id: EntryId,
    pub outcome: anyhow::Result<LookupOutcome>,
}

pub(crate) struct Session {
    pub history: History,
    pub showcase: Showcase,
    pub condition: Condition,
}

impl Session {
    pub(crate) fn new(condition: Condition) -> Self {
        Self {
            history: History::new(),
            showcase: Showcase::default(),
            condition,
        }
    }

    /// Applies a finished lookup to its own entry and returns the line to print.
    pub(crate) fn record(&mut self, report: LookupReport) -> String {
        let result = match report.outcome {
            Ok(outcome) => self.history.resolve(report.id, outcome),
            Err(e) => {
                tracing::warn!(entry = %report.id, error = %e, "lookup failed");
                self.history.fail(report.id)
            }
        };
        match result {
            Ok(entry) => format!("[{}] {}", entry.id, entry.caption()),
            Err(e) => e.to_string(),
        }
    }

    pub(crate) fn save(&mut self, id: EntryId) -> String {
        match self.history.mark_saved(id) {
            Ok(entry) => format!("saved [{}] {}", entry.id, entry.title()),
            Err(e) => e.to_string(),
        }
    }
}

pub(crate) fn render_history(history: &History) -> String {
    if history.is_empty() {
        return "no lookups yet".to_string();
    }
    let mut out = String::new();
    for entry in history.entries() {
        let marker = if entry.saved { "*" } else { " " };
        let _ = writeln!(out, "{marker}[{}] {}", entry.id, entry.caption());
    }
    out.trim_end().to_string()
}

pub(crate) fn render_saved(history: &History) -> String {
    let mut out = String::new();
    for entry in history.saved() {
        let _ = writeln!(out, "[{}] {}", entry.id, entry.caption());
    }
    if let Some(summary) = history.saved_summary() {
        out.push_str(&summary);
    }
    out.trim_end().to_string()
}

pub(crate) fn render_featured(showcase: &Showcase) -> String {
    showcase
        .visible()
        .iter()
        .map(|item| format!("{}  ${} {}", item.title, item.price, item.currency))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs the interactive loop until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading standard input fails.
pub(crate) async fn run_session(
    service: ServiceClient,
    condition: Condition,
    showcase_interval: Duration,
) -> anyhow::Result<()> {
    let mut session = Session::new(condition);
    let (tx, mut rx) = mpsc::channel::<LookupReport>(16);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(showcase_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    ticker.tick().await; // first tick fires immediately

    println!("{HELP}");
    prompt(session.condition);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Some(SessionCommand::Quit)) => break,
                    Ok(Some(command)) => dispatch(&mut session, command, &service, &tx),
                    Ok(None) => {}
                    Err(message) => println!("{message}"),
                }
                prompt(session.condition);
            }
            Some(report) = rx.recv() => {
                println!("{}", session.record(report));
                prompt(session.condition);
            }
            _ = ticker.tick() => session.showcase.advance(),
        }
    }

    let pending = session
        .history
        .entries()
        .iter()
        .filter(|e| e.is_pending())
        .count();
    if pending > 0 {
        tracing::info!(pending, "leaving session with lookups still in flight");
    }
    Ok(())
}

fn dispatch(
    session: &mut Session,
    command: SessionCommand,
    service: &ServiceClient,
    tx: &mpsc::Sender<LookupReport>,
) {
    match command {
        SessionCommand::Search(term) => {
            let id = session.history.append_pending("");
            println!("[{id}] searching for {term}...");
            spawn_lookup(id, tx.clone(), service.clone(), session.condition, Job::Text(term));
        }
        SessionCommand::Photo(path) => {
            let id = session.history.append_pending(path.display().to_string());
            println!("[{id}] identifying {}...", path.display());
            spawn_lookup(id, tx.clone(), service.clone(), session.condition, Job::Photo(path));
        }
        SessionCommand::SetCondition(condition) => {
            session.condition = condition;
            println!("condition set to {condition}");
        }
        SessionCommand::Save(id) => println!("{}", session.save(id)),
        SessionCommand::History => println!("{}", render_history(&session.history)),
        SessionCommand::Saved => println!("{}", render_saved(&session.history)),
        SessionCommand::Featured => println!("{}", render_featured(&session.showcase)),
        SessionCommand::Help => println!("{HELP}"),
        SessionCommand::Quit => {}
    }
}

enum Job {
    Text(String),
    Photo(PathBuf),
}

fn spawn_lookup(
    id: EntryId,
    tx: mpsc::Sender<LookupReport>,
    service: ServiceClient,
    condition: Condition,
    job: Job,
) {
    tokio::spawn(async move {
        let outcome = match job {
            Job::Text(term) => search_outcome(&service, &term, condition).await,
            Job::Photo(path) => match read_photo(&path).await {
                Ok(photo) => photo_outcome(&service, &photo, condition).await,
                Err(e) => Err(e),
            },
        };
        if tx.send(LookupReport { id, outcome }).await.is_err() {
            tracing::debug!(entry = %id, "session closed before lookup finished");
        }
    });
}

fn prompt(condition: Condition) {
    print!("[{condition}] > ");
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
