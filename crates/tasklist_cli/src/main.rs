//! Command-line front end for the task list.
//!
//! # Responsibility
//! - Parse user commands and route them through `TaskStore` and `UiState`.
//! - Print the filtered list and validation warnings.
//!
//! # Invariants
//! - Every invocation opens one store, runs one command and exits.
//! - Rejected input exits with code 1; unknown ids are reported but exit 0.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tasklist_core::db::open_db;
use tasklist_core::{
    core_version, default_log_level, init_logging, FilterMode, KeyValueStore, PersistenceBridge,
    SqliteKvStore, Task, TaskId, TaskStore, UiState,
};

const DEFAULT_DB_FILE_NAME: &str = "tasklist.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about = "Manage a local task list")]
struct Cli {
    /// SQLite file holding the task list.
    #[arg(long, global = true, env = "TASKLIST_DB_PATH")]
    db: Option<PathBuf>,

    /// One of trace|debug|info|warn|error.
    #[arg(long, global = true, env = "TASKLIST_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, global = true, env = "TASKLIST_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a new task.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List tasks.
    List {
        #[arg(long, short, default_value_t = FilterMode::All)]
        filter: FilterMode,
    },
    /// Flip a task between pending and completed.
    Toggle { id: TaskId },
    /// Replace the text of a task.
    Edit {
        id: TaskId,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a task after confirmation.
    Remove {
        id: TaskId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Print the core version.
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Result of one command, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Done,
    Rejected,
}

impl Outcome {
    fn exit_code(self) -> ExitCode {
        match self {
            Self::Done => ExitCode::SUCCESS,
            Self::Rejected => ExitCode::from(1),
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("logging init failed")?;
    }

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();

    if let Command::Version = cli.command {
        writeln!(stdout, "tasklist_core version={}", core_version())?;
        return Ok(ExitCode::SUCCESS);
    }

    let db_path = resolve_db_path(cli.db);
    let conn =
        open_db(&db_path).with_context(|| format!("failed to open `{}`", db_path.display()))?;
    let mut store = TaskStore::open(PersistenceBridge::new(SqliteKvStore::new(&conn)));
    info!(
        "event=cli_command module=cli status=start count={}",
        store.len()
    );

    let outcome = execute(cli.command, &mut store, &mut stdout, &mut stderr, prompt_stdin)?;
    Ok(outcome.exit_code())
}

/// Runs one command against `store`, writing the list and notices to `out`
/// and warnings to `err`.
fn execute<S: KeyValueStore>(
    command: Command,
    store: &mut TaskStore<S>,
    out: &mut impl Write,
    err: &mut impl Write,
    mut confirm: impl FnMut(&str) -> Result<bool>,
) -> Result<Outcome> {
    let mut ui = UiState::new();

    match command {
        Command::Add { text } => match ui.submit_add(store, &text.join(" ")) {
            Ok(id) => writeln!(out, "added {id}")?,
            Err(_) => return report_warning(&ui, err),
        },
        Command::List { filter } => {
            ui.set_filter(filter);
            print_list(store, &ui, out)?;
        }
        Command::Toggle { id } => {
            if store.toggle(id) {
                if let Some(task) = store.get(id) {
                    writeln!(out, "{}", format_task(task))?;
                }
            } else {
                writeln!(out, "no task with id {id}")?;
            }
        }
        Command::Edit { id, text } => {
            ui.start_edit(id);
            match ui.submit_edit(store, &text.join(" ")) {
                Ok(true) => writeln!(out, "updated {id}")?,
                Ok(false) => writeln!(out, "no task with id {id}")?,
                Err(_) => return report_warning(&ui, err),
            }
        }
        Command::Remove { id, yes } => {
            let Some(task) = store.get(id) else {
                writeln!(out, "no task with id {id}")?;
                return Ok(Outcome::Done);
            };
            let prompt = format!("Delete \"{}\"? [y/N] ", task.text);
            ui.request_delete(id);
            if yes || confirm(&prompt)? {
                ui.confirm_delete(store);
                writeln!(out, "removed {id}")?;
            } else {
                ui.cancel_delete();
                writeln!(out, "kept {id}")?;
            }
        }
        Command::Version => writeln!(out, "tasklist_core version={}", core_version())?,
    }
    Ok(Outcome::Done)
}

fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    flag.filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
}

fn print_list<S: KeyValueStore>(
    store: &TaskStore<S>,
    ui: &UiState,
    out: &mut impl Write,
) -> Result<()> {
    let counts = store.counts();
    let tabs = FilterMode::ALL
        .iter()
        .map(|mode| {
            let marker = if *mode == ui.filter() { "*" } else { " " };
            format!("{marker}{mode} ({})", counts.for_mode(*mode))
        })
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{tabs}")?;

    let visible = ui.visible(store);
    if visible.is_empty() {
        writeln!(out, "(no tasks)")?;
        return Ok(());
    }
    for task in visible {
        writeln!(out, "{}", format_task(task))?;
    }
    Ok(())
}

fn format_task(task: &Task) -> String {
    let check = if task.completed { "x" } else { " " };
    format!("[{check}] {:>13}  {}", task.id, task.text)
}

fn report_warning(ui: &UiState, err: &mut impl Write) -> Result<Outcome> {
    if let Some(message) = ui.warning_message() {
        writeln!(err, "warning: {message}")?;
    }
    Ok(Outcome::Rejected)
}

fn prompt_stdin(prompt: &str) -> Result<bool> {
    let mut stdout = std::io::stdout();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::{execute, format_task, resolve_db_path, Cli, Command, Outcome};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;
    use tasklist_core::{FilterMode, MemoryStore, PersistenceBridge, Task, TaskStore};

    struct Output {
        outcome: Outcome,
        out: String,
        err: String,
    }

    fn run_args(store: &mut TaskStore<MemoryStore>, args: &[&str], answer: bool) -> Output {
        let cli = Cli::try_parse_from(std::iter::once("tasklist").chain(args.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = execute(cli.command, store, &mut out, &mut err, |_| Ok(answer)).unwrap();
        Output {
            outcome,
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
        }
    }

    fn memory_store() -> TaskStore<MemoryStore> {
        TaskStore::open(PersistenceBridge::new(MemoryStore::new()))
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_filter_parses_mode_names() {
        let cli = Cli::try_parse_from(["tasklist", "list", "--filter", "pending"]).unwrap();
        match cli.command {
            Command::List { filter } => assert_eq!(filter, FilterMode::Pending),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["tasklist", "list", "--filter", "done"]).is_err());
    }

    #[test]
    fn add_collects_words() {
        let cli = Cli::try_parse_from(["tasklist", "add", "buy", "milk"]).unwrap();
        match cli.command {
            Command::Add { text } => assert_eq!(text.join(" "), "buy milk"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn empty_db_flag_falls_back_to_temp_dir() {
        let path = resolve_db_path(Some(PathBuf::new()));
        assert!(path.ends_with("tasklist.sqlite3"));
        let explicit = resolve_db_path(Some(PathBuf::from("/tmp/x.sqlite3")));
        assert_eq!(explicit, PathBuf::from("/tmp/x.sqlite3"));
    }

    #[test]
    fn format_task_marks_completion() {
        let mut task = Task::new(5, "walk");
        assert!(format_task(&task).starts_with("[ ]"));
        task.toggle();
        assert!(format_task(&task).starts_with("[x]"));
    }

    #[test]
    fn duplicate_add_warns_and_is_rejected() {
        let mut store = memory_store();
        assert_eq!(run_args(&mut store, &["add", "Buy", "milk"], true).outcome, Outcome::Done);

        let output = run_args(&mut store, &["add", "buy", "MILK"], true);
        assert_eq!(output.outcome, Outcome::Rejected);
        assert!(output.err.starts_with("warning: "));
        assert!(output.out.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn empty_edit_warns_and_is_rejected() {
        let mut store = memory_store();
        let id = store.add("walk dog").unwrap();

        let output = run_args(&mut store, &["edit", &id.to_string(), "   "], true);
        assert_eq!(output.outcome, Outcome::Rejected);
        assert!(output.err.starts_with("warning: "));
        assert_eq!(store.get(id).unwrap().text, "walk dog");
    }

    #[test]
    fn edit_of_unknown_id_still_validates() {
        let mut store = memory_store();
        store.add("walk dog").unwrap();

        let rejected = run_args(&mut store, &["edit", "42", "Walk Dog"], true);
        assert_eq!(rejected.outcome, Outcome::Rejected);

        let noop = run_args(&mut store, &["edit", "42", "feed cat"], true);
        assert_eq!(noop.outcome, Outcome::Done);
        assert!(noop.out.contains("no task with id 42"));
        assert!(noop.err.is_empty());
    }

    #[test]
    fn unknown_ids_are_reported_without_failing() {
        let mut store = memory_store();
        store.add("walk dog").unwrap();

        for args in [["toggle", "42"], ["remove", "42"]] {
            let output = run_args(&mut store, &args, true);
            assert_eq!(output.outcome, Outcome::Done);
            assert!(output.out.contains("no task with id 42"));
            assert!(output.err.is_empty());
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_follows_confirmation_answer() {
        let mut store = memory_store();
        let id = store.add("walk dog").unwrap();
        let id_arg = id.to_string();

        let kept = run_args(&mut store, &["remove", &id_arg], false);
        assert!(kept.out.contains("kept"));
        assert_eq!(store.len(), 1);

        let removed = run_args(&mut store, &["remove", &id_arg], true);
        assert_eq!(removed.outcome, Outcome::Done);
        assert!(store.is_empty());
    }

    #[test]
    fn list_prints_tabs_and_filtered_tasks() {
        let mut store = memory_store();
        let done = store.add("done one").unwrap();
        store.add("open one").unwrap();
        store.toggle(done);

        let output = run_args(&mut store, &["list", "--filter", "completed"], true);
        assert!(output.out.starts_with(" all (2)  *completed (1)   pending (1)"));
        assert!(output.out.contains("[x]"));
        assert!(!output.out.contains("open one"));
    }
}
