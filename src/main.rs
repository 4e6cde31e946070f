mod cli;
mod form;
mod logging;
mod model;
mod output;
mod project;
mod session;
mod storage;
mod store;
mod tui;
mod validate;
mod watch;

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use cli::{Cli, Command};
use form::TaskInput;
use model::Priority;
use session::EditSession;
use storage::JsonFileStorage;
use store::TaskStore;

fn default_store_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".taskdeck").join("tasks.json"))
}

fn resolve_store_path(cli_file: Option<String>) -> Result<PathBuf> {
    match cli_file {
        Some(p) => Ok(PathBuf::from(p)),
        None => default_store_path(),
    }
}

fn open_store(path: &PathBuf) -> TaskStore {
    TaskStore::load(Box::new(JsonFileStorage::new(path.clone())))
}

/// Resolves a full id or any unique prefix to a task id.
fn resolve_id(store: &TaskStore, input: &str) -> Result<String> {
    if store.get(input).is_some() {
        return Ok(input.to_string());
    }
    let matches: Vec<&str> = store
        .tasks()
        .iter()
        .filter(|t| t.id.starts_with(input))
        .map(|t| t.id.as_str())
        .collect();
    match matches.as_slice() {
        [id] => Ok((*id).to_string()),
        [] => bail!("no task with id '{input}'"),
        _ => bail!("task id '{input}' is ambiguous"),
    }
}

/// Asks for confirmation on destructive actions. Declining is not an error;
/// the caller leaves state unchanged.
fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let path = resolve_store_path(cli.file)?;
    let mut _logger = None;
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
        }
        _logger = Some(logging::init(dir)?);
    }

    match cli.command {
        Command::Add {
            title,
            desc,
            due,
            priority,
        } => {
            let mut store = open_store(&path);
            let mut session = EditSession::default();
            let input = TaskInput {
                title,
                description: desc,
                due,
                priority: Priority::parse(&priority)?,
            };
            let outcome = form::submit(&mut store, &mut session, &input)?;
            eprintln!("Added task '{}'", input.title.trim());
            println!("{}", outcome.id());
        }

        Command::Edit {
            id,
            title,
            desc,
            due,
            priority,
        } => {
            if title.is_none() && desc.is_none() && due.is_none() && priority.is_none() {
                bail!("nothing to edit: pass --title, --desc, --due, or --priority");
            }
            let mut store = open_store(&path);
            let id = resolve_id(&store, &id)?;
            let current = store.get(&id).map(form::input_from).unwrap_or_default();
            let input = TaskInput {
                title: title.unwrap_or(current.title),
                description: desc.unwrap_or(current.description),
                due: match due {
                    Some(d) if d.is_empty() => None,
                    Some(d) => Some(d),
                    None => current.due,
                },
                priority: match priority {
                    Some(p) => Priority::parse(&p)?,
                    None => current.priority,
                },
            };
            let mut session = EditSession::default();
            session.start(id.clone());
            form::submit(&mut store, &mut session, &input)?;
            eprintln!("Updated task '{}'", input.title.trim());
        }

        Command::Rm { id, yes } => {
            let mut store = open_store(&path);
            let id = resolve_id(&store, &id)?;
            let title = store
                .get(&id)
                .map(|t| t.title.clone())
                .unwrap_or_default();
            if !yes && !confirm(&format!("Remove task '{title}'?"))? {
                eprintln!("Cancelled");
                return Ok(());
            }
            store.delete(&id)?;
            eprintln!("Removed task '{title}'");
        }

        Command::Clear { yes } => {
            let mut store = open_store(&path);
            let count = store.tasks().len();
            if !yes && !confirm(&format!("Remove all {count} task(s)?"))? {
                eprintln!("Cancelled");
                return Ok(());
            }
            store.clear()?;
            eprintln!("Removed {count} task(s)");
        }

        Command::Show { id } => {
            let store = open_store(&path);
            let id = resolve_id(&store, &id)?;
            if let Some(task) = store.get(&id) {
                print!("{}", output::format_task_detail(task));
            }
        }

        Command::List { search, json } => {
            let store = open_store(&path);
            let filter = search.unwrap_or_default();
            let rows = project::project(store.tasks(), &filter);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", output::format_task_list(&rows));
            }
        }

        Command::Ui => {
            let store = open_store(&path);
            tui::run(&path, store)?;
        }
    }

    Ok(())
}
