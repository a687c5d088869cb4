use crate::cli::commands::*;
use crate::cli::output::{format_task_lines, tasks_to_json};
use crate::io::settings_io::resolve_tasks_path;
use crate::io::task_store::{JsonTaskStore, StoreError};
use crate::model::{EntryOutcome, ListMetrics, Settings, TaskList};

/// Errors from one-shot commands
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no task {number} (the list has {len})")]
    NoSuchTask { number: usize, len: usize },
    #[error("task text is blank")]
    BlankText,
    #[error("could not format output: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, settings: &Settings) -> Result<(), CliError> {
    let store = JsonTaskStore::new(resolve_tasks_path(cli.file.as_deref(), settings));
    let Some(command) = cli.command else {
        return Ok(());
    };
    let output = run_command(&store, command, cli.json)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Run one command against `store` and return what should be printed.
pub fn run_command(
    store: &JsonTaskStore,
    command: Commands,
    json: bool,
) -> Result<String, CliError> {
    let mut list = open_list(store)?;
    let summary = match command {
        Commands::List => None,
        Commands::Add(args) => Some(cmd_add(&mut list, &args.text)?),
        Commands::Rm(args) => Some(cmd_rm(&mut list, args.number)?),
        Commands::Mv(args) => Some(cmd_mv(&mut list, args.from, args.to)?),
        Commands::Edit(args) => Some(cmd_edit(&mut list, args.number, &args.text)?),
        Commands::Clear => Some(cmd_clear(&mut list)),
    };
    if summary.is_some() {
        store.write(list.tasks())?;
    }

    if json {
        return Ok(serde_json::to_string_pretty(&tasks_to_json(list.tasks()))?);
    }
    Ok(match summary {
        Some(summary) => summary,
        None => format_task_lines(list.tasks()).join("\n"),
    })
}

/// Load the file into a headless list. Unlike the TUI, a broken file is an
/// error here rather than an empty list.
fn open_list(store: &JsonTaskStore) -> Result<TaskList, CliError> {
    let mut list = TaskList::new(ListMetrics::default());
    list.replace_all(store.read()?);
    Ok(list)
}

/// Convert a 1-based task number to an index.
fn task_index(list: &TaskList, number: usize) -> Result<usize, CliError> {
    let len = list.len();
    if number == 0 || number > len {
        return Err(CliError::NoSuchTask { number, len });
    }
    Ok(number - 1)
}

fn joined_text(words: &[String]) -> Result<String, CliError> {
    let text = words.join(" ");
    let text = text.trim();
    if text.is_empty() {
        return Err(CliError::BlankText);
    }
    Ok(text.to_string())
}

fn cmd_add(list: &mut TaskList, words: &[String]) -> Result<String, CliError> {
    let text = joined_text(words)?;
    let summary = format!("added {}. {}", list.len() + 1, text);
    list.append(text);
    Ok(summary)
}

fn cmd_rm(list: &mut TaskList, number: usize) -> Result<String, CliError> {
    let index = task_index(list, number)?;
    list.select(index);
    let removed = list.remove_selected().unwrap_or_default();
    Ok(format!("removed {}. {}", number, removed))
}

fn cmd_mv(list: &mut TaskList, from: usize, to: usize) -> Result<String, CliError> {
    let from_index = task_index(list, from)?;
    let to_index = task_index(list, to)?;
    list.move_to(from_index, to_index);
    let text = list.get(to_index).unwrap_or_default();
    Ok(format!("moved {} to {}. {}", from, to, text))
}

fn cmd_edit(list: &mut TaskList, number: usize, words: &[String]) -> Result<String, CliError> {
    let index = task_index(list, number)?;
    let text = joined_text(words)?;
    list.select(index);
    let mut entry = |_: &str| EntryOutcome::Confirmed(text.clone());
    list.edit_selected(&mut entry);
    Ok(format!("edited {}. {}", number, text))
}

fn cmd_clear(list: &mut TaskList) -> String {
    let count = list.len();
    list.clear();
    match count {
        1 => "cleared 1 task".to_string(),
        n => format!("cleared {} tasks", n),
    }
}
