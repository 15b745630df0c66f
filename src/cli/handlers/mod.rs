use tracing::info;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::store_io::{DocumentError, DocumentStore};
use crate::model::document::Document;
use crate::model::task::TaskId;
use crate::ops::search;
use crate::ops::store::TaskStore;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cmd: Commands, store: &impl DocumentStore) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        // Read commands
        Commands::List(args) => cmd_list(args, store),
        Commands::Search(args) => cmd_search(args, store),
        Commands::Contexts => cmd_contexts(store),
        Commands::Stats(args) => cmd_stats(args, store),

        // Write commands
        Commands::Add(args) => cmd_add(args, store),
        Commands::Toggle(args) => cmd_toggle(args, store),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the task store. A missing file starts from the seed document; a
/// malformed one is an error so a later save cannot overwrite it.
fn load_store(store: &impl DocumentStore) -> Result<TaskStore, DocumentError> {
    let doc = match store.load() {
        Ok(doc) => doc,
        Err(e) if e.is_missing() => Document::seed(),
        Err(e) => return Err(e),
    };
    Ok(TaskStore::from_document(doc))
}

fn save_store(store: &impl DocumentStore, tasks: &TaskStore) -> Result<(), DocumentError> {
    store.save(&tasks.to_document())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, store: &impl DocumentStore) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = load_store(store)?;
    if let Some(ref name) = args.context
        && !tasks.has_context(name)
    {
        return Err(format!("context not found: {}", name).into());
    }
    let contexts: Vec<&str> = match args.context {
        Some(ref name) => vec![name.as_str()],
        None => tasks.contexts().iter().map(String::as_str).collect(),
    };

    if args.json {
        let results: Vec<TaskJson> = contexts
            .iter()
            .flat_map(|ctx| search::tasks_in_context(tasks.tasks(), ctx))
            .map(task_to_json)
            .collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let mut first = true;
    for ctx in contexts {
        if !first {
            println!();
        }
        first = false;
        println!("{}", ctx);
        for task in search::tasks_in_context(tasks.tasks(), ctx) {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

fn cmd_search(args: SearchArgs, store: &impl DocumentStore) -> Result<(), Box<dyn std::error::Error>> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err("search query is empty".into());
    }
    let tasks = load_store(store)?;
    let hits = search::search_tasks(tasks.tasks(), query);
    if hits.is_empty() {
        return Err(format!("No tasks matching '{}'", query).into());
    }

    if args.json {
        let results: Vec<TaskJson> = hits.into_iter().map(task_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for task in hits {
            println!("[{}] {}", task.context, format_task_line(task));
        }
    }
    Ok(())
}

fn cmd_contexts(store: &impl DocumentStore) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = load_store(store)?;
    let stats = search::completion_stats(
        tasks.tasks(),
        tasks.contexts().iter().map(String::as_str),
    );
    for ctx in &stats.per_context {
        println!("{} ({}/{})", ctx.name, ctx.done, ctx.total);
    }
    Ok(())
}

fn cmd_stats(args: StatsArgs, store: &impl DocumentStore) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = load_store(store)?;
    let stats = search::completion_stats(
        tasks.tasks(),
        tasks.contexts().iter().map(String::as_str),
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats_to_json(&stats))?);
        return Ok(());
    }

    println!("Total Tasks: {}", stats.total);
    println!("Completed: {} ({:.1}%)", stats.done, stats.percent());
    println!();
    println!("Context Statistics:");
    for ctx in &stats.per_context {
        println!(
            "  {}: {}/{} ({:.1}%)",
            ctx.name,
            ctx.done,
            ctx.total,
            ctx.percent()
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, store: &impl DocumentStore) -> Result<(), Box<dyn std::error::Error>> {
    let mut tasks = load_store(store)?;
    let context = match args.context {
        Some(name) => {
            let name = name.trim().to_string();
            if !tasks.has_context(&name) {
                tasks.add_context(&name)?;
            }
            name
        }
        None => tasks.current_context().to_string(),
    };
    let id = tasks.add_task(&args.text, &context)?;
    save_store(store, &tasks)?;
    info!(%id, context = %context, "task added from the command line");
    println!("{}", id);
    Ok(())
}

fn cmd_toggle(args: ToggleArgs, store: &impl DocumentStore) -> Result<(), Box<dyn std::error::Error>> {
    let mut tasks = load_store(store)?;
    let id = TaskId(args.id);
    let checked = tasks.toggle_checked(id)?;
    save_store(store, &tasks)?;
    info!(%id, checked, "task toggled from the command line");
    if let Some(task) = tasks.task(id) {
        println!("{}", format_task_line(task));
    }
    Ok(())
}
