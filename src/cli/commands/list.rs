//! Todolist commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::api::Task;
use crate::cli::commands::Connection;
use crate::cli::output::{OutputFormat, print_formatted, print_success, task_line};
use crate::features::{tasks, todolists};
use crate::forms::validate_title;
use crate::store::action::Fulfilled;

#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// Show all todolists
    Show {
        /// Include each list's tasks
        #[arg(long)]
        tasks: bool,
    },

    /// Create a todolist
    Add {
        title: String,
    },

    /// Rename a todolist
    Rename {
        /// Todolist id
        id: String,

        title: String,
    },

    /// Delete a todolist and its tasks
    Delete {
        /// Todolist id
        id: String,
    },
}

#[derive(Serialize)]
struct ListView {
    id: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tasks: Option<Vec<Task>>,
}

pub async fn run(command: ListCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ListCommands::Show { tasks } => show(tasks, format).await,
        ListCommands::Add { title } => add(&title, format, quiet).await,
        ListCommands::Rename { id, title } => rename(&id, &title, quiet).await,
        ListCommands::Delete { id } => delete(&id, quiet).await,
    }
}

async fn show(with_tasks: bool, format: OutputFormat) -> Result<()> {
    let mut conn = Connection::open()?;
    let thunk = todolists::fetch_todolists(&conn.api);
    conn.run(thunk).await?;

    if with_tasks {
        let ids: Vec<String> = conn
            .store
            .todolists
            .lists
            .iter()
            .map(|l| l.todolist.id.clone())
            .collect();
        for id in ids {
            let thunk = tasks::fetch_tasks(&conn.api, &id);
            conn.run(thunk).await?;
        }
    }

    let views: Vec<ListView> = conn
        .store
        .todolists
        .lists
        .iter()
        .map(|l| ListView {
            id: l.todolist.id.clone(),
            title: l.todolist.title.clone(),
            tasks: with_tasks.then(|| conn.store.tasks.for_list(&l.todolist.id).to_vec()),
        })
        .collect();

    print_formatted(&views, format, |views| {
        if views.is_empty() {
            return "No todolists".to_string();
        }
        let mut lines = Vec::new();
        for view in views {
            lines.push(format!("{}  ({})", view.title, view.id));
            for task in view.tasks.iter().flatten() {
                lines.push(format!("  {}", task_line(task)));
            }
        }
        lines.join("\n")
    });

    Ok(())
}

async fn add(title: &str, format: OutputFormat, quiet: bool) -> Result<()> {
    let title = validate_title(title).map_err(anyhow::Error::msg)?;
    let mut conn = Connection::open()?;
    let thunk = todolists::add_todolist(&conn.api, &title);

    if let Fulfilled::TodolistAdded(list) = conn.run(thunk).await? {
        match format {
            OutputFormat::Json => print_formatted(&list, format, |_| String::new()),
            OutputFormat::Text => print_success(&format!("Created list {} ({})", list.title, list.id), quiet),
        }
    }
    Ok(())
}

async fn rename(id: &str, title: &str, quiet: bool) -> Result<()> {
    let title = validate_title(title).map_err(anyhow::Error::msg)?;
    let mut conn = Connection::open()?;
    let thunk = todolists::change_todolist_title(&conn.api, id, &title);
    conn.run(thunk).await?;

    print_success(&format!("Renamed list {} to {}", id, title), quiet);
    Ok(())
}

async fn delete(id: &str, quiet: bool) -> Result<()> {
    let mut conn = Connection::open()?;
    let thunk = todolists::remove_todolist(&conn.api, id);
    conn.run(thunk).await?;

    print_success(&format!("Deleted list {}", id), quiet);
    Ok(())
}
