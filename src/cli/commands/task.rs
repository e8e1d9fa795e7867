//! Task commands

use anyhow::Result;
use clap::{Subcommand, ValueEnum};

use crate::api::{Task, TaskStatus};
use crate::cli::commands::Connection;
use crate::cli::output::{OutputFormat, print_formatted, print_success, task_line};
use crate::features::tasks::{self, UpdateDomainTaskModel};
use crate::features::todolists::FilterValue;
use crate::forms::validate_title;
use crate::store::action::Fulfilled;

/// Which tasks to show
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FilterArg {
    All,
    Active,
    Completed,
}

impl From<FilterArg> for FilterValue {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => FilterValue::All,
            FilterArg::Active => FilterValue::Active,
            FilterArg::Completed => FilterValue::Completed,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Show the tasks of a todolist
    Show {
        /// Todolist id
        list: String,

        /// Only show active or completed tasks
        #[arg(long, value_enum)]
        filter: Option<FilterArg>,
    },

    /// Add a task to a todolist
    Add {
        /// Todolist id
        list: String,

        title: String,
    },

    /// Rename a task
    Rename {
        /// Todolist id
        list: String,

        /// Task id
        id: String,

        title: String,
    },

    /// Mark a task completed
    Done {
        /// Todolist id
        list: String,

        /// Task id
        id: String,
    },

    /// Mark a task not completed
    Undo {
        /// Todolist id
        list: String,

        /// Task id
        id: String,
    },

    /// Delete a task
    Delete {
        /// Todolist id
        list: String,

        /// Task id
        id: String,
    },
}

pub async fn run(command: TaskCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        TaskCommands::Show { list, filter } => {
            let filter = filter.map(FilterValue::from).unwrap_or_default();
            show(&list, filter, format).await
        }
        TaskCommands::Add { list, title } => add(&list, &title, format, quiet).await,
        TaskCommands::Rename { list, id, title } => {
            let title = validate_title(&title).map_err(anyhow::Error::msg)?;
            update(&list, &id, UpdateDomainTaskModel::title(title), format, quiet).await
        }
        TaskCommands::Done { list, id } => {
            let change = UpdateDomainTaskModel::status(TaskStatus::Completed);
            update(&list, &id, change, format, quiet).await
        }
        TaskCommands::Undo { list, id } => {
            let change = UpdateDomainTaskModel::status(TaskStatus::New);
            update(&list, &id, change, format, quiet).await
        }
        TaskCommands::Delete { list, id } => delete(&list, &id, quiet).await,
    }
}

/// Load a list's tasks into the store
async fn connect_with_tasks(list: &str) -> Result<Connection> {
    let mut conn = Connection::open()?;
    let thunk = tasks::fetch_tasks(&conn.api, list);
    conn.run(thunk).await?;
    Ok(conn)
}

async fn show(list: &str, filter: FilterValue, format: OutputFormat) -> Result<()> {
    let conn = connect_with_tasks(list).await?;
    let visible: Vec<Task> = conn
        .store
        .tasks
        .filtered(list, filter)
        .into_iter()
        .cloned()
        .collect();

    print_formatted(&visible, format, |tasks| {
        if tasks.is_empty() {
            return "No tasks".to_string();
        }
        tasks.iter().map(task_line).collect::<Vec<_>>().join("\n")
    });
    Ok(())
}

fn print_task(task: &Task, format: OutputFormat, quiet: bool) {
    match format {
        OutputFormat::Json => print_formatted(task, format, |_| String::new()),
        OutputFormat::Text => print_success(&task_line(task), quiet),
    }
}

async fn add(list: &str, title: &str, format: OutputFormat, quiet: bool) -> Result<()> {
    let title = validate_title(title).map_err(anyhow::Error::msg)?;
    let mut conn = Connection::open()?;
    let thunk = tasks::add_task(&conn.api, list, &title);

    if let Fulfilled::TaskAdded(task) = conn.run(thunk).await? {
        print_task(&task, format, quiet);
    }
    Ok(())
}

async fn update(
    list: &str,
    id: &str,
    change: UpdateDomainTaskModel,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    // The update is merged onto the stored task, so the list has to be loaded first
    let mut conn = connect_with_tasks(list).await?;
    let thunk = tasks::update_task(&conn.api, &conn.store.tasks, list, id, change);

    if let Fulfilled::TaskUpdated(task) = conn.run(thunk).await? {
        print_task(&task, format, quiet);
    }
    Ok(())
}

async fn delete(list: &str, id: &str, quiet: bool) -> Result<()> {
    let mut conn = Connection::open()?;
    let thunk = tasks::remove_task(&conn.api, list, id);
    conn.run(thunk).await?;

    print_success(&format!("Deleted task {}", id), quiet);
    Ok(())
}
