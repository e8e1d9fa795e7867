//! Output formatting utilities for CLI

use serde::Serialize;

use crate::api::Task;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print a serializable value as JSON or use custom text formatter
pub fn print_formatted<T, F>(value: &T, format: OutputFormat, text_formatter: F)
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => println!("{}", text_formatter(value)),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a success message (suppressed in quiet mode)
pub fn print_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}

/// Print an error message (never suppressed)
pub fn print_error(message: &str) {
    eprintln!("Error: {}", message);
}

/// One task as a checklist line
pub fn task_line(task: &Task) -> String {
    let mark = if task.is_completed() { "[x]" } else { "[ ]" };
    format!("{} {}  ({})", mark, task.title, task.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{TaskPriority, TaskStatus};

    #[test]
    fn test_task_line() {
        let mut task = Task {
            id: "t1".to_string(),
            todo_list_id: "l1".to_string(),
            title: "Buy milk".to_string(),
            description: None,
            status: TaskStatus::New,
            priority: TaskPriority::Low,
            start_date: None,
            deadline: None,
            order: 0,
            added_date: None,
        };
        assert_eq!(task_line(&task), "[ ] Buy milk  (t1)");

        task.status = TaskStatus::Completed;
        assert_eq!(task_line(&task), "[x] Buy milk  (t1)");
    }
}
