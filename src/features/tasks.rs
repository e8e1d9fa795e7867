//! Tasks slice: tasks grouped by the todolist they belong to.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::api::{ApiClient, Task, TaskPriority, TaskStatus, UpdateTaskModel};
use crate::features::todolists::FilterValue;
use crate::store::action::{Action, Fulfilled, Payload, Rejection, ThunkArg};
use crate::store::thunk::Thunk;

pub const FETCH_TASKS: &str = "tasks/fetchTasks";
pub const ADD_TASK: &str = "tasks/addTask";
pub const UPDATE_TASK: &str = "tasks/updateTask";
pub const REMOVE_TASK: &str = "tasks/removeTask";

/// Partial task change sent by views; unset fields keep their current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateDomainTaskModel {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub start_date: Option<NaiveDateTime>,
    pub deadline: Option<NaiveDateTime>,
}

impl UpdateDomainTaskModel {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Full update model: `task` with this change applied on top
    pub fn merge_onto(&self, task: &Task) -> UpdateTaskModel {
        UpdateTaskModel {
            title: self.title.clone().unwrap_or_else(|| task.title.clone()),
            description: self.description.clone().or_else(|| task.description.clone()),
            status: self.status.unwrap_or(task.status),
            priority: self.priority.unwrap_or(task.priority),
            start_date: self.start_date.or(task.start_date),
            deadline: self.deadline.or(task.deadline),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TasksState {
    by_list: HashMap<String, Vec<Task>>,
}

impl TasksState {
    /// Tasks of one list, newest first
    pub fn for_list(&self, todolist_id: &str) -> &[Task] {
        self.by_list.get(todolist_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tasks of one list that pass `filter`
    pub fn filtered(&self, todolist_id: &str, filter: FilterValue) -> Vec<&Task> {
        self.for_list(todolist_id)
            .iter()
            .filter(|t| filter.matches(t))
            .collect()
    }

    pub fn find(&self, todolist_id: &str, task_id: &str) -> Option<&Task> {
        self.for_list(todolist_id).iter().find(|t| t.id == task_id)
    }

    /// Whether the tasks of a list have been fetched
    pub fn is_loaded(&self, todolist_id: &str) -> bool {
        self.by_list.contains_key(todolist_id)
    }

    pub fn reduce(&mut self, action: &Action) {
        let Payload::Fulfilled(value) = &action.payload else {
            return;
        };

        match value {
            Fulfilled::Todolists(lists) => {
                self.by_list = lists
                    .iter()
                    .map(|l| (l.id.clone(), Vec::new()))
                    .collect();
            }
            Fulfilled::TodolistAdded(todolist) => {
                self.by_list.insert(todolist.id.clone(), Vec::new());
            }
            Fulfilled::TodolistRemoved { todolist_id } => {
                self.by_list.remove(todolist_id);
            }
            Fulfilled::Tasks { todolist_id, tasks } => {
                self.by_list.insert(todolist_id.clone(), tasks.clone());
            }
            Fulfilled::TaskAdded(task) => {
                self.by_list
                    .entry(task.todo_list_id.clone())
                    .or_default()
                    .insert(0, task.clone());
            }
            Fulfilled::TaskUpdated(task) => {
                if let Some(existing) = self
                    .by_list
                    .get_mut(&task.todo_list_id)
                    .and_then(|tasks| tasks.iter_mut().find(|t| t.id == task.id))
                {
                    *existing = task.clone();
                }
            }
            Fulfilled::TaskRemoved {
                todolist_id,
                task_id,
            } => {
                if let Some(tasks) = self.by_list.get_mut(todolist_id) {
                    tasks.retain(|t| &t.id != task_id);
                }
            }
            Fulfilled::LoggedOut => self.by_list.clear(),
            _ => {}
        }
    }
}

pub fn fetch_tasks(api: &ApiClient, todolist_id: &str) -> Thunk {
    let api = api.clone();
    let todolist_id = todolist_id.to_string();
    let arg = ThunkArg::Todolist {
        todolist_id: todolist_id.clone(),
    };
    Thunk::new(FETCH_TASKS, arg, async move {
        match api.get_tasks(&todolist_id).await {
            Ok(tasks) => Ok(Fulfilled::Tasks { todolist_id, tasks }),
            Err(e) => Err(Rejection::from(e)),
        }
    })
}

pub fn add_task(api: &ApiClient, todolist_id: &str, title: &str) -> Thunk {
    let api = api.clone();
    let todolist_id = todolist_id.to_string();
    let title = title.to_string();
    let arg = ThunkArg::Todolist {
        todolist_id: todolist_id.clone(),
    };
    Thunk::new(ADD_TASK, arg, async move {
        api.create_task(&todolist_id, &title)
            .await
            .map(Fulfilled::TaskAdded)
            .map_err(Rejection::from)
    })
}

/// Apply a partial change to a task
///
/// The backend replaces every mutable field, so the change is merged onto the
/// task as currently held in `tasks`. A task missing from state is rejected
/// without a request.
pub fn update_task(
    api: &ApiClient,
    tasks: &TasksState,
    todolist_id: &str,
    task_id: &str,
    change: UpdateDomainTaskModel,
) -> Thunk {
    let arg = ThunkArg::Task {
        todolist_id: todolist_id.to_string(),
        task_id: task_id.to_string(),
    };

    let Some(task) = tasks.find(todolist_id, task_id) else {
        tracing::warn!("Task {} not found in list {}", task_id, todolist_id);
        return Thunk::rejected(
            UPDATE_TASK,
            arg,
            Rejection::from_error(&"Task not found in the state"),
        );
    };

    let model = change.merge_onto(task);
    let api = api.clone();
    let todolist_id = todolist_id.to_string();
    let task_id = task_id.to_string();
    Thunk::new(UPDATE_TASK, arg, async move {
        api.update_task(&todolist_id, &task_id, &model)
            .await
            .map(Fulfilled::TaskUpdated)
            .map_err(Rejection::from)
    })
}

pub fn remove_task(api: &ApiClient, todolist_id: &str, task_id: &str) -> Thunk {
    let api = api.clone();
    let todolist_id = todolist_id.to_string();
    let task_id = task_id.to_string();
    let arg = ThunkArg::Task {
        todolist_id: todolist_id.clone(),
        task_id: task_id.clone(),
    };
    Thunk::new(REMOVE_TASK, arg, async move {
        match api.delete_task(&todolist_id, &task_id).await {
            Ok(()) => Ok(Fulfilled::TaskRemoved {
                todolist_id,
                task_id,
            }),
            Err(e) => Err(Rejection::from(e)),
        }
    })
}
