//! Todolists slice: the user's lists plus client-only filter and delete status.

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, Task, Todolist};
use crate::store::action::{Action, Fulfilled, Lifecycle, Payload, Rejection, ThunkArg};
use crate::store::app_status::RequestStatus;
use crate::store::thunk::Thunk;

pub const FETCH_TODOLISTS: &str = "todolists/fetchTodolists";
pub const ADD_TODOLIST: &str = "todolists/addTodolist";
pub const REMOVE_TODOLIST: &str = "todolists/removeTodolist";
pub const CHANGE_TODOLIST_TITLE: &str = "todolists/changeTodolistTitle";
pub const CHANGE_TODOLIST_FILTER: &str = "todolists/changeTodolistFilter";

/// Which tasks a list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterValue {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterValue {
    pub fn all() -> &'static [FilterValue] {
        &[FilterValue::All, FilterValue::Active, FilterValue::Completed]
    }

    pub fn name(self) -> &'static str {
        match self {
            FilterValue::All => "All",
            FilterValue::Active => "Active",
            FilterValue::Completed => "Completed",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            FilterValue::All => true,
            FilterValue::Active => !task.is_completed(),
            FilterValue::Completed => task.is_completed(),
        }
    }
}

/// A todolist together with its client-side view state
#[derive(Debug, Clone, PartialEq)]
pub struct TodolistDomain {
    pub todolist: Todolist,
    pub filter: FilterValue,
    /// `Loading` while the list itself is being deleted
    pub entity_status: RequestStatus,
}

impl From<Todolist> for TodolistDomain {
    fn from(todolist: Todolist) -> Self {
        Self {
            todolist,
            filter: FilterValue::All,
            entity_status: RequestStatus::Idle,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodolistsState {
    pub lists: Vec<TodolistDomain>,
}

impl TodolistsState {
    pub fn get(&self, todolist_id: &str) -> Option<&TodolistDomain> {
        self.lists.iter().find(|l| l.todolist.id == todolist_id)
    }

    fn get_mut(&mut self, todolist_id: &str) -> Option<&mut TodolistDomain> {
        self.lists.iter_mut().find(|l| l.todolist.id == todolist_id)
    }

    fn set_entity_status(&mut self, meta: &ThunkArg, status: RequestStatus) {
        if let Some(list) = meta.todolist_id().and_then(|id| self.get_mut(id)) {
            list.entity_status = status;
        }
    }

    pub fn reduce(&mut self, action: &Action) {
        if action.is(REMOVE_TODOLIST, Lifecycle::Pending) {
            self.set_entity_status(&action.meta, RequestStatus::Loading);
        } else if action.is(REMOVE_TODOLIST, Lifecycle::Rejected) {
            self.set_entity_status(&action.meta, RequestStatus::Idle);
        }

        match &action.payload {
            Payload::Filter(filter) if action.kind == CHANGE_TODOLIST_FILTER => {
                if let Some(list) = action.meta.todolist_id().and_then(|id| self.get_mut(id)) {
                    list.filter = *filter;
                }
            }
            Payload::Fulfilled(value) => self.apply(value),
            _ => {}
        }
    }

    fn apply(&mut self, value: &Fulfilled) {
        match value {
            Fulfilled::Todolists(lists) => {
                self.lists = lists.iter().cloned().map(TodolistDomain::from).collect();
            }
            Fulfilled::TodolistAdded(todolist) => {
                self.lists.insert(0, TodolistDomain::from(todolist.clone()));
            }
            Fulfilled::TodolistRemoved { todolist_id } => {
                self.lists.retain(|l| &l.todolist.id != todolist_id);
            }
            Fulfilled::TodolistRenamed { todolist_id, title } => {
                if let Some(list) = self.get_mut(todolist_id) {
                    list.todolist.title = title.clone();
                }
            }
            Fulfilled::LoggedOut => self.lists.clear(),
            _ => {}
        }
    }
}

/// Switch the filter of one list
pub fn change_filter(todolist_id: &str, filter: FilterValue) -> Action {
    Action::new(CHANGE_TODOLIST_FILTER, Payload::Filter(filter)).with_meta(ThunkArg::Todolist {
        todolist_id: todolist_id.to_string(),
    })
}

pub fn fetch_todolists(api: &ApiClient) -> Thunk {
    let api = api.clone();
    Thunk::new(FETCH_TODOLISTS, ThunkArg::None, async move {
        api.get_todolists()
            .await
            .map(Fulfilled::Todolists)
            .map_err(Rejection::from)
    })
}

pub fn add_todolist(api: &ApiClient, title: &str) -> Thunk {
    let api = api.clone();
    let title = title.to_string();
    Thunk::new(ADD_TODOLIST, ThunkArg::None, async move {
        api.create_todolist(&title)
            .await
            .map(Fulfilled::TodolistAdded)
            .map_err(Rejection::from)
    })
}

pub fn remove_todolist(api: &ApiClient, todolist_id: &str) -> Thunk {
    let api = api.clone();
    let todolist_id = todolist_id.to_string();
    let arg = ThunkArg::Todolist {
        todolist_id: todolist_id.clone(),
    };
    Thunk::new(REMOVE_TODOLIST, arg, async move {
        match api.delete_todolist(&todolist_id).await {
            Ok(()) => Ok(Fulfilled::TodolistRemoved { todolist_id }),
            Err(e) => Err(Rejection::from(e)),
        }
    })
}

pub fn change_todolist_title(api: &ApiClient, todolist_id: &str, title: &str) -> Thunk {
    let api = api.clone();
    let todolist_id = todolist_id.to_string();
    let title = title.to_string();
    let arg = ThunkArg::Todolist {
        todolist_id: todolist_id.clone(),
    };
    Thunk::new(CHANGE_TODOLIST_TITLE, arg, async move {
        match api.update_todolist_title(&todolist_id, &title).await {
            Ok(()) => Ok(Fulfilled::TodolistRenamed { todolist_id, title }),
            Err(e) => Err(Rejection::from(e)),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    fn todolist(id: &str, title: &str) -> Todolist {
        Todolist {
            id: id.to_string(),
            title: title.to_string(),
            added_date: None,
            order: 0,
        }
    }

    fn meta(id: &str) -> ThunkArg {
        ThunkArg::Todolist {
            todolist_id: id.to_string(),
        }
    }

    fn loaded() -> Store {
        let mut store = Store::default();
        store.dispatch(Action::fulfilled(
            FETCH_TODOLISTS,
            ThunkArg::None,
            Fulfilled::Todolists(vec![todolist("a", "Work"), todolist("b", "Home")]),
        ));
        store
    }

    #[test]
    fn test_fetch_replaces_lists_with_defaults() {
        let store = loaded();
        assert_eq!(store.todolists.lists.len(), 2);
        let first = &store.todolists.lists[0];
        assert_eq!(first.filter, FilterValue::All);
        assert_eq!(first.entity_status, RequestStatus::Idle);
    }

    #[test]
    fn test_added_list_goes_first() {
        let mut store = loaded();
        store.dispatch(Action::fulfilled(
            ADD_TODOLIST,
            ThunkArg::None,
            Fulfilled::TodolistAdded(todolist("c", "Errands")),
        ));
        assert_eq!(store.todolists.lists[0].todolist.id, "c");
        assert_eq!(store.todolists.lists.len(), 3);
    }

    #[test]
    fn test_remove_marks_loading_then_removes() {
        let mut store = loaded();
        store.dispatch(Action::pending(REMOVE_TODOLIST, meta("a")));
        assert_eq!(store.todolists.get("a").unwrap().entity_status, RequestStatus::Loading);
        assert_eq!(store.todolists.get("b").unwrap().entity_status, RequestStatus::Idle);

        store.dispatch(Action::fulfilled(
            REMOVE_TODOLIST,
            meta("a"),
            Fulfilled::TodolistRemoved {
                todolist_id: "a".to_string(),
            },
        ));
        assert!(store.todolists.get("a").is_none());
        assert_eq!(store.todolists.lists.len(), 1);
    }

    #[test]
    fn test_failed_remove_restores_list() {
        let mut store = loaded();
        store.dispatch(Action::pending(REMOVE_TODOLIST, meta("a")));
        store.dispatch(Action::rejected(REMOVE_TODOLIST, meta("a"), Rejection::default()));
        assert_eq!(store.todolists.get("a").unwrap().entity_status, RequestStatus::Idle);
    }

    #[test]
    fn test_rename_and_filter() {
        let mut store = loaded();
        store.dispatch(Action::fulfilled(
            CHANGE_TODOLIST_TITLE,
            meta("b"),
            Fulfilled::TodolistRenamed {
                todolist_id: "b".to_string(),
                title: "House".to_string(),
            },
        ));
        store.dispatch(change_filter("b", FilterValue::Completed));

        let list = store.todolists.get("b").unwrap();
        assert_eq!(list.todolist.title, "House");
        assert_eq!(list.filter, FilterValue::Completed);
        assert_eq!(store.todolists.get("a").unwrap().filter, FilterValue::All);
    }

    #[test]
    fn test_logout_clears_lists() {
        let mut store = loaded();
        store.dispatch(Action::fulfilled("auth/logout", ThunkArg::None, Fulfilled::LoggedOut));
        assert!(store.todolists.lists.is_empty());
    }

    #[test]
    fn test_filter_matches() {
        let mut task = Task {
            id: "t".to_string(),
            todo_list_id: "a".to_string(),
            title: "x".to_string(),
            description: None,
            status: Default::default(),
            priority: Default::default(),
            start_date: None,
            deadline: None,
            order: 0,
            added_date: None,
        };
        assert!(FilterValue::Active.matches(&task));
        assert!(!FilterValue::Completed.matches(&task));

        task.status = crate::api::TaskStatus::Completed;
        assert!(!FilterValue::Active.matches(&task));
        assert!(FilterValue::Completed.matches(&task));
        assert!(FilterValue::All.matches(&task));
    }
}
