//! Application store
//!
//! Holds every slice of state and routes each dispatched action through all
//! slice reducers. The global status tracker runs for every action, which is
//! what lets any operation opt into status tracking by its type name alone.

pub mod action;
pub mod app_status;
pub mod thunk;

use crate::features::auth::AuthState;
use crate::features::tasks::TasksState;
use crate::features::todolists::TodolistsState;

pub use action::Action;
pub use app_status::{AppState, RequestStatus};
pub use thunk::{Settled, Thunk, ThunkQueue};

#[derive(Debug, Default)]
pub struct Store {
    pub app: AppState,
    pub auth: AuthState,
    pub todolists: TodolistsState,
    pub tasks: TasksState,
}

impl Store {
    /// Apply an action to every slice
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = %action.kind, "dispatch");

        self.app.reduce(&action);
        self.auth.reduce(&action);
        self.todolists.reduce(&action);
        self.tasks.reduce(&action);
    }

    /// Whether the most recent lifecycle event left an operation in flight
    pub fn is_loading(&self) -> bool {
        self.app.status.is_loading()
    }
}
