//! UI modules for the todolist app
//!
//! Rendering only. Views read the store and the view-local state and start
//! operations through `TodolistApp`.

mod components;
mod header;
mod login;
mod task;
pub mod theme;
mod todolists;

pub use components::render_error_snackbar;
pub use header::render_header;
pub use login::render_login;
pub use todolists::render_todolists;
