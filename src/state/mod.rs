//! Application state modules
//!
//! State owned by the views rather than the store: form drafts, inline edits
//! and appearance.

mod ui;

pub use ui::{EditTarget, Editing, TitleDraft, UiState};
