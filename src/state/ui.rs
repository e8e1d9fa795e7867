//! View-local state: form drafts and inline edits

use std::collections::HashMap;

use crate::forms::{LoginForm, validate_title};
use crate::store::thunk::RequestId;
use crate::ui::theme::Theme;

/// Text typed into an "add item" field, with its validation message
#[derive(Debug, Clone, Default)]
pub struct TitleDraft {
    pub text: String,
    pub error: Option<String>,
}

impl TitleDraft {
    /// Validate the draft; on success clear it and return the trimmed title
    pub fn take_valid(&mut self) -> Option<String> {
        match validate_title(&self.text) {
            Ok(title) => {
                self.text.clear();
                self.error = None;
                Some(title)
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }
}

/// What an inline title edit applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Todolist { todolist_id: String },
    Task { todolist_id: String, task_id: String },
}

#[derive(Debug, Clone)]
pub struct Editing {
    pub target: EditTarget,
    pub text: String,
    /// Keyboard focus already moved into the text field
    pub focused: bool,
}

impl Editing {
    pub fn new(target: EditTarget, text: &str) -> Self {
        Self {
            target,
            text: text.to_string(),
            focused: false,
        }
    }
}

/// UI-related state
pub struct UiState {
    /// Current theme
    pub current_theme: Theme,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    pub login_form: LoginForm,
    /// Login request whose outcome the form is waiting for
    pub login_request: Option<RequestId>,
    pub new_todolist: TitleDraft,
    /// "Add task" drafts keyed by todolist id
    pub new_tasks: HashMap<String, TitleDraft>,
    /// Title currently being edited in place
    pub editing: Option<Editing>,
}

impl UiState {
    /// Create a new UiState with the given theme
    pub fn new(theme: Theme) -> Self {
        Self {
            current_theme: theme,
            theme_dirty: true, // Apply theme on first frame
            login_form: LoginForm::default(),
            login_request: None,
            new_todolist: TitleDraft::default(),
            new_tasks: HashMap::new(),
            editing: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_take_valid() {
        let mut draft = TitleDraft {
            text: "  Buy milk ".to_string(),
            error: Some("stale".to_string()),
        };
        assert_eq!(draft.take_valid().as_deref(), Some("Buy milk"));
        assert!(draft.text.is_empty());
        assert!(draft.error.is_none());

        assert!(draft.take_valid().is_none());
        assert_eq!(draft.error.as_deref(), Some("Title is required"));
    }
}
