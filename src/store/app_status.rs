//! Global status and error tracker.
//!
//! One record for the whole application: whether something is in flight, the
//! last error worth showing, and whether startup finished. Besides the three
//! explicit setters, every dispatched action passes through [`AppState::track`],
//! which reacts to the lifecycle suffix of its type. Unrelated operations share
//! the same `status`, so the last lifecycle action processed wins.

use serde::Serialize;

use crate::store::action::{Action, FALLBACK_ERROR, Lifecycle, Payload};

pub const SET_STATUS: &str = "app/setAppStatus";
pub const SET_ERROR: &str = "app/setAppError";
pub const SET_INITIALIZED: &str = "app/setAppInitialized";

/// Aggregate request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl RequestStatus {
    pub fn is_loading(self) -> bool {
        self == RequestStatus::Loading
    }
}

pub fn set_status(status: RequestStatus) -> Action {
    Action::new(SET_STATUS, Payload::Status(status))
}

pub fn set_error(error: Option<String>) -> Action {
    Action::new(SET_ERROR, Payload::Error(error))
}

pub fn set_initialized(is_initialized: bool) -> Action {
    Action::new(SET_INITIALIZED, Payload::Initialized(is_initialized))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub status: RequestStatus,
    pub error: Option<String>,
    pub is_initialized: bool,
}

impl AppState {
    pub fn reduce(&mut self, action: &Action) {
        match (action.kind.as_str(), &action.payload) {
            (SET_STATUS, Payload::Status(status)) => self.status = *status,
            (SET_ERROR, Payload::Error(error)) => self.error = error.clone(),
            // Initialization happens once; a later `false` does not undo it.
            (SET_INITIALIZED, Payload::Initialized(flag)) => self.is_initialized |= *flag,
            _ => {}
        }

        self.track(action);
    }

    /// Apply the lifecycle transition implied by an action's type suffix
    fn track(&mut self, action: &Action) {
        match action.lifecycle() {
            Some(Lifecycle::Pending) => {
                self.status = RequestStatus::Loading;
            }
            Some(Lifecycle::Rejected) => {
                if let Some(error) = resolve_error(action) {
                    tracing::warn!("{} failed: {}", action.kind, error);
                    self.error = Some(error);
                }
                self.status = RequestStatus::Failed;
            }
            Some(Lifecycle::Fulfilled) => {
                self.status = RequestStatus::Succeeded;
            }
            None => {}
        }
    }
}

/// Decide the global error for a rejected action, `None` meaning "leave it as is"
fn resolve_error(action: &Action) -> Option<String> {
    let rejection = match &action.payload {
        Payload::Rejected(rejection) => Some(rejection),
        _ => None,
    };

    match rejection.and_then(|r| r.payload.as_ref()) {
        Some(value) if value.show_global_error => Some(
            value
                .data
                .messages
                .first()
                .cloned()
                .unwrap_or_else(|| FALLBACK_ERROR.to_string()),
        ),
        Some(_) => None,
        None => Some(
            rejection
                .and_then(|r| r.message.clone())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR.to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ResponseEnvelope;
    use crate::store::action::{Fulfilled, Rejection, ThunkArg};

    fn rejected(rejection: Rejection) -> Action {
        Action::rejected("tasks/updateTask", ThunkArg::None, rejection)
    }

    fn envelope(messages: &[&str]) -> ResponseEnvelope {
        ResponseEnvelope::failure(messages.iter().map(|m| m.to_string()).collect())
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::default();
        assert_eq!(state.status, RequestStatus::Idle);
        assert!(state.error.is_none());
        assert!(!state.is_initialized);
    }

    #[test]
    fn test_any_pending_suffix_means_loading() {
        for kind in ["tasks/addTask/pending", "whatever/pending", "a/b/c/pending"] {
            let mut state = AppState::default();
            state.reduce(&Action::new(kind, Payload::Error(Some("ignored".into()))));
            assert_eq!(state.status, RequestStatus::Loading, "{}", kind);
            assert!(state.error.is_none());
        }
    }

    #[test]
    fn test_fulfilled_means_succeeded_and_is_idempotent() {
        let mut state = AppState::default();
        let action = Action::fulfilled("todolists/fetchTodolists", ThunkArg::None, Fulfilled::Todolists(vec![]));

        state.reduce(&action);
        assert_eq!(state.status, RequestStatus::Succeeded);
        state.reduce(&action);
        assert_eq!(state.status, RequestStatus::Succeeded);
    }

    #[test]
    fn test_global_rejection_uses_first_message() {
        let mut state = AppState::default();
        state.reduce(&rejected(Rejection::with_value(envelope(&["X", "Y"]), true)));
        assert_eq!(state.status, RequestStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("X"));
    }

    #[test]
    fn test_global_rejection_without_messages_uses_fallback() {
        let mut state = AppState::default();
        state.reduce(&rejected(Rejection::with_value(envelope(&[]), true)));
        assert_eq!(state.error.as_deref(), Some("Some error occurred"));
    }

    #[test]
    fn test_local_rejection_leaves_error_untouched() {
        let mut state = AppState {
            error: Some("previous".to_string()),
            ..Default::default()
        };
        state.reduce(&rejected(Rejection::with_value(envelope(&["local only"]), false)));
        assert_eq!(state.status, RequestStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("previous"));

        let mut state = AppState::default();
        state.reduce(&rejected(Rejection::with_value(envelope(&["local only"]), false)));
        assert!(state.error.is_none());
    }

    #[test]
    fn test_rejection_without_payload_uses_error_message() {
        let mut state = AppState::default();
        state.reduce(&rejected(Rejection::from_error(&"Network Error")));
        assert_eq!(state.error.as_deref(), Some("Network Error"));

        let mut state = AppState::default();
        state.reduce(&rejected(Rejection::default()));
        assert_eq!(state.error.as_deref(), Some("Some error occurred"));

        let mut state = AppState::default();
        state.reduce(&rejected(Rejection {
            payload: None,
            message: Some(String::new()),
        }));
        assert_eq!(state.error.as_deref(), Some("Some error occurred"));
    }

    #[test]
    fn test_rejected_suffix_without_rejection_payload() {
        let mut state = AppState::default();
        state.reduce(&Action::new("custom/thing/rejected", Payload::None));
        assert_eq!(state.status, RequestStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("Some error occurred"));
    }

    #[test]
    fn test_explicit_setters() {
        let mut state = AppState::default();
        state.reduce(&set_status(RequestStatus::Loading));
        assert_eq!(state.status, RequestStatus::Loading);

        state.reduce(&set_error(Some("boom".to_string())));
        assert_eq!(state.error.as_deref(), Some("boom"));
        state.reduce(&set_error(None));
        assert!(state.error.is_none());
    }

    #[test]
    fn test_initialized_never_reverts() {
        let mut state = AppState::default();
        state.reduce(&set_initialized(true));
        state.reduce(&set_initialized(false));
        state.reduce(&Action::pending("auth/logout", ThunkArg::None));
        state.reduce(&rejected(Rejection::default()));
        state.reduce(&set_initialized(true));
        assert!(state.is_initialized);
    }

    #[test]
    fn test_plain_actions_do_not_touch_status() {
        let mut state = AppState {
            status: RequestStatus::Succeeded,
            ..Default::default()
        };
        state.reduce(&Action::new("todolists/changeTodolistFilter", Payload::None));
        assert_eq!(state.status, RequestStatus::Succeeded);
    }
}
