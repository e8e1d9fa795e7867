//! Actions dispatched through the store.
//!
//! Every action has a type string. Thunk lifecycle actions are named
//! `<prefix>/pending`, `<prefix>/fulfilled` and `<prefix>/rejected`; the
//! status tracker recognizes them by that suffix alone, so any operation
//! takes part in global status tracking just by following the naming.

use crate::api::{ApiError, FieldError, LoginData, MeData, ResponseEnvelope, Task, Todolist};
use crate::features::todolists::FilterValue;
use crate::store::app_status::RequestStatus;

/// Error text used when a failure carries no usable message
pub const FALLBACK_ERROR: &str = "Some error occurred";

/// Lifecycle stage of an asynchronous operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Pending,
    Fulfilled,
    Rejected,
}

impl Lifecycle {
    /// Suffix marker used in action types
    pub fn suffix(self) -> &'static str {
        match self {
            Lifecycle::Pending => "pending",
            Lifecycle::Fulfilled => "fulfilled",
            Lifecycle::Rejected => "rejected",
        }
    }

    /// Recognize the lifecycle stage from an action type's last segment
    pub fn of(action_type: &str) -> Option<Self> {
        let (_, marker) = action_type.rsplit_once('/')?;
        match marker {
            "pending" => Some(Lifecycle::Pending),
            "fulfilled" => Some(Lifecycle::Fulfilled),
            "rejected" => Some(Lifecycle::Rejected),
            _ => None,
        }
    }

    /// Full action type for an operation prefix
    pub fn action_type(self, prefix: &str) -> String {
        format!("{}/{}", prefix, self.suffix())
    }
}

/// Argument an operation was started with, attached to all its lifecycle actions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ThunkArg {
    #[default]
    None,
    Todolist {
        todolist_id: String,
    },
    Task {
        todolist_id: String,
        task_id: String,
    },
}

impl ThunkArg {
    pub fn todolist_id(&self) -> Option<&str> {
        match self {
            ThunkArg::None => None,
            ThunkArg::Todolist { todolist_id } | ThunkArg::Task { todolist_id, .. } => {
                Some(todolist_id)
            }
        }
    }
}

/// Domain result of a successful operation
#[derive(Debug, Clone, PartialEq)]
pub enum Fulfilled {
    Me(MeData),
    LoggedIn(LoginData),
    LoggedOut,
    Todolists(Vec<Todolist>),
    TodolistAdded(Todolist),
    TodolistRemoved { todolist_id: String },
    TodolistRenamed { todolist_id: String, title: String },
    Tasks { todolist_id: String, tasks: Vec<Task> },
    TaskAdded(Task),
    TaskUpdated(Task),
    TaskRemoved { todolist_id: String, task_id: String },
}

/// Structured failure payload produced by an operation
#[derive(Debug, Clone, PartialEq)]
pub struct RejectValue {
    pub data: ResponseEnvelope,
    /// Whether the failure should replace the global error message
    pub show_global_error: bool,
}

/// Why an operation failed
///
/// `payload` is set when the operation packaged the failure itself; otherwise
/// only the underlying error's `message` is known.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rejection {
    pub payload: Option<RejectValue>,
    pub message: Option<String>,
}

impl Rejection {
    /// Rejection carrying a structured payload
    pub fn with_value(data: ResponseEnvelope, show_global_error: bool) -> Self {
        Self {
            payload: Some(RejectValue {
                data,
                show_global_error,
            }),
            message: None,
        }
    }

    /// Rejection from an unexpected failure with no structured payload
    pub fn from_error(error: &impl std::fmt::Display) -> Self {
        Self {
            payload: None,
            message: Some(error.to_string()),
        }
    }

    /// Normalize an API error; domain failures keep their envelope
    pub fn from_api(error: ApiError, show_global_error: bool) -> Self {
        match error {
            ApiError::Domain(envelope) => Self::with_value(envelope, show_global_error),
            other => Self::from_error(&other),
        }
    }

    /// Field-level errors reported by the backend, if any
    pub fn fields_errors(&self) -> &[FieldError] {
        self.payload
            .as_ref()
            .map(|p| p.data.fields_errors.as_slice())
            .unwrap_or(&[])
    }

    /// Best human-readable description of the failure
    pub fn describe(&self) -> String {
        if let Some(payload) = &self.payload {
            if let Some(first) = payload.data.messages.first() {
                return first.clone();
            }
            if let Some(field) = payload.data.fields_errors.first() {
                return format!("{}: {}", field.field, field.error);
            }
        }
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_ERROR.to_string())
    }
}

impl From<ApiError> for Rejection {
    fn from(error: ApiError) -> Self {
        Self::from_api(error, true)
    }
}

/// Action payloads
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    None,
    Status(RequestStatus),
    Error(Option<String>),
    Initialized(bool),
    Filter(FilterValue),
    Fulfilled(Fulfilled),
    Rejected(Rejection),
}

/// A dispatched action
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Type identifier, e.g. `tasks/updateTask/pending`
    pub kind: String,
    pub meta: ThunkArg,
    pub payload: Payload,
}

impl Action {
    pub fn new(kind: impl Into<String>, payload: Payload) -> Self {
        Self {
            kind: kind.into(),
            meta: ThunkArg::None,
            payload,
        }
    }

    pub fn with_meta(mut self, meta: ThunkArg) -> Self {
        self.meta = meta;
        self
    }

    pub fn pending(prefix: &str, meta: ThunkArg) -> Self {
        Self::new(Lifecycle::Pending.action_type(prefix), Payload::None).with_meta(meta)
    }

    pub fn fulfilled(prefix: &str, meta: ThunkArg, value: Fulfilled) -> Self {
        Self::new(
            Lifecycle::Fulfilled.action_type(prefix),
            Payload::Fulfilled(value),
        )
        .with_meta(meta)
    }

    pub fn rejected(prefix: &str, meta: ThunkArg, rejection: Rejection) -> Self {
        Self::new(
            Lifecycle::Rejected.action_type(prefix),
            Payload::Rejected(rejection),
        )
        .with_meta(meta)
    }

    /// Lifecycle stage encoded in the type suffix, if any
    pub fn lifecycle(&self) -> Option<Lifecycle> {
        Lifecycle::of(&self.kind)
    }

    /// Whether this is the given lifecycle stage of the given operation
    pub fn is(&self, prefix: &str, lifecycle: Lifecycle) -> bool {
        self.kind
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .is_some_and(|marker| marker == lifecycle.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_from_suffix() {
        assert_eq!(Lifecycle::of("tasks/addTask/pending"), Some(Lifecycle::Pending));
        assert_eq!(Lifecycle::of("auth/login/fulfilled"), Some(Lifecycle::Fulfilled));
        assert_eq!(Lifecycle::of("x/rejected"), Some(Lifecycle::Rejected));
        assert_eq!(Lifecycle::of("app/setAppStatus"), None);
        assert_eq!(Lifecycle::of("pending"), None);
        assert_eq!(Lifecycle::of("tasks/unpending"), None);
    }

    #[test]
    fn test_action_is_matches_exact_operation() {
        let action = Action::pending("todolists/removeTodolist", ThunkArg::None);
        assert!(action.is("todolists/removeTodolist", Lifecycle::Pending));
        assert!(!action.is("todolists/removeTodolist", Lifecycle::Rejected));
        assert!(!action.is("todolists/remove", Lifecycle::Pending));
    }

    #[test]
    fn test_rejection_from_api_keeps_envelope() {
        let envelope = ResponseEnvelope::failure(vec!["Title too long".to_string()]);
        let rejection = Rejection::from_api(ApiError::Domain(envelope.clone()), false);
        let payload = rejection.payload.unwrap();
        assert_eq!(payload.data, envelope);
        assert!(!payload.show_global_error);
    }

    #[test]
    fn test_rejection_from_transport_has_message_only() {
        let rejection: Rejection = ApiError::Status(reqwest::StatusCode::BAD_GATEWAY).into();
        assert!(rejection.payload.is_none());
        assert_eq!(
            rejection.message.as_deref(),
            Some("Request failed with status code 502")
        );
    }

    #[test]
    fn test_describe_prefers_messages() {
        let mut envelope = ResponseEnvelope::failure(vec![]);
        envelope.fields_errors.push(FieldError {
            field: "email".to_string(),
            error: "Invalid".to_string(),
        });
        assert_eq!(Rejection::with_value(envelope, false).describe(), "email: Invalid");
        assert_eq!(Rejection::default().describe(), FALLBACK_ERROR);
    }
}
