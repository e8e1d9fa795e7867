//! Authentication slice: session state and the login/logout/startup operations.

use crate::api::{ApiClient, ApiError, LoginParams, MeData, ResponseEnvelope};
use crate::store::action::{Action, Fulfilled, Payload, Rejection, ThunkArg};
use crate::store::app_status::set_initialized;
use crate::store::thunk::Thunk;

pub const INITIALIZE_APP: &str = "app/initializeApp";
pub const LOGIN: &str = "auth/login";
pub const LOGOUT: &str = "auth/logout";
pub const ME: &str = "auth/me";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub is_logged_in: bool,
    /// Known once `auth/me` succeeded
    pub user: Option<MeData>,
}

impl AuthState {
    pub fn reduce(&mut self, action: &Action) {
        let Payload::Fulfilled(value) = &action.payload else {
            return;
        };

        match value {
            Fulfilled::Me(user) => {
                self.is_logged_in = true;
                self.user = Some(user.clone());
            }
            Fulfilled::LoggedIn(_) => {
                self.is_logged_in = true;
            }
            Fulfilled::LoggedOut => {
                self.is_logged_in = false;
                self.user = None;
            }
            _ => {}
        }
    }
}

/// Check the existing session once at startup, then mark the app initialized
///
/// "Not authorized" is the normal answer for a fresh start, so a rejection
/// never reaches the global error.
pub fn initialize_app(api: &ApiClient) -> Thunk {
    let api = api.clone();
    Thunk::new(INITIALIZE_APP, ThunkArg::None, async move {
        api.me().await.map(Fulfilled::Me).map_err(quiet_rejection)
    })
    .finally(set_initialized(true))
}

/// Load the current user after a login so the header can show who is signed in
pub fn fetch_me(api: &ApiClient) -> Thunk {
    let api = api.clone();
    Thunk::new(ME, ThunkArg::None, async move {
        api.me().await.map(Fulfilled::Me).map_err(quiet_rejection)
    })
}

/// Package any failure with `show_global_error` off, transport errors included
fn quiet_rejection(error: ApiError) -> Rejection {
    match error {
        ApiError::Domain(envelope) => Rejection::with_value(envelope, false),
        other => {
            tracing::debug!("auth/me failed: {}", other);
            Rejection::with_value(ResponseEnvelope::failure(vec![other.to_string()]), false)
        }
    }
}

/// Log in with the given credentials
///
/// When the backend reports field errors they belong to the form, so the
/// global error is only used for failures without them.
pub fn login(api: &ApiClient, params: LoginParams) -> Thunk {
    let api = api.clone();
    Thunk::new(LOGIN, ThunkArg::None, async move {
        match api.login(&params).await {
            Ok(data) => {
                tracing::info!("Logged in as user {}", data.user_id);
                Ok(Fulfilled::LoggedIn(data))
            }
            Err(ApiError::Domain(envelope)) => {
                let show_global_error = envelope.fields_errors.is_empty();
                Err(Rejection::with_value(envelope, show_global_error))
            }
            Err(e) => Err(Rejection::from(e)),
        }
    })
}

pub fn logout(api: &ApiClient) -> Thunk {
    let api = api.clone();
    Thunk::new(LOGOUT, ThunkArg::None, async move {
        match api.logout().await {
            Ok(()) => {
                tracing::info!("Logged out");
                Ok(Fulfilled::LoggedOut)
            }
            Err(e) => Err(Rejection::from(e)),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::LoginData;
    use crate::config::ApiConfig;
    use crate::store::thunk;
    use crate::store::{RequestStatus, Store};

    fn me() -> MeData {
        MeData {
            id: 7,
            email: "free@samuraijs.com".to_string(),
            login: "free".to_string(),
        }
    }

    #[test]
    fn test_me_logs_in_and_stores_user() {
        let mut store = Store::default();
        store.dispatch(Action::fulfilled(INITIALIZE_APP, ThunkArg::None, Fulfilled::Me(me())));
        assert!(store.auth.is_logged_in);
        assert_eq!(store.auth.user, Some(me()));
    }

    #[test]
    fn test_login_then_logout() {
        let mut store = Store::default();
        store.dispatch(Action::fulfilled(
            LOGIN,
            ThunkArg::None,
            Fulfilled::LoggedIn(LoginData {
                user_id: 7,
                token: None,
            }),
        ));
        assert!(store.auth.is_logged_in);

        store.dispatch(Action::fulfilled(LOGOUT, ThunkArg::None, Fulfilled::LoggedOut));
        assert_eq!(store.auth, AuthState::default());
    }

    #[tokio::test]
    async fn test_unreachable_backend_does_not_raise_global_error() {
        let api = ApiClient::new(&ApiConfig {
            base_url: "http://127.0.0.1:1/".to_string(),
            api_key: None,
        })
        .unwrap();
        let mut store = Store::default();

        let outcome = thunk::run(&mut store, initialize_app(&api)).await;

        let rejection = outcome.unwrap_err();
        assert!(!rejection.describe().is_empty());
        assert_eq!(store.app.status, RequestStatus::Failed);
        assert!(store.app.error.is_none());
        assert!(store.app.is_initialized);
        assert!(!store.auth.is_logged_in);
    }

    #[test]
    fn test_me_after_login_fills_user() {
        let mut store = Store::default();
        store.dispatch(Action::fulfilled(
            LOGIN,
            ThunkArg::None,
            Fulfilled::LoggedIn(LoginData {
                user_id: 7,
                token: None,
            }),
        ));
        assert!(store.auth.user.is_none());

        store.dispatch(Action::fulfilled(ME, ThunkArg::None, Fulfilled::Me(me())));
        assert_eq!(store.auth.user, Some(me()));
    }

    #[test]
    fn test_rejected_login_keeps_logged_out() {
        let mut store = Store::default();
        store.dispatch(Action::rejected(LOGIN, ThunkArg::None, Rejection::default()));
        assert!(!store.auth.is_logged_in);
    }
}
