use eframe::egui;

use crate::api::ApiClient;
use crate::config::Config;
use crate::features::tasks::UpdateDomainTaskModel;
use crate::features::{auth, tasks, todolists};
use crate::session::Session;
use crate::state::UiState;
use crate::store::action::Fulfilled;
use crate::store::thunk::RequestId;
use crate::store::{Action, Settled, Store, Thunk, ThunkQueue};
use crate::ui;
use crate::ui::theme::ThemePreset;

/// Main application state
pub struct TodolistApp {
    /// Application configuration
    pub config: Config,
    /// Backend client
    pub api: ApiClient,
    /// Domain state and global status
    pub store: Store,
    /// Operations waiting to settle
    pub thunks: ThunkQueue,
    /// View-local state
    pub ui: UiState,
}

impl TodolistApp {
    /// Create the application and start the session check
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, api: ApiClient) -> Self {
        let mut app = Self::with_client(config, api);
        app.spawn(auth::initialize_app(&app.api));
        app
    }

    /// Create the application without starting any request
    pub fn with_client(config: Config, api: ApiClient) -> Self {
        let theme = config.ui.theme.theme();
        Self {
            config,
            api,
            store: Store::default(),
            thunks: ThunkQueue::default(),
            ui: UiState::new(theme),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        self.store.dispatch(action);
    }

    /// Start an operation in the background
    pub fn spawn(&mut self, thunk: Thunk) -> RequestId {
        self.thunks.spawn(&mut self.store, thunk)
    }

    /// Start a partial task update against the task as currently stored
    pub fn update_task(&mut self, todolist_id: &str, task_id: &str, change: UpdateDomainTaskModel) {
        let thunk = tasks::update_task(&self.api, &self.store.tasks, todolist_id, task_id, change);
        self.spawn(thunk);
    }

    pub fn logout(&mut self) {
        self.spawn(auth::logout(&self.api));
    }

    pub fn set_theme(&mut self, preset: ThemePreset) {
        self.config.ui.theme = preset;
        self.ui.current_theme = preset.theme();
        self.ui.theme_dirty = true;
        self.save_config();
    }

    /// Save configuration to disk
    pub fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }

    fn fetch_todolists(&mut self) {
        self.spawn(todolists::fetch_todolists(&self.api));
    }

    /// React to a finished operation beyond what the reducers already did
    pub(crate) fn handle_settled(&mut self, settled: Settled) {
        match (settled.type_prefix, &settled.outcome) {
            (auth::INITIALIZE_APP, Ok(_)) => self.fetch_todolists(),
            (auth::LOGIN, outcome) => {
                if self.ui.login_request != Some(settled.id) {
                    return;
                }
                self.ui.login_request = None;

                match outcome {
                    Ok(Fulfilled::LoggedIn(data)) => {
                        if self.ui.login_form.values.remember_me {
                            let session = Session {
                                token: data.token.clone(),
                                user_id: Some(data.user_id),
                            };
                            if let Err(e) = session.save() {
                                tracing::warn!("Failed to save session: {}", e);
                            }
                        }
                        self.ui.login_form.reset();
                        self.spawn(auth::fetch_me(&self.api));
                        self.fetch_todolists();
                    }
                    Ok(_) => {}
                    Err(rejection) => {
                        self.ui
                            .login_form
                            .apply_field_errors(rejection.fields_errors());
                    }
                }
            }
            (auth::LOGOUT, Ok(_)) => {
                self.ui.editing = None;
                self.ui.new_tasks.clear();
                if let Err(e) = Session::clear() {
                    tracing::warn!("Failed to clear session: {}", e);
                }
            }
            (todolists::FETCH_TODOLISTS, Ok(Fulfilled::Todolists(lists))) => {
                for list in lists {
                    self.spawn(tasks::fetch_tasks(&self.api, &list.id));
                }
            }
            _ => {}
        }
    }
}

impl eframe::App for TodolistApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        // Poll async operations
        for settled in self.thunks.poll(&mut self.store) {
            self.handle_settled(settled);
        }
        if self.thunks.in_flight() > 0 {
            ctx.request_repaint();
        }

        ui::render_header(self, ctx);
        ui::render_error_snackbar(self, ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.store.app.is_initialized {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                return;
            }

            if self.store.auth.is_logged_in {
                ui::render_todolists(self, ui);
            } else {
                ui::render_login(self, ui);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FieldError, LoginData, ResponseEnvelope};
    use crate::config::ApiConfig;
    use crate::forms::PASSWORD;
    use crate::store::action::{Rejection, ThunkArg};

    fn app() -> TodolistApp {
        let config = Config::default();
        let api = ApiClient::new(&config.api).unwrap();
        TodolistApp::with_client(config, api)
    }

    fn rejected_login(id: RequestId) -> Settled {
        let mut envelope = ResponseEnvelope::failure(vec![]);
        envelope.fields_errors.push(FieldError {
            field: PASSWORD.to_string(),
            error: "Wrong password".to_string(),
        });
        Settled {
            id,
            type_prefix: auth::LOGIN,
            arg: ThunkArg::None,
            outcome: Err(Rejection::with_value(envelope, false)),
        }
    }

    #[test]
    fn test_login_field_errors_reach_the_form() {
        let mut app = app();
        app.ui.login_request = Some(3);

        app.handle_settled(rejected_login(3));

        assert!(app.ui.login_request.is_none());
        assert_eq!(app.ui.login_form.error(PASSWORD), Some("Wrong password"));
    }

    #[tokio::test]
    async fn test_fresh_login_loads_user_and_lists() {
        let config = Config {
            api: ApiConfig {
                base_url: "http://127.0.0.1:1/".to_string(),
                api_key: None,
            },
            ..Config::default()
        };
        let api = ApiClient::new(&config.api).unwrap();
        let mut app = TodolistApp::with_client(config, api);
        app.ui.login_request = Some(1);

        app.handle_settled(Settled {
            id: 1,
            type_prefix: auth::LOGIN,
            arg: ThunkArg::None,
            outcome: Ok(Fulfilled::LoggedIn(LoginData {
                user_id: 7,
                token: None,
            })),
        });

        // `auth/me` for the header and the list fetch
        assert_eq!(app.thunks.in_flight(), 2);
        assert!(app.ui.login_request.is_none());
    }

    #[test]
    fn test_stale_login_outcome_is_ignored() {
        let mut app = app();
        app.ui.login_request = Some(4);

        app.handle_settled(rejected_login(3));

        assert_eq!(app.ui.login_request, Some(4));
        assert!(app.ui.login_form.error(PASSWORD).is_none());
    }
}
