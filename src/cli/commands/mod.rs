//! CLI command implementations

pub mod auth;
pub mod config;
pub mod list;
pub mod task;

use anyhow::Result;

use crate::api::ApiClient;
use crate::config::Config;
use crate::session::Session;
use crate::store::action::{Fulfilled, Rejection};
use crate::store::thunk::{self, Thunk};
use crate::store::Store;

/// Client and store for a single command invocation
pub struct Connection {
    pub api: ApiClient,
    pub store: Store,
}

impl Connection {
    /// Build a client from the saved config and session
    pub fn open() -> Result<Self> {
        let config = Config::load()?;
        let api = ApiClient::new(&config.api)?;
        api.set_token(Session::load()?.token);

        Ok(Self {
            api,
            store: Store::default(),
        })
    }

    /// Run an operation; a rejection becomes an error carrying the message the app would show
    pub async fn run(&mut self, thunk: Thunk) -> Result<Fulfilled> {
        thunk::run(&mut self.store, thunk)
            .await
            .map_err(|rejection| anyhow::anyhow!(failure_message(&self.store, &rejection)))
    }
}

/// Message for a failed operation: the global error when it was set, else the rejection itself
pub fn failure_message(store: &Store, rejection: &Rejection) -> String {
    let global = rejection.payload.as_ref().is_none_or(|p| p.show_global_error);
    match &store.app.error {
        Some(error) if global => error.clone(),
        _ => rejection.describe(),
    }
}
