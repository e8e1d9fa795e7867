//! REST API client for the todolist backend.
//!
//! This module provides:
//!
//! - `ApiClient`: HTTP client wrapper carrying the API key, the cookie session
//!   and (when known) a bearer token
//! - `Todolist`, `Task` and the request models the backend accepts
//! - `ResponseEnvelope`: the `{resultCode, data, messages, fieldsErrors}` wrapper
//!   every mutating endpoint answers with
//!
//! A non-zero `resultCode` is a failure even when the HTTP status is 200; it is
//! surfaced as `ApiError::Domain` with the whole envelope so callers can route
//! `messages` and `fieldsErrors` themselves.

use std::sync::{Arc, RwLock};

use chrono::NaiveDateTime;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ApiConfig;

/// Default backend base URL
pub const DEFAULT_BASE_URL: &str = "https://social-network.samuraijs.com/api/1.1/";

/// Where new users register an account
pub const REGISTER_URL: &str = "https://social-network.samuraijs.com/";

/// User agent for API requests
const USER_AGENT: &str = concat!("Todolist/", env!("CARGO_PKG_VERSION"));

/// Errors returned by `ApiClient`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with status code {}", .0.as_u16())]
    Status(StatusCode),

    #[error("{}", .0.messages.first().map(String::as_str).unwrap_or("Request was rejected by the server"))]
    Domain(ResponseEnvelope),

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A single field-level validation error reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

/// Response wrapper used by every mutating endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub result_code: i32,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub fields_errors: Vec<FieldError>,
}

impl ResponseEnvelope {
    /// Build a failed envelope carrying the given messages
    pub fn failure(messages: Vec<String>) -> Self {
        Self {
            result_code: 1,
            messages,
            ..Default::default()
        }
    }

    /// Whether the backend accepted the request
    pub fn is_ok(&self) -> bool {
        self.result_code == 0
    }

    /// Extract `data` when the request succeeded, or return the envelope as a domain error
    pub fn into_data<D: DeserializeOwned>(self) -> Result<D, ApiError> {
        if !self.is_ok() {
            return Err(ApiError::Domain(self));
        }
        Ok(serde_json::from_value(self.data)?)
    }
}

/// Task completion status, serialized as the integer the backend uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskStatus {
    #[default]
    New = 0,
    InProgress = 1,
    Completed = 2,
    Draft = 3,
}

impl TryFrom<u8> for TaskStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::New),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Completed),
            3 => Ok(Self::Draft),
            other => Err(format!("unknown task status {}", other)),
        }
    }
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> Self {
        status as u8
    }
}

/// Task priority, serialized as the integer the backend uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskPriority {
    #[default]
    Low = 0,
    Middle = 1,
    Hi = 2,
    Urgently = 3,
    Later = 4,
}

impl TryFrom<u8> for TaskPriority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Middle),
            2 => Ok(Self::Hi),
            3 => Ok(Self::Urgently),
            4 => Ok(Self::Later),
            other => Err(format!("unknown task priority {}", other)),
        }
    }
}

impl From<TaskPriority> for u8 {
    fn from(priority: TaskPriority) -> Self {
        priority as u8
    }
}

/// A named task list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todolist {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub added_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub order: i64,
}

/// A task inside a todolist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub todo_list_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub deadline: Option<NaiveDateTime>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub added_date: Option<NaiveDateTime>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Full set of mutable task fields; the update endpoint replaces all of them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskModel {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub start_date: Option<NaiveDateTime>,
    pub deadline: Option<NaiveDateTime>,
}

/// Credentials sent to `auth/login`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginParams {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha: Option<String>,
}

/// Data returned by a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user_id: i64,
    #[serde(default)]
    pub token: Option<String>,
}

/// The authenticated user, as returned by `auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeData {
    pub id: i64,
    pub email: String,
    pub login: String,
}

#[derive(Debug, Deserialize)]
struct ItemData<T> {
    item: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TasksPage {
    items: Vec<Task>,
    #[serde(default)]
    error: Option<String>,
}

/// Todolist backend client
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new client from the API section of the configuration
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()?;

        let mut base_url = config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Current session token, if one is known
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    /// Replace the session token shared by every clone of this client
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = match &self.api_key {
            Some(key) => request.header("API-KEY", key),
            None => request,
        };
        match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and decode the JSON body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!("API request failed with status {}", status);
            return Err(ApiError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Send a request answered by a `ResponseEnvelope` and unwrap its data
    async fn call<D: DeserializeOwned>(&self, request: RequestBuilder) -> Result<D, ApiError> {
        let envelope: ResponseEnvelope = self.send(request).await?;
        if !envelope.is_ok() {
            tracing::debug!(
                "Backend rejected request (resultCode {}): {:?}",
                envelope.result_code,
                envelope.messages
            );
        }
        envelope.into_data()
    }

    /// Check the current session
    pub async fn me(&self) -> Result<MeData, ApiError> {
        tracing::debug!("GET auth/me");
        self.call(self.client.get(self.url("auth/me"))).await
    }

    /// Log in and remember the returned token
    pub async fn login(&self, params: &LoginParams) -> Result<LoginData, ApiError> {
        tracing::debug!("POST auth/login for {}", params.email);
        let data: LoginData = self
            .call(self.client.post(self.url("auth/login")).json(params))
            .await?;
        if data.token.is_some() {
            self.set_token(data.token.clone());
        }
        Ok(data)
    }

    /// End the session
    pub async fn logout(&self) -> Result<(), ApiError> {
        tracing::debug!("DELETE auth/login");
        let _: IgnoredAny = self.call(self.client.delete(self.url("auth/login"))).await?;
        self.set_token(None);
        Ok(())
    }

    /// Fetch all todolists of the current user
    pub async fn get_todolists(&self) -> Result<Vec<Todolist>, ApiError> {
        tracing::debug!("GET todo-lists");
        self.send(self.client.get(self.url("todo-lists"))).await
    }

    /// Create a todolist
    pub async fn create_todolist(&self, title: &str) -> Result<Todolist, ApiError> {
        tracing::debug!("POST todo-lists");
        let data: ItemData<Todolist> = self
            .call(
                self.client
                    .post(self.url("todo-lists"))
                    .json(&serde_json::json!({ "title": title })),
            )
            .await?;
        Ok(data.item)
    }

    /// Delete a todolist (the backend drops its tasks)
    pub async fn delete_todolist(&self, todolist_id: &str) -> Result<(), ApiError> {
        tracing::debug!("DELETE todo-lists/{}", todolist_id);
        let _: IgnoredAny = self
            .call(self.client.delete(self.url(&format!("todo-lists/{}", todolist_id))))
            .await?;
        Ok(())
    }

    /// Rename a todolist
    pub async fn update_todolist_title(&self, todolist_id: &str, title: &str) -> Result<(), ApiError> {
        tracing::debug!("PUT todo-lists/{}", todolist_id);
        let _: IgnoredAny = self
            .call(
                self.client
                    .put(self.url(&format!("todo-lists/{}", todolist_id)))
                    .json(&serde_json::json!({ "title": title })),
            )
            .await?;
        Ok(())
    }

    /// Fetch the tasks of one todolist
    pub async fn get_tasks(&self, todolist_id: &str) -> Result<Vec<Task>, ApiError> {
        tracing::debug!("GET todo-lists/{}/tasks", todolist_id);
        let page: TasksPage = self
            .send(self.client.get(self.url(&format!("todo-lists/{}/tasks", todolist_id))))
            .await?;
        match page.error {
            Some(error) => Err(ApiError::Domain(ResponseEnvelope::failure(vec![error]))),
            None => Ok(page.items),
        }
    }

    /// Create a task in a todolist
    pub async fn create_task(&self, todolist_id: &str, title: &str) -> Result<Task, ApiError> {
        tracing::debug!("POST todo-lists/{}/tasks", todolist_id);
        let data: ItemData<Task> = self
            .call(
                self.client
                    .post(self.url(&format!("todo-lists/{}/tasks", todolist_id)))
                    .json(&serde_json::json!({ "title": title })),
            )
            .await?;
        Ok(data.item)
    }

    /// Replace the mutable fields of a task
    pub async fn update_task(
        &self,
        todolist_id: &str,
        task_id: &str,
        model: &UpdateTaskModel,
    ) -> Result<Task, ApiError> {
        tracing::debug!("PUT todo-lists/{}/tasks/{}", todolist_id, task_id);
        let data: ItemData<Task> = self
            .call(
                self.client
                    .put(self.url(&format!("todo-lists/{}/tasks/{}", todolist_id, task_id)))
                    .json(model),
            )
            .await?;
        Ok(data.item)
    }

    /// Delete a task
    pub async fn delete_task(&self, todolist_id: &str, task_id: &str) -> Result<(), ApiError> {
        tracing::debug!("DELETE todo-lists/{}/tasks/{}", todolist_id, task_id);
        let _: IgnoredAny = self
            .call(
                self.client
                    .delete(self.url(&format!("todo-lists/{}/tasks/{}", todolist_id, task_id))),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success_yields_data() {
        let envelope: ResponseEnvelope = serde_json::from_str(
            r#"{"resultCode":0,"messages":[],"data":{"item":{"id":"l1","title":"Groceries","addedDate":"2024-03-01T10:15:30.5","order":0}}}"#,
        )
        .unwrap();

        let data: ItemData<Todolist> = envelope.into_data().unwrap();
        assert_eq!(data.item.id, "l1");
        assert_eq!(data.item.title, "Groceries");
        assert!(data.item.added_date.is_some());
    }

    #[test]
    fn test_envelope_nonzero_result_code_is_domain_error() {
        let envelope: ResponseEnvelope = serde_json::from_str(
            r#"{"resultCode":1,"messages":["Incorrect Email or Password"],"data":{},"fieldsErrors":[{"field":"email","error":"Invalid email"}]}"#,
        )
        .unwrap();

        let err = envelope.into_data::<IgnoredAny>().unwrap_err();
        match &err {
            ApiError::Domain(env) => {
                assert_eq!(env.fields_errors.len(), 1);
                assert_eq!(env.fields_errors[0].field, "email");
            }
            other => panic!("expected domain error, got {:?}", other),
        }
        assert_eq!(err.to_string(), "Incorrect Email or Password");
    }

    #[test]
    fn test_domain_error_without_messages_has_generic_text() {
        let err = ApiError::Domain(ResponseEnvelope::failure(vec![]));
        assert_eq!(err.to_string(), "Request was rejected by the server");
    }

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status(StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Request failed with status code 401");
    }

    #[test]
    fn test_task_status_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&TaskStatus::Completed).unwrap(), "2");
        let status: TaskStatus = serde_json::from_str("1").unwrap();
        assert_eq!(status, TaskStatus::InProgress);
        assert!(serde_json::from_str::<TaskStatus>("9").is_err());
    }

    #[test]
    fn test_task_page_decodes() {
        let page: TasksPage = serde_json::from_str(
            r#"{"items":[{"id":"t1","todoListId":"l1","title":"Milk","description":null,"status":2,"priority":1,"startDate":null,"deadline":null,"order":-1,"addedDate":"2024-03-01T10:15:30"}],"totalCount":1,"error":null}"#,
        )
        .unwrap();

        assert_eq!(page.items.len(), 1);
        let task = &page.items[0];
        assert_eq!(task.todo_list_id, "l1");
        assert!(task.is_completed());
        assert_eq!(task.priority, TaskPriority::Middle);
        assert!(page.error.is_none());
    }

    #[test]
    fn test_login_params_skip_missing_captcha() {
        let params = LoginParams {
            email: "free@samuraijs.com".to_string(),
            password: "free".to_string(),
            remember_me: true,
            captcha: None,
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["rememberMe"], true);
        assert!(json.get("captcha").is_none());
    }

    #[test]
    fn test_client_normalizes_base_url() {
        let config = ApiConfig {
            base_url: "https://example.com/api".to_string(),
            api_key: None,
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.url("todo-lists"), "https://example.com/api/todo-lists");
        assert_eq!(client.url("/auth/me"), "https://example.com/api/auth/me");
    }

    #[test]
    fn test_token_is_shared_between_clones() {
        let client = ApiClient::new(&ApiConfig::default()).unwrap();
        let clone = client.clone();
        client.set_token(Some("abc".to_string()));
        assert_eq!(clone.token().as_deref(), Some("abc"));
        clone.set_token(None);
        assert!(client.token().is_none());
    }
}
