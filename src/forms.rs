//! Form validation and per-form state.
//!
//! Validation is a pure function from values to a field → message map, so it
//! can be exercised without any widgets. Form state (values, touched fields,
//! errors) belongs to the view that owns the form, never to the store.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::api::{FieldError, LoginParams};

/// Maximum title length the backend accepts
pub const MAX_TITLE_LEN: usize = 100;

pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";

/// Field name → error message
pub type FieldErrors = BTreeMap<String, String>;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,4}$")
            .unwrap_or_else(|e| panic!("Invalid email pattern: {}", e))
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginValues {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl From<&LoginValues> for LoginParams {
    fn from(values: &LoginValues) -> Self {
        LoginParams {
            email: values.email.clone(),
            password: values.password.clone(),
            remember_me: values.remember_me,
            captcha: None,
        }
    }
}

pub fn validate_login(values: &LoginValues) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if values.email.is_empty() {
        errors.insert(EMAIL.to_string(), "Email is required".to_string());
    } else if !email_regex().is_match(&values.email) {
        errors.insert(EMAIL.to_string(), "Invalid email address".to_string());
    }

    if values.password.is_empty() {
        errors.insert(PASSWORD.to_string(), "Required".to_string());
    } else if values.password.chars().count() < 3 {
        errors.insert(PASSWORD.to_string(), "Must be 3 characters or more".to_string());
    }

    errors
}

/// Validate a list or task title, returning it trimmed
pub fn validate_title(title: &str) -> Result<String, String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("Title is required".to_string());
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err("Title is too long".to_string());
    }
    Ok(trimmed.to_string())
}

/// State of the login form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub values: LoginValues,
    initial: LoginValues,
    touched: BTreeSet<String>,
    errors: FieldErrors,
}

impl LoginForm {
    /// Re-run validation after any value changed
    pub fn changed(&mut self) {
        self.errors = validate_login(&self.values);
    }

    /// Mark a field as visited so its error becomes visible
    pub fn touch(&mut self, field: &str) {
        self.touched.insert(field.to_string());
        self.changed();
    }

    /// Error to display for a field (only once touched)
    pub fn error(&self, field: &str) -> Option<&str> {
        if !self.touched.contains(field) {
            return None;
        }
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.initial
    }

    pub fn can_submit(&self) -> bool {
        self.is_valid() && self.is_dirty()
    }

    /// Validate everything and hand out the credentials if they pass
    pub fn submit(&mut self) -> Option<LoginParams> {
        self.touched.insert(EMAIL.to_string());
        self.touched.insert(PASSWORD.to_string());
        self.changed();

        if self.is_valid() {
            Some(LoginParams::from(&self.values))
        } else {
            None
        }
    }

    /// Route backend field errors to the matching controls
    pub fn apply_field_errors(&mut self, errors: &[FieldError]) {
        for error in errors {
            self.touched.insert(error.field.clone());
            self.errors.insert(error.field.clone(), error.error.clone());
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
