//! User identity and authentication payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Identity of the logged-in user, held for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    /// Backend user ID
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserSession {
    /// "First Last", or `None` unless both names are known.
    pub fn display_name(&self) -> Option<String> {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        if first.is_empty() || last.is_empty() {
            return None;
        }
        Some(format!("{} {}", first, last))
    }
}

/// User record returned by the backend on login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendUser {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl BackendUser {
    /// Build the session identity, falling back to the submitted email.
    ///
    /// Returns `None` when the backend did not send a user ID.
    pub fn into_session(self, submitted_email: &str) -> Option<UserSession> {
        let id = match self.id? {
            Value::String(s) if !s.trim().is_empty() => s,
            Value::Number(n) => n.to_string(),
            _ => return None,
        };

        Some(UserSession {
            id,
            email: self
                .email
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| submitted_email.to_string()),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
        })
    }
}

/// Login form body. Missing fields decode as empty and fail the blank check.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[serde(default)]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl Credentials {
    /// Trim both fields and lowercase the email.
    pub fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_lowercase(),
            password: self.password.trim().to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.email.trim().is_empty() || self.password.trim().is_empty()
    }
}

/// Registration form body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default)]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
}

impl Registration {
    pub fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_lowercase(),
            password: self.password,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }
}
