//! Domain DTOs for the gigs API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! the integration test catches drift between the two crates. `Gig` keeps any
//! field it does not know about in `extra`, so a gig decoded from the server
//! re-encodes without loss.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Credentials sent to the sign-up and log-in routes.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session token returned by a successful log-in.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bearer {
    pub token: String,
}

impl Bearer {
    /// Value for the `authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for Bearer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bearer").field("token", &"<redacted>").finish()
    }
}

/// A gig as the server describes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Gig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "dueDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<String>,
    /// Server fields this client does not model, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Gig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            description: None,
            due_date: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }
}
