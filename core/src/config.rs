//! Client configuration.
//!
//! The base URL defaults to the hosted gigs API; tests point it at a local
//! mock server instead. Endpoint URLs are derived once, when `GigApi` is
//! built from the config.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://lambdagigapi.herokuapp.com/api";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How `create_gig` talks to the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreateGigMode {
    /// Matches the deployed clients: a GET to `/gigs` with the bearer header
    /// and no body. The gig argument never reaches the server, and a body
    /// that fails to decode is reported as `GigError::BadUrl`.
    #[default]
    Legacy,
    /// POST the gig as JSON to `/gigs`. Decode failures are `GigError::BadData`.
    Post,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Upper bound on a whole request; `None` waits forever.
    pub timeout: Option<Duration>,
    pub create_mode: CreateGigMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            create_mode: CreateGigMode::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_create_mode(mut self, create_mode: CreateGigMode) -> Self {
        self.create_mode = create_mode;
        self
    }
}
