//! Typed configuration for the DigitalOcean client.
//!
//! The token is always passed explicitly through the call chain — there is
//! no package-level client and no opaque meta object to fish it out of.

use serde::Deserialize;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.digitalocean.com";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "TIDEMARK_DO_TOKEN";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "TIDEMARK_DO_BASE_URL";

/// Errors raised while assembling a [`DoConfig`].
#[derive(Debug, thiserror::Error)]
pub enum DoConfigError {
    /// No API token was provided.
    #[error("missing API token: set {TOKEN_ENV} or pass one explicitly")]
    MissingToken,
}

/// Configuration for [`crate::DoClient`].
#[derive(Debug, Clone, Deserialize)]
pub struct DoConfig {
    /// Bearer token sent with every request.
    pub token: String,
    /// API base URL; trailing slashes are tolerated.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl DoConfig {
    /// Creates a config with the default endpoint and timeout.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }

    /// Loads the config from `TIDEMARK_DO_TOKEN` and `TIDEMARK_DO_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns `DoConfigError::MissingToken` if the token variable is unset
    /// or empty.
    pub fn from_env() -> Result<Self, DoConfigError> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(DoConfigError::MissingToken)?;
        let mut config = Self::new(token);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV)
            && !base_url.is_empty()
        {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
