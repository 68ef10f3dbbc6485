//! API endpoint configuration
//!
//! An explicit value object owned by the application root, replacing any
//! notion of a process-wide base-URL singleton. Environment overrides follow
//! the deployment convention; defaults target a local backend.

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "ZORI_API_URL";
/// Environment variable overriding the OAuth redirect URI.
pub const REDIRECT_URI_ENV: &str = "ZORI_OAUTH_REDIRECT_URI";

const DEFAULT_API_URL: &str = "http://localhost:8080/v1";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/auth/callback";

/// Endpoint configuration for the Zori backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the versioned API (no trailing slash)
    pub base_url: String,
    /// Redirect URI registered with the OAuth provider
    pub redirect_uri: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
        }
    }
}

impl ApiConfig {
    /// Build a config from environment overrides, falling back to the local
    /// defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            redirect_uri: std::env::var(REDIRECT_URI_ENV)
                .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string()),
        }
    }

    /// Absolute URL for an API path (path must start with `/`).
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
