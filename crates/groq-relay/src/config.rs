//! Configuration from environment variables.
//!
//! **Environment variables:**
//! - `PORT`: server port (default: 10000)
//! - `GROQ_API_KEY`: upstream credential. Absence is surfaced per-request
//!   as a `500`, not at startup.
//! - `GROQ_URL`: upstream chat-completions endpoint
//!   (default: `https://api.groq.com/v1/chat/completions`)
//! - `REQUEST_TIMEOUT_SECS`: upstream request timeout (default: 30)

use std::env;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.groq.com/v1/chat/completions";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub port: u16,
    pub api_key: Option<String>,
    pub upstream_url: String,
    pub request_timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
            api_key: env::var("GROQ_API_KEY").ok(),
            upstream_url: env::var("GROQ_URL")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl RelayConfig {
    /// The upstream credential, if configured. An empty string counts as
    /// unset.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }
}
