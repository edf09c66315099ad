//! Client configuration.
//!
//! The backend host differs per deployment (the store's LAN box versus
//! the hosted instance), so the base URL is never hardcoded: it loads
//! from the environment with a development default.

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for the backend API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend REST API, without a trailing slash.
    pub base_url: String,
}

impl ApiConfig {
    /// Loads configuration from environment variables, reading a `.env`
    /// file first when one exists.
    ///
    /// ## Environment Variables
    /// - `KASIR_API_BASE_URL`: backend base URL
    ///   (default: `http://localhost:8080`)
    pub fn load() -> Self {
        // Missing .env is fine; variables may come from the real env.
        let _ = dotenvy::dotenv();

        let base_url = env::var("KASIR_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds a config against a known host, mainly for tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = ApiConfig::with_base_url("http://103.185.52.233:8080/");
        assert_eq!(config.base_url, "http://103.185.52.233:8080");
    }
}
