//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Password accepted for every demo roster account
    pub demo_password: String,
    /// Path of the persisted session file; in-memory store when unset
    pub session_store_path: Option<String>,
    /// Path of the condominium directory file; built-in demo data when unset
    pub directory_path: Option<String>,
    /// Base URL of a remote credential verifier; demo roster when unset
    pub auth_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 8080,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port,
            demo_password: env::var("DEMO_PASSWORD").unwrap_or_else(|_| "123456".to_string()),
            session_store_path: env::var("SESSION_STORE_PATH").ok(),
            directory_path: env::var("DIRECTORY_PATH").ok(),
            auth_url: env::var("AUTH_URL").ok().map(|v| v.trim().to_string()),
        })
    }

    /// Default config for tests: demo verifier, in-memory store.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            demo_password: "123456".to_string(),
            session_store_path: None,
            directory_path: None,
            auth_url: None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
