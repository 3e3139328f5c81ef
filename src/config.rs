//! Application configuration.
//!
//! Handles loading credentials and server settings from environment variables
//! and .env files. The structured signage document lives in [`crate::settings`].

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::{churchtools, server};
use crate::error::Result;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// `ChurchTools` API base URL (including `/api`)
    pub api_base: String,
    /// `ChurchTools` login token
    pub api_token: String,
    /// Path of the JSON signage document
    pub settings_path: PathBuf,
    /// Host to bind the HTTP server to
    pub host: String,
    /// Port to bind the HTTP server to
    pub port: u16,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            api_base: churchtools::DEFAULT_BASE_URL.to_string(),
            api_token: String::new(),
            settings_path: PathBuf::from(server::DEFAULT_CONFIG_PATH),
            host: server::DEFAULT_HOST.to_string(),
            port: server::DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(base) = env::var("CHURCHTOOLS_API_BASE") {
            if !base.trim().is_empty() {
                config.api_base = base.trim().trim_end_matches('/').to_string();
            }
        }

        // Older deployments only set API_TOKEN
        if let Some(token) = env::var("CHURCHTOOLS_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| env::var("API_TOKEN").ok())
        {
            config.api_token = token;
        }

        if let Ok(path) = env::var("SIGNAGE_CONFIG") {
            config.settings_path = PathBuf::from(path);
        }

        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }

        if let Ok(port) = env::var("PORT") {
            match port.parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value {port:?}"),
            }
        }

        Ok(config)
    }

    /// Check if `ChurchTools` credentials are configured
    pub fn has_churchtools_credentials(&self) -> bool {
        !self.api_token.is_empty()
    }

    /// Bind address in `host:port` form.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
