//! Configuration module for gitgallery.

use serde::Deserialize;
use std::path::Path;

use crate::{GalleryError, Result};

/// Placeholder credential used when no token is configured.
pub const PLACEHOLDER_TOKEN: &str = "tu_token_aqui";

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins (empty allows any origin).
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_upload_size() -> u64 {
    25
}

impl ServerConfig {
    /// Maximum upload size in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        usize::try_from(self.max_upload_size_mb)
            .unwrap_or(usize::MAX)
            .saturating_mul(1024 * 1024)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

/// Target repository and credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// Repository owner.
    #[serde(default = "default_owner")]
    pub owner: String,
    /// Repository name.
    #[serde(default = "default_repo")]
    pub repo: String,
    /// Branch every read and write targets.
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Access token.
    #[serde(default = "default_token")]
    pub token: String,
    /// REST API base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Raw content base URL used to build upload links.
    #[serde(default = "default_raw_base_url")]
    pub raw_base_url: String,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_owner() -> String {
    "miasitasas".to_string()
}

fn default_repo() -> String {
    "mis-imagenes-catgithub".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_token() -> String {
    PLACEHOLDER_TOKEN.to_string()
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_raw_base_url() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_user_agent() -> String {
    concat!("gitgallery/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_timeout() -> u64 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            repo: default_repo(),
            branch: default_branch(),
            token: default_token(),
            api_base_url: default_api_base_url(),
            raw_base_url: default_raw_base_url(),
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file; console only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Repository configuration.
    #[serde(default)]
    pub github: GitHubConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(GalleryError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| GalleryError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `GITHUB_TOKEN`: access token for the repository
    /// - `PORT`: listening port
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Empty values are ignored, as is a `PORT` that is not a valid port number.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("GITHUB_TOKEN").filter(|v| !v.is_empty()) {
            self.github.token = token;
        }

        if let Some(port) = lookup("PORT").filter(|v| !v.is_empty()) {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!(value = %port, error = %e, "Ignoring invalid PORT"),
            }
        }
    }

    /// Whether the credential is still the built-in placeholder.
    pub fn uses_placeholder_token(&self) -> bool {
        self.github.token.is_empty() || self.github.token == PLACEHOLDER_TOKEN
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - owner, repo or branch is empty
    /// - the API or raw base URL is not an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        let github = &self.github;
        for (field, value) in [
            ("owner", &github.owner),
            ("repo", &github.repo),
            ("branch", &github.branch),
        ] {
            if value.trim().is_empty() {
                return Err(GalleryError::Config(format!("github.{field} must not be empty")));
            }
        }

        for (field, value) in [
            ("api_base_url", &github.api_base_url),
            ("raw_base_url", &github.raw_base_url),
        ] {
            let parsed = url::Url::parse(value)
                .map_err(|e| GalleryError::Config(format!("github.{field} is invalid: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(GalleryError::Config(format!(
                    "github.{field} must use http or https"
                )));
            }
        }

        Ok(())
    }
}
