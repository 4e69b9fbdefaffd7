//! Configuration types for tanuki-ctl
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::util::SecretString;
use serde::Deserialize;

/// Default GitLab instance when nothing else is configured
pub const DEFAULT_GITLAB_URL: &str = "http://localhost";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitLab connection settings
    pub gitlab: GitLabConfig,
}

/// GitLab connection configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitLabConfig {
    /// GitLab instance URL (e.g., `https://gitlab.example.com`)
    pub url: String,

    /// Personal Access Token (prefer env var GITLAB_TOKEN)
    #[serde(default)]
    pub token: Option<SecretString>,

    /// API version (default: "v4")
    pub api_version: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Whether to verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GITLAB_URL.to_string(),
            token: None,
            api_version: "v4".to_string(),
            timeout_secs: 30,
            verify_ssl: true,
        }
    }
}

impl GitLabConfig {
    /// Instance URL with a single trailing slash removed
    pub fn base_url(&self) -> &str {
        self.url.strip_suffix('/').unwrap_or(&self.url)
    }

    /// Get the full API base URL
    pub fn api_url(&self) -> String {
        format!("{}/api/{}", self.base_url(), self.api_version)
    }
}
