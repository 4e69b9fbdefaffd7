//! Error types for tanuki-ctl
//!
//! This module defines the error hierarchy used throughout the application.
//! We use `thiserror` for library-style errors that are part of the API.
//! Only configuration and authentication errors ever reach the process
//! boundary; everything the GitLab operations hit is folded into an
//! `OperationResult` before it leaves the client.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("GitLab API error: {0}")]
    GitLab(#[from] GitLabError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },
}

/// GitLab API transport errors
///
/// Non-2xx statuses are not errors at this layer: the operations inspect
/// status codes themselves and turn them into failure results.
#[derive(Error, Debug)]
pub enum GitLabError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GitLab API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response from GitLab: {0}")]
    InvalidResponse(String),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),
}

impl GitLabError {
    /// Create an API error from an HTTP status code and response body
    pub fn from_response(status: u16, body: &str) -> Self {
        GitLabError::Api {
            status,
            message: if body.is_empty() {
                format!("HTTP {}", status)
            } else {
                body.to_string()
            },
        }
    }
}

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No authentication configured")]
    NotConfigured,

    #[error("Invalid token format")]
    InvalidToken,
}

/// Input validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid role: {role}. Valid roles: {valid}")]
    InvalidRole { role: String, valid: String },
}

/// Anything that can interrupt an operation midway; always folded into a
/// failure `OperationResult` before it reaches the caller
#[derive(Error, Debug)]
pub enum OperationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    GitLab(#[from] GitLabError),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for GitLab API operations
pub type GitLabResult<T> = std::result::Result<T, GitLabError>;
