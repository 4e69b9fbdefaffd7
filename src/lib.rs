//! GitLab administration helper
//!
//! A small command-line client for two recurring GitLab chores:
//!
//! - **Granting roles**: give a user a role on a project, or on a group when
//!   no project has that path. Existing memberships are updated in place.
//! - **Yearly exports**: list every issue or merge request created in a
//!   calendar year across all projects visible to the token.
//!
//! Both operations return an [`OperationResult`], which the binary prints as
//! JSON.
//!
//! ## Example Configuration
//!
//! ```toml
//! [gitlab]
//! url = "https://gitlab.example.com"
//! # token from GITLAB_TOKEN env var
//! timeout_secs = 30
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod gitlab;
pub mod util;

// Re-export main types
pub use api::{GitLabApi, OperationResult, Role};
pub use config::{AppConfig, ConfigOverrides, load_config};
pub use error::{AppError, Result};
