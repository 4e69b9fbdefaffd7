//! GitLab operations
//!
//! [`GitLabApi`] wraps the HTTP client and exposes the two things this tool
//! does: granting a member role ([`GitLabApi::grant_role_permissions`]) and
//! listing a year's worth of issues or merge requests
//! ([`GitLabApi::get_items_by_year`]). Both return an [`OperationResult`]
//! and never fail with an error once the client is built.

mod items;
mod members;
pub mod result;
pub mod role;

pub use items::{ItemType, PER_PAGE, YearRange, reject_year};
pub use result::OperationResult;
pub use role::{Role, role_to_access_level};

use crate::auth::create_auth_provider;
use crate::config::GitLabConfig;
use crate::error::Result;
use crate::gitlab::{GitLabClient, IdRef, MemberTarget};
use crate::util::QueryBuilder;
use reqwest::StatusCode;
use tracing::{debug, warn};

/// High-level GitLab client
pub struct GitLabApi {
    client: GitLabClient,
}

impl GitLabApi {
    /// Build from an already loaded configuration
    ///
    /// Fails if no token is configured.
    pub fn new(config: &GitLabConfig) -> Result<Self> {
        let auth = create_auth_provider(config)?;
        Ok(Self::with_client(GitLabClient::new(config, auth)?))
    }

    /// Wrap an existing HTTP client
    pub fn with_client(client: GitLabClient) -> Self {
        Self { client }
    }

    async fn resolve_project_id(&self, path: &str) -> Option<u64> {
        self.resolve_path_id(MemberTarget::Project, path).await
    }

    async fn resolve_group_id(&self, path: &str) -> Option<u64> {
        self.resolve_path_id(MemberTarget::Group, path).await
    }

    /// Look a project or group up by full path
    ///
    /// Anything but a 200 counts as "not found", transport errors included.
    async fn resolve_path_id(&self, target: MemberTarget, path: &str) -> Option<u64> {
        let endpoint = format!(
            "/{}/{}",
            target.collection(),
            GitLabClient::encode_path(path)
        );

        match self.client.get(&endpoint).await {
            Ok(response) if response.status() == StatusCode::OK => {
                match response.json::<IdRef>() {
                    Ok(found) => Some(found.id),
                    Err(e) => {
                        warn!(kind = target.noun(), path, error = %e, "Error getting ID");
                        None
                    }
                }
            }
            Ok(response) => {
                debug!(
                    kind = target.noun(),
                    path,
                    status = response.status().as_u16(),
                    "Not found"
                );
                None
            }
            Err(e) => {
                warn!(kind = target.noun(), path, error = %e, "Error getting ID");
                None
            }
        }
    }

    /// Look a user up by exact username; first match wins
    async fn resolve_user_id(&self, username: &str) -> Option<u64> {
        let query = QueryBuilder::new().param("username", username).build();
        let endpoint = format!("/users{query}");

        match self.client.get(&endpoint).await {
            Ok(response) if response.status() == StatusCode::OK => {
                match response.json::<Vec<IdRef>>() {
                    Ok(users) => users.first().map(|user| user.id),
                    Err(e) => {
                        warn!(username, error = %e, "Error getting user ID");
                        None
                    }
                }
            }
            Ok(response) => {
                debug!(
                    username,
                    status = response.status().as_u16(),
                    "User lookup failed"
                );
                None
            }
            Err(e) => {
                warn!(username, error = %e, "Error getting user ID");
                None
            }
        }
    }
}
