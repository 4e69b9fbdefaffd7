//! Personal Access Token authentication
//!
//! Simple authentication using GitLab Personal Access Tokens.

use crate::auth::provider::{AuthHeader, AuthProvider};
use crate::error::AuthError;
use crate::util::SecretString;
use async_trait::async_trait;

/// Personal Access Token authentication provider
#[derive(Debug, Clone)]
pub struct PatProvider {
    token: SecretString,
}

impl PatProvider {
    /// Create a new PAT provider
    pub fn new(token: impl Into<SecretString>) -> Result<Self, AuthError> {
        let token = token.into();

        if token.expose_secret().is_empty() {
            return Err(AuthError::InvalidToken);
        }

        // GitLab PATs have specific prefixes (glpat- for newer tokens)
        // but we don't enforce this as older tokens may not have it
        Ok(Self { token })
    }
}

#[async_trait]
impl AuthProvider for PatProvider {
    async fn get_auth_header(&self) -> Result<AuthHeader, AuthError> {
        Ok(AuthHeader::PrivateToken(self.token.clone()))
    }

    fn auth_type(&self) -> &'static str {
        "Personal Access Token"
    }
}
