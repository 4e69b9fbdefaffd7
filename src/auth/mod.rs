//! Authentication module
//!
//! Provides authentication for GitLab API access. Only static
//! Personal Access Tokens are supported.

pub mod provider;
pub mod token;

pub use provider::{AuthHeader, AuthProvider, BoxedAuthProvider};
pub use token::PatProvider;

use crate::config::GitLabConfig;
use crate::error::AuthError;

/// Create an auth provider from configuration
///
/// The configuration loader has already folded the `GITLAB_*` token
/// variables in, so the environment is not consulted here.
pub fn create_auth_provider(config: &GitLabConfig) -> Result<BoxedAuthProvider, AuthError> {
    match &config.token {
        Some(token) => Ok(Box::new(PatProvider::new(token.clone())?)),
        None => Err(AuthError::NotConfigured),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::SecretString;

    #[test]
    fn test_create_auth_provider_without_token() {
        let config = GitLabConfig::default();
        assert!(matches!(
            create_auth_provider(&config),
            Err(AuthError::NotConfigured)
        ));
    }

    #[test]
    fn test_create_auth_provider_with_token() {
        let config = GitLabConfig {
            token: Some(SecretString::new("glpat-xxxx")),
            ..Default::default()
        };
        let provider = create_auth_provider(&config).unwrap();
        assert_eq!(provider.auth_type(), "Personal Access Token");
    }
}
