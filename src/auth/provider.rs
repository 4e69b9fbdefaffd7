//! Authentication provider trait

use crate::error::AuthError;
// async_trait required for dyn-compatibility with Box<dyn AuthProvider>
use async_trait::async_trait;

/// Authentication provider trait
///
/// Implementations provide authentication credentials for GitLab API requests.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Get the authentication header to attach to every request
    async fn get_auth_header(&self) -> Result<AuthHeader, AuthError>;

    /// Get a description of the auth method (for logging)
    fn auth_type(&self) -> &'static str;
}

/// Authentication header to use with requests
#[derive(Clone)]
pub enum AuthHeader {
    /// Private token (used with PAT)
    PrivateToken(crate::util::SecretString),
}

impl AuthHeader {
    /// Get the header name for this auth type
    pub fn header_name(&self) -> &'static str {
        match self {
            AuthHeader::PrivateToken(_) => "PRIVATE-TOKEN",
        }
    }

    /// Get the header value for this auth type
    pub fn header_value(&self) -> &str {
        match self {
            AuthHeader::PrivateToken(token) => token.expose_secret(),
        }
    }
}

impl std::fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple(self.header_name()).field(&"[REDACTED]").finish()
    }
}

/// Box type alias for auth providers
pub type BoxedAuthProvider = Box<dyn AuthProvider>;
