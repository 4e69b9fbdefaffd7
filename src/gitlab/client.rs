//! GitLab API client
//!
//! Thin HTTP layer over the GitLab REST API. Responses are buffered and
//! handed back with their status code; deciding what a 404 or a 500 means
//! is left to the operations built on top.

use crate::auth::BoxedAuthProvider;
use crate::config::GitLabConfig;
use crate::error::{GitLabError, GitLabResult};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument};

/// A fully read GitLab response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Raw response body
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Deserialize the body
    pub fn json<T: DeserializeOwned>(&self) -> GitLabResult<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            GitLabError::InvalidResponse(format!("Failed to parse response: {}", e))
        })
    }
}

/// GitLab API client
pub struct GitLabClient {
    http: Client,
    base_url: String,
    auth: BoxedAuthProvider,
}

impl GitLabClient {
    /// Create a new GitLab client from configuration
    pub fn new(config: &GitLabConfig, auth: BoxedAuthProvider) -> GitLabResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_ssl)
            .user_agent(format!("tanuki-ctl/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GitLabError::Request)?;

        debug!(auth = auth.auth_type(), api = %config.api_url(), "GitLab client ready");

        Ok(Self {
            http,
            base_url: config.api_url(),
            auth,
        })
    }

    /// Build a URL for an API endpoint
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Add authentication to a request
    async fn authenticate(&self, request: RequestBuilder) -> GitLabResult<RequestBuilder> {
        let header = self.auth.get_auth_header().await?;

        Ok(request.header(header.header_name(), header.header_value()))
    }

    /// Send a request once and read the whole body
    async fn execute(&self, request: RequestBuilder) -> GitLabResult<ApiResponse> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(status = status.as_u16(), bytes = body.len(), "GitLab response");

        Ok(ApiResponse { status, body })
    }

    /// Make a GET request
    #[instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn get(&self, endpoint: &str) -> GitLabResult<ApiResponse> {
        let request = self.http.get(self.url(endpoint));
        let request = self.authenticate(request).await?;

        self.execute(request).await
    }

    /// Make a POST request with a JSON body
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> GitLabResult<ApiResponse> {
        let request = self.http.post(self.url(endpoint)).json(body);
        let request = self.authenticate(request).await?;

        self.execute(request).await
    }

    /// Make a PUT request with a JSON body
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> GitLabResult<ApiResponse> {
        let request = self.http.put(self.url(endpoint)).json(body);
        let request = self.authenticate(request).await?;

        self.execute(request).await
    }

    /// URL-encode a project or group path for use in API endpoints
    ///
    /// Every reserved character is encoded, `/` included.
    pub fn encode_path(path: &str) -> String {
        urlencoding::encode(path).into_owned()
    }
}
