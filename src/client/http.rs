//! client::http
//!
//! HTTP implementation of [`LakeFsApi`] over the lakeFS REST API.
//!
//! # Design
//!
//! - The endpoint is normalised to end in `/api/v1`, so both
//!   `https://lakefs.example.com` and `https://lakefs.example.com/api/v1/`
//!   work
//! - Requests carry HTTP basic auth when credentials are configured
//! - Bodies are read as generic JSON and decoded through the model layer
//!
//! # Example
//!
//! ```no_run
//! use lctl::client::{HttpLakeFsClient, LakeFsApi, ListOptions};
//!
//! # tokio_test::block_on(async {
//! let client = HttpLakeFsClient::new("http://localhost:8000")
//!     .with_credentials("AKIA", "secret");
//! let page = client.list_repositories(ListOptions::default()).await.unwrap();
//! for repo in page.repositories() {
//!     println!("{}", repo.id().unwrap_or_default());
//! }
//! # });
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::traits::{ClientError, LakeFsApi, ListOptions};
use crate::core::config::Configuration;
use crate::model::{Model, Repository, RepositoryList, VersionConfig};

/// API path suffix.
const API_PREFIX: &str = "/api/v1";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("lctl/", env!("CARGO_PKG_VERSION"));

/// lakeFS REST client.
pub struct HttpLakeFsClient {
    client: Client,
    /// Base URL ending in `/api/v1`
    api_base: String,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
}

// Custom Debug to avoid exposing the secret key
impl std::fmt::Debug for HttpLakeFsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLakeFsClient")
            .field("api_base", &self.api_base)
            .field("access_key_id", &self.access_key_id)
            .field("has_secret", &self.secret_access_key.is_some())
            .finish()
    }
}

impl HttpLakeFsClient {
    /// Create an unauthenticated client for `endpoint`.
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            api_base: normalize_endpoint(endpoint),
            access_key_id: None,
            secret_access_key: None,
        }
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &Configuration) -> Self {
        let client = Self::new(&config.server.endpoint_url);
        match (
            &config.credentials.access_key_id,
            &config.credentials.secret_access_key,
        ) {
            (Some(id), Some(secret)) => client.with_credentials(id.clone(), secret.clone()),
            _ => client,
        }
    }

    /// Attach basic-auth credentials.
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// The normalised API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_base, path);
        debug!(%url, "GET");
        let request = self.client.get(url).headers(Self::headers());
        match &self.access_key_id {
            Some(id) => request.basic_auth(id, self.secret_access_key.as_ref()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Value, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        self.handle_response(response, what).await
    }

    /// Read a success body as JSON or map the error status.
    async fn handle_response(&self, response: Response, what: &str) -> Result<Value, ClientError> {
        let status = response.status();
        debug!(status = status.as_u16(), what, "response");

        if status.is_success() {
            return response.json::<Value>().await.map_err(|e| ClientError::ApiError {
                status: status.as_u16(),
                message: format!("failed to parse response: {}", e),
            });
        }

        let message = error_message(response).await;
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::AuthFailed(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(format!("{}: {}", what, message)),
            _ => ClientError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }
}

/// Pull `message` out of a lakeFS error body, falling back to the raw text.
async fn error_message(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| {
            if text.is_empty() {
                "unknown error".to_string()
            } else {
                text
            }
        })
}

/// Ensure `endpoint` ends in exactly one `/api/v1`.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim_end_matches('/');
    if trimmed.ends_with(API_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, API_PREFIX)
    }
}

#[async_trait]
impl LakeFsApi for HttpLakeFsClient {
    async fn list_repositories(&self, options: ListOptions) -> Result<RepositoryList, ClientError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(after) = &options.after {
            query.push(("after", after.clone()));
        }
        if let Some(amount) = options.amount {
            query.push(("amount", amount.to_string()));
        }

        let body = self
            .send(self.get("/repositories").query(&query), "repositories")
            .await?;
        Ok(RepositoryList::from_value(&body)?)
    }

    async fn get_repository(&self, id: &str) -> Result<Repository, ClientError> {
        let body = self
            .send(
                self.get(&format!("/repositories/{}", id)),
                &format!("repository '{}'", id),
            )
            .await?;
        Ok(Repository::from_value(&body)?)
    }

    async fn get_version_config(&self) -> Result<VersionConfig, ClientError> {
        let body = self.send(self.get("/config/version"), "version config").await?;
        Ok(VersionConfig::from_value(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod endpoint {
        use super::*;

        #[test]
        fn appends_api_prefix() {
            assert_eq!(
                normalize_endpoint("http://localhost:8000"),
                "http://localhost:8000/api/v1"
            );
        }

        #[test]
        fn keeps_existing_prefix() {
            assert_eq!(
                normalize_endpoint("https://lakefs.example.com/api/v1/"),
                "https://lakefs.example.com/api/v1"
            );
        }

        #[test]
        fn trims_trailing_slashes() {
            assert_eq!(
                normalize_endpoint("https://lakefs.example.com//"),
                "https://lakefs.example.com/api/v1"
            );
        }
    }

    #[test]
    fn from_config_attaches_credentials_only_when_complete() {
        let mut config = Configuration::default();
        config.credentials.access_key_id = Some("AKIA".into());
        let client = HttpLakeFsClient::from_config(&config);
        assert!(client.access_key_id.is_none());

        config.credentials.secret_access_key = Some("secret".into());
        let client = HttpLakeFsClient::from_config(&config);
        assert_eq!(client.access_key_id.as_deref(), Some("AKIA"));
    }

    #[test]
    fn debug_does_not_expose_secret() {
        let client = HttpLakeFsClient::new("http://x").with_credentials("AKIA", "topsecret");
        let debug_output = format!("{:?}", client);
        assert!(!debug_output.contains("topsecret"));
        assert!(debug_output.contains("has_secret"));
    }

    #[test]
    fn api_base_is_normalised() {
        let client = HttpLakeFsClient::new("http://localhost:8000/");
        assert_eq!(client.api_base(), "http://localhost:8000/api/v1");
    }

    #[test]
    fn user_agent_carries_version() {
        assert!(USER_AGENT_VALUE.starts_with("lctl/"));
    }
}
