//! client::traits
//!
//! The lakeFS API trait and its error type.
//!
//! # Design
//!
//! `LakeFsApi` is async because every call is network I/O. Responses are
//! decoded through the [`Model`](crate::model::Model) machinery, so a
//! response that violates its schema surfaces as [`ClientError::Decode`].

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{ModelError, Repository, RepositoryList, VersionConfig};

/// Errors from API operations.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Credentials are missing or were rejected.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API returned an error status.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected model.
    #[error("invalid response: {0}")]
    Decode(#[from] ModelError),
}

/// Paging options for list operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Return results after this id.
    pub after: Option<String>,
    /// Maximum number of results.
    pub amount: Option<u32>,
}

impl ListOptions {
    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn amount(mut self, amount: u32) -> Self {
        self.amount = Some(amount);
        self
    }
}

/// Operations against a lakeFS server.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// async tasks.
#[async_trait]
pub trait LakeFsApi: Send + Sync {
    /// List repositories, one page at a time.
    ///
    /// # Errors
    ///
    /// - `AuthFailed` if credentials are missing or rejected
    /// - `Decode` if the page does not match `RepositoryList`
    async fn list_repositories(&self, options: ListOptions) -> Result<RepositoryList, ClientError>;

    /// Get one repository by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the repository does not exist
    async fn get_repository(&self, id: &str) -> Result<Repository, ClientError>;

    /// Get the server version information.
    async fn get_version_config(&self) -> Result<VersionConfig, ClientError>;
}
