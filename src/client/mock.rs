//! client::mock
//!
//! In-memory [`LakeFsApi`] for deterministic testing.
//!
//! # Example
//!
//! ```
//! use lctl::client::mock::MockLakeFsClient;
//! use lctl::client::{LakeFsApi, ListOptions};
//! use lctl::model::Repository;
//!
//! # tokio_test::block_on(async {
//! let client = MockLakeFsClient::new()
//!     .with_repository(Repository::new("alpha", 0, "main", "local://alpha"))
//!     .with_repository(Repository::new("beta", 0, "main", "local://beta"));
//!
//! let page = client.list_repositories(ListOptions::default().amount(1)).await.unwrap();
//! assert_eq!(page.repositories()[0].id(), Some("alpha"));
//! assert!(page.pagination.unwrap().has_more());
//! # });
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::traits::{ClientError, LakeFsApi, ListOptions};
use crate::model::{Pagination, Repository, RepositoryList, VersionConfig};

/// Page size when the caller does not pass an amount.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Mock lakeFS server state.
///
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockLakeFsClient {
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Debug, Default)]
struct MockInner {
    /// Repositories by id; ordered like the server's listing.
    repositories: BTreeMap<String, Repository>,
    version: VersionConfig,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

/// Which operation should fail, and with what.
#[derive(Debug, Clone)]
pub enum FailOn {
    ListRepositories(ClientError),
    GetRepository(ClientError),
    GetVersionConfig(ClientError),
}

/// Recorded call for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    ListRepositories {
        after: Option<String>,
        amount: Option<u32>,
    },
    GetRepository {
        id: String,
    },
    GetVersionConfig,
}

impl MockLakeFsClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a repository. Repositories without an id are ignored.
    pub fn with_repository(self, repository: Repository) -> Self {
        if let Some(id) = repository.id.clone() {
            self.lock().repositories.insert(id, repository);
        }
        self
    }

    pub fn with_version(self, version: VersionConfig) -> Self {
        self.lock().version = version;
        self
    }

    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.lock().fail_on = Some(fail_on);
        self
    }

    pub fn clear_fail_on(&self) {
        self.lock().fail_on = None;
    }

    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    // A poisoned lock only means another test thread panicked; keep going.
    fn lock(&self) -> MutexGuard<'_, MockInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self, op: MockOperation) -> Result<MutexGuard<'_, MockInner>, ClientError> {
        let mut inner = self.lock();
        let failure = match (&inner.fail_on, &op) {
            (Some(FailOn::ListRepositories(e)), MockOperation::ListRepositories { .. })
            | (Some(FailOn::GetRepository(e)), MockOperation::GetRepository { .. })
            | (Some(FailOn::GetVersionConfig(e)), MockOperation::GetVersionConfig) => {
                Some(e.clone())
            }
            _ => None,
        };
        inner.operations.push(op);
        match failure {
            Some(e) => Err(e),
            None => Ok(inner),
        }
    }
}

#[async_trait]
impl LakeFsApi for MockLakeFsClient {
    async fn list_repositories(&self, options: ListOptions) -> Result<RepositoryList, ClientError> {
        let inner = self.begin(MockOperation::ListRepositories {
            after: options.after.clone(),
            amount: options.amount,
        })?;

        let amount = options.amount.unwrap_or(DEFAULT_PAGE_SIZE) as usize;
        let mut remaining = inner
            .repositories
            .iter()
            .filter(|(id, _)| options.after.as_deref().map_or(true, |after| id.as_str() > after))
            .map(|(_, repo)| repo.clone());

        let page: Vec<Repository> = remaining.by_ref().take(amount).collect();
        let has_more = remaining.next().is_some();
        let next_offset = if has_more {
            page.last().and_then(|r| r.id.clone()).unwrap_or_default()
        } else {
            String::new()
        };

        let pagination = Pagination::new(has_more, next_offset, page.len() as i64, amount as i64);
        Ok(RepositoryList::new(pagination, page))
    }

    async fn get_repository(&self, id: &str) -> Result<Repository, ClientError> {
        let inner = self.begin(MockOperation::GetRepository { id: id.to_string() })?;
        inner
            .repositories
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("repository '{}'", id)))
    }

    async fn get_version_config(&self) -> Result<VersionConfig, ClientError> {
        let inner = self.begin(MockOperation::GetVersionConfig)?;
        Ok(inner.version.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_repos() -> MockLakeFsClient {
        MockLakeFsClient::new()
            .with_repository(Repository::new("c", 3, "main", "local://c"))
            .with_repository(Repository::new("a", 1, "main", "local://a"))
            .with_repository(Repository::new("b", 2, "main", "local://b"))
    }

    fn ids(list: &RepositoryList) -> Vec<&str> {
        list.repositories().iter().filter_map(|r| r.id()).collect()
    }

    #[tokio::test]
    async fn lists_in_id_order() {
        let page = three_repos()
            .list_repositories(ListOptions::default())
            .await
            .unwrap();
        assert_eq!(ids(&page), vec!["a", "b", "c"]);
        assert!(!page.pagination.as_ref().unwrap().has_more());
    }

    #[tokio::test]
    async fn pages_with_after() {
        let client = three_repos();

        let first = client
            .list_repositories(ListOptions::default().amount(2))
            .await
            .unwrap();
        assert_eq!(ids(&first), vec!["a", "b"]);
        let cursor = first.pagination.as_ref().unwrap().next_cursor().unwrap().to_string();
        assert_eq!(cursor, "b");

        let second = client
            .list_repositories(ListOptions::default().amount(2).after(cursor))
            .await
            .unwrap();
        assert_eq!(ids(&second), vec!["c"]);
        assert_eq!(second.pagination.as_ref().unwrap().next_cursor(), None);
    }

    #[tokio::test]
    async fn get_missing_repository() {
        let err = three_repos().get_repository("zzz").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[tokio::test]
    async fn failure_injection_and_recording() {
        let client = three_repos().fail_on(FailOn::GetVersionConfig(ClientError::Network(
            "connection refused".into(),
        )));

        assert!(client.get_version_config().await.is_err());
        assert!(client.get_repository("a").await.is_ok());

        client.clear_fail_on();
        assert!(client.get_version_config().await.is_ok());

        assert_eq!(
            client.operations(),
            vec![
                MockOperation::GetVersionConfig,
                MockOperation::GetRepository { id: "a".into() },
                MockOperation::GetVersionConfig,
            ]
        );
    }

    #[tokio::test]
    async fn listing_roundtrips_through_model() {
        use crate::model::Model;

        let page = three_repos()
            .list_repositories(ListOptions::default())
            .await
            .unwrap();
        let back = RepositoryList::from_json(&page.to_json().unwrap()).unwrap();
        assert_eq!(back, page);
    }
}
