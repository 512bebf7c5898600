use crate::domain::errors::FetchError;
use crate::domain::models::activity::{Commit, IssueSearchItem, Repository};
use async_trait::async_trait;
use url::Url;

/// Listings never go past the first page of this many items.
pub const PAGE_SIZE: u8 = 100;

#[async_trait]
pub trait GitHubApi {
    async fn fetch_user_repositories(&self, username: &str) -> Result<Vec<Repository>, FetchError>;
    async fn fetch_commits(
        &self,
        repository: &Repository,
        author: &str,
    ) -> Result<Vec<Commit>, FetchError>;
    async fn search_issues(&self, author: &str) -> Result<Vec<IssueSearchItem>, FetchError>;
    async fn fetch_starred_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<Repository>, FetchError>;
    /// Root all endpoint paths are joined to.
    fn base_url(&self) -> &Url;
}
