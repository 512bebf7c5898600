use crate::domain::errors::FetchError;
use crate::domain::external_apis::github::{GitHubApi, PAGE_SIZE};
use crate::domain::models::activity::{Commit, IssueSearchItem, Repository};
use anyhow::{Context, ensure};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Per-request timeout. Exceeding it fails only that request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub const DEFAULT_API_URL: &str = "https://api.github.com";

// Every field is optional: a missing key or a JSON `null` decodes to an
// empty value so the entry is still counted and reported.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
struct GitHubRepositoryResponse {
    name: Option<String>,
    owner: Option<GitHubOwnerResponse>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
struct GitHubOwnerResponse {
    login: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
struct GitHubCommitResponse {
    commit: Option<GitHubCommitDetailResponse>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
struct GitHubCommitDetailResponse {
    author: Option<GitHubCommitAuthorResponse>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
struct GitHubCommitAuthorResponse {
    name: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
struct GitHubIssueResponse {
    repository_url: Option<String>,
}

// /search/issues wraps its results in an object keyed by `items`.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct GitHubIssueSearchApiResponse {
    items: Option<Vec<Option<GitHubIssueResponse>>>,
}

impl From<GitHubRepositoryResponse> for Repository {
    fn from(repo_res: GitHubRepositoryResponse) -> Self {
        Repository {
            name: repo_res.name.unwrap_or_default(),
            owner: repo_res.owner.and_then(|o| o.login).unwrap_or_default(),
        }
    }
}

impl From<GitHubCommitResponse> for Commit {
    fn from(commit_res: GitHubCommitResponse) -> Self {
        Commit {
            author_name: commit_res
                .commit
                .and_then(|c| c.author)
                .and_then(|a| a.name)
                .unwrap_or_default(),
        }
    }
}

pub struct GitHubApiAdapter {
    client: Client,
    base_url: Url,
}

impl GitHubApiAdapter {
    pub fn new(base_url: Url) -> anyhow::Result<Self> {
        ensure!(
            matches!(base_url.scheme(), "http" | "https"),
            "GitHub API URL must be http or https, got {base_url}"
        );
        let client = Client::builder()
            .user_agent(concat!("github-activity/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path, checked in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.query_pairs_mut()
            .extend_pairs(query)
            .append_pair("per_page", &PAGE_SIZE.to_string());
        url
    }

    /// GET `url` and decode a 200 response body as `T`.
    ///
    /// Any other status is an error; nothing is retried. The response is
    /// dropped on every return path.
    async fn get_json<T>(&self, url: Url) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl GitHubApi for GitHubApiAdapter {
    #[tracing::instrument(name = "GitHubApiAdapter::fetch_user_repositories", skip(self))]
    async fn fetch_user_repositories(&self, username: &str) -> Result<Vec<Repository>, FetchError> {
        let url = self.endpoint(&["users", username, "repos"], &[]);
        let response_items: Vec<Option<GitHubRepositoryResponse>> = self.get_json(url).await?;
        Ok(response_items
            .into_iter()
            .map(|repo_res| Repository::from(repo_res.unwrap_or_default()))
            .collect())
    }

    #[tracing::instrument(name = "GitHubApiAdapter::fetch_commits", skip(self))]
    async fn fetch_commits(
        &self,
        repository: &Repository,
        author: &str,
    ) -> Result<Vec<Commit>, FetchError> {
        let url = self.endpoint(
            &["repos", repository.owner.as_str(), repository.name.as_str(), "commits"],
            &[("author", author)],
        );
        let response_items: Vec<Option<GitHubCommitResponse>> = self.get_json(url).await?;

        let commits = response_items
            .into_iter()
            .map(|commit_res| Commit::from(commit_res.unwrap_or_default()))
            .collect();

        Ok(commits)
    }

    #[tracing::instrument(name = "GitHubApiAdapter::search_issues", skip(self))]
    async fn search_issues(&self, author: &str) -> Result<Vec<IssueSearchItem>, FetchError> {
        let q = format!("author:{author} type:issue");
        let url = self.endpoint(&["search", "issues"], &[("q", q.as_str())]);
        let api_response: GitHubIssueSearchApiResponse = self.get_json(url).await?;

        let items = api_response
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|issue_res| IssueSearchItem {
                repository_url: issue_res
                    .and_then(|i| i.repository_url)
                    .unwrap_or_default(),
            })
            .collect();

        Ok(items)
    }

    #[tracing::instrument(name = "GitHubApiAdapter::fetch_starred_repositories", skip(self))]
    async fn fetch_starred_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<Repository>, FetchError> {
        let url = self.endpoint(&["users", username, "starred"], &[]);
        let response_items: Vec<Option<GitHubRepositoryResponse>> = self.get_json(url).await?;
        Ok(response_items
            .into_iter()
            .map(|repo_res| Repository::from(repo_res.unwrap_or_default()))
            .collect())
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}
