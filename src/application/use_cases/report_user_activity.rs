use crate::domain::errors::FetchError;
use crate::domain::external_apis::github::GitHubApi;
use crate::domain::models::activity::Activity;
use async_stream::stream;
use futures_util::{Stream, StreamExt, stream as futures_stream};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ReportUserActivityUseCaseInput {
    pub username: String,
    /// Run the issue and star stages even when listing repositories fails.
    pub keep_going: bool,
    /// Maximum commit fetches in flight at once. Output order is unaffected.
    pub concurrency: usize,
}

impl ReportUserActivityUseCaseInput {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            keep_going: false,
            concurrency: 1,
        }
    }
}

/// One item of the report: an activity line, or the diagnostic for a failed
/// repository listing.
pub type ReportItem = Result<Activity, FetchError>;

pub trait ReportUserActivityUseCase {
    fn execute(&self, input: ReportUserActivityUseCaseInput) -> impl Stream<Item = ReportItem> + Send;
}

pub struct ReportUserActivityInteractor<G: GitHubApi + Send + Sync + 'static> {
    github_api: Arc<G>,
}

impl<G: GitHubApi + Send + Sync + 'static> ReportUserActivityInteractor<G> {
    pub fn new(github_api: Arc<G>) -> Self {
        Self { github_api }
    }
}

impl<G: GitHubApi + Send + Sync + 'static> ReportUserActivityUseCase
    for ReportUserActivityInteractor<G>
{
    /// Stages run in a fixed order: pushes, opened issues, stars.
    ///
    /// Only a failed repository listing is reported; it ends the stream
    /// unless `keep_going` is set. Every other failure skips its repository
    /// or stage silently.
    fn execute(&self, input: ReportUserActivityUseCaseInput) -> impl Stream<Item = ReportItem> + Send {
        let github_api = self.github_api.clone();
        let ReportUserActivityUseCaseInput {
            username,
            keep_going,
            concurrency,
        } = input;

        stream! {
            tracing::debug!("Fetching repositories of {}...", username);
            match github_api.fetch_user_repositories(&username).await {
                Ok(repositories) => {
                    tracing::debug!("Fetched {} repositories", repositories.len());

                    let commit_fetches = futures_stream::iter(repositories)
                        .map(|repository| {
                            let github_api = github_api.clone();
                            let username = username.clone();
                            async move {
                                let commits = github_api.fetch_commits(&repository, &username).await;
                                (repository, commits)
                            }
                        })
                        .buffered(concurrency.max(1));

                    for await (repository, commits) in commit_fetches {
                        match commits {
                            Ok(commits) if !commits.is_empty() => {
                                yield Ok(Activity::Pushed { repository, count: commits.len() });
                            }
                            Ok(_) => {}
                            Err(e) => tracing::debug!("Skipping commits of {}: {}", repository, e),
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!("Failed to fetch repositories of {}: {}", username, e);
                    yield Err(e);
                    if !keep_going {
                        return;
                    }
                }
            }

            match github_api.search_issues(&username).await {
                Ok(items) => {
                    for item in items {
                        let owner_repo = item.owner_repo(github_api.base_url());
                        yield Ok(Activity::OpenedIssue { owner_repo });
                    }
                }
                Err(e) => tracing::debug!("Skipping issues of {}: {}", username, e),
            }

            match github_api.fetch_starred_repositories(&username).await {
                Ok(repositories) => {
                    for repository in repositories {
                        yield Ok(Activity::Starred { repository });
                    }
                }
                Err(e) => tracing::debug!("Skipping starred repositories of {}: {}", username, e),
            }
        }
    }
}
