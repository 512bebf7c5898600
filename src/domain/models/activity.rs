use std::fmt;
use url::Url;

/// A repository identified by its owner/name key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub owner: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub author_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSearchItem {
    pub repository_url: String,
}

impl IssueSearchItem {
    /// `owner/name` of the repository the issue was opened in.
    ///
    /// Only URLs on the same scheme and host as `api_base`, under its path,
    /// of the form `repos/{owner}/{name}` are recognised. Everything else
    /// gives an empty string.
    pub fn owner_repo(&self, api_base: &Url) -> String {
        let Ok(url) = Url::parse(&self.repository_url) else {
            return String::new();
        };
        if url.scheme() != api_base.scheme()
            || url.host_str() != api_base.host_str()
            || url.port_or_known_default() != api_base.port_or_known_default()
        {
            return String::new();
        }

        let base_segments: Vec<&str> = api_base
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        match segments.strip_prefix(base_segments.as_slice()) {
            Some(["repos", owner, name]) => format!("{owner}/{name}"),
            _ => String::new(),
        }
    }
}

/// One line of the activity report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    Pushed { repository: Repository, count: usize },
    OpenedIssue { owner_repo: String },
    Starred { repository: Repository },
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Pushed { repository, count } => {
                write!(f, "Pushed {count} commits to {repository}")
            }
            Activity::OpenedIssue { owner_repo } => {
                write!(f, "Opened a new issue in {owner_repo}")
            }
            Activity::Starred { repository } => write!(f, "Starred {repository}"),
        }
    }
}
