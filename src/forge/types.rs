//! Pull request data as returned by a forge.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account that opened a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

/// A merged pull request. Changelog code only selects and orders these, it
/// never modifies them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub user: User,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub merge_commit_sha: Option<String>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
}

impl From<octocrab::models::pulls::PullRequest> for PullRequest {
    fn from(pr: octocrab::models::pulls::PullRequest) -> Self {
        Self {
            number: pr.number,
            title: pr.title.unwrap_or_default(),
            user: User {
                login: pr.user.map(|u| u.login).unwrap_or_default(),
            },
            html_url: pr.html_url.map(|u| u.to_string()),
            merge_commit_sha: pr.merge_commit_sha,
            merged_at: pr.merged_at,
        }
    }
}
