//! Changelog data model.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forge::{config::DEFAULT_HOST, types::PullRequest};

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

/// Changelog entry for the pull requests merged between two revisions.
///
/// An empty `from_revision` means "from the beginning of history" and an
/// empty `to_revision` means "unreleased, up to the current tip".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Pull requests in merge-time order.
    pub pull_requests: Vec<PullRequest>,
    /// Older boundary: tag, commit sha, or empty for the repository root.
    pub from_revision: String,
    /// Newer boundary: tag, commit sha, next version label, or empty.
    pub to_revision: String,
    /// Commit time of `to_revision`; `None` when it could not be resolved.
    pub changed_at: Option<DateTime<Utc>>,
    pub owner: String,
    pub repo: String,
    /// Forge host used for links.
    #[serde(default = "default_host")]
    pub host: String,
}

/// Sections for every version boundary, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    #[serde(rename = "Sections")]
    pub sections: Vec<Section>,
}
