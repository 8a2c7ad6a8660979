//! Traits related to remote git forges
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{Result, forge::types::PullRequest};

/// Lookup of individual pull requests on a hosted forge.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    /// Fetch pull request `number`. `Ok(None)` when the forge does not know
    /// the number.
    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Option<PullRequest>>;
}

/// Source of the pull requests merged in a revision range.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PullRequestProvider: Send + Sync {
    /// Pull requests whose merge landed in `(from, to]`, ordered by merge
    /// time ascending. Empty `from` means the start of history, empty `to`
    /// means the current tip.
    async fn merged_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<PullRequest>>;
}
