//! Builds a single changelog section for a revision range.
use log::*;
use std::sync::Arc;

use crate::{
    changelog::types::Section, forge::traits::PullRequestProvider,
    repo::{RemoteIdentity, Repository},
};

/// Combines the repository and pull request providers into [`Section`]s.
///
/// Provider failures never abort a section: they are logged and the affected
/// field is left empty. A changelog entry with partial data is preferred over
/// no entry at all.
pub struct SectionBuilder {
    repo: Arc<dyn Repository>,
    pull_requests: Arc<dyn PullRequestProvider>,
    identity: RemoteIdentity,
}

impl SectionBuilder {
    pub fn new(
        repo: Arc<dyn Repository>,
        pull_requests: Arc<dyn PullRequestProvider>,
        identity: RemoteIdentity,
    ) -> Self {
        Self {
            repo,
            pull_requests,
            identity,
        }
    }

    /// Resolve the remote identity once for the whole run. Falls back to an
    /// empty owner/repo when the remote cannot be read.
    pub async fn resolve_identity(
        repo: &dyn Repository,
        remote: &str,
    ) -> RemoteIdentity {
        match repo.remote_identity(remote).await {
            Ok(identity) => identity,
            Err(err) => {
                error!("failed to determine owner/repo from remote: {err}");
                RemoteIdentity::default()
            }
        }
    }

    pub fn repo(&self) -> &dyn Repository {
        self.repo.as_ref()
    }

    /// Build the section covering `(from, to]`.
    pub async fn build(&self, from: &str, to: &str) -> Section {
        info!("building section: from [{from}] to [{to}]");

        let pull_requests = match self
            .pull_requests
            .merged_pull_requests(
                &self.identity.owner,
                &self.identity.repo,
                from,
                to,
            )
            .await
        {
            Ok(prs) => prs,
            Err(err) => {
                error!("failed to get pull requests for {from}..{to}: {err}");
                vec![]
            }
        };

        let changed_at = match self.repo.commit_timestamp(to).await {
            Ok(timestamp) => Some(timestamp),
            Err(err) => {
                warn!("unable to resolve change time for [{to}]: {err}");
                None
            }
        };

        Section {
            pull_requests,
            from_revision: from.to_string(),
            to_revision: to.to_string(),
            changed_at,
            owner: self.identity.owner.clone(),
            repo: self.identity.repo.clone(),
            host: self.identity.host.clone(),
        }
    }
}
