//! Local git repository access.
//!
//! This module answers every question the changelog needs from version
//! control:
//!
//! - which tags are versions, newest tagged commit first
//! - when the commit behind a revision was made
//! - which commits between two revisions name a pull request
//! - who owns the repository on the forge (from the remote url)
//!
//! All reads go through libgit2, so no git executable is required.
//!
//! # Usage
//!
//! ```rust,ignore
//! let repo = LocalRepo::open(Path::new("."))?;
//! let tags = repo.version_tags().await?;
//! let commits = repo.pull_request_commits("v1.0.0", "").await?;
//! ```
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use git2::Sort;
use git_url_parse::GitUrl;
use log::*;
#[cfg(test)]
use mockall::automock;
use regex::Regex;
use std::{path::Path, sync::LazyLock};
use tokio::sync::Mutex;

use crate::{Result, error::GhchError, forge::config::DEFAULT_HOST};

static MERGE_COMMIT_REGEX: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^Merge pull request #(\d+) from"));

static SQUASH_COMMIT_REGEX: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\(#(\d+)\)\s*$"));

/// Where the repository lives on its forge, derived from a remote url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteIdentity {
    pub host: String,
    pub owner: String,
    pub repo: String,
}

impl Default for RemoteIdentity {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            owner: "".into(),
            repo: "".into(),
        }
    }
}

/// A commit whose subject names a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestCommit {
    pub number: u64,
    pub sha: String,
}

/// Read-only view of a version-controlled repository.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    /// Semantic version tags, newest tagged commit first.
    async fn version_tags(&self) -> Result<Vec<String>>;

    /// The semantic version tag on the newest tagged commit, if any.
    async fn latest_semver_tag(&self) -> Result<Option<String>>;

    /// Commit time of the commit `revision` points at. Fails for an empty
    /// or unknown revision.
    async fn commit_timestamp(&self, revision: &str) -> Result<DateTime<Utc>>;

    /// Host, owner and repository name parsed from the remote's url.
    async fn remote_identity(&self, remote: &str) -> Result<RemoteIdentity>;

    /// Commits in `(from, to]` whose subject names a pull request, oldest
    /// first. A number may show up in several commits.
    async fn pull_request_commits(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<PullRequestCommit>>;

    /// String value from the repository's git config.
    async fn config_value(&self, key: &str) -> Result<Option<String>>;
}

/// libgit2 backed repository.
pub struct LocalRepo {
    repo: Mutex<git2::Repository>,
}

impl LocalRepo {
    /// Open the repository containing `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = git2::Repository::discover(path)?;

        if let Some(workdir) = repo.workdir() {
            debug!("opened repository: {}", workdir.display());
        }

        Ok(Self {
            repo: Mutex::new(repo),
        })
    }
}

/// Resolve a non-empty revision to the commit it points at.
fn resolve_commit<'r>(
    repo: &'r git2::Repository,
    revision: &str,
) -> Result<git2::Commit<'r>> {
    if revision.is_empty() {
        return Err(GhchError::unresolved("no revision specified"));
    }

    let object = repo
        .revparse_single(revision)
        .map_err(|_| GhchError::unresolved(revision))?;

    Ok(object.peel_to_commit()?)
}

/// Parse a tag name as a semantic version, allowing a leading "v".
fn parse_version_tag(name: &str) -> Option<semver::Version> {
    let stripped = name.strip_prefix('v').unwrap_or(name);
    semver::Version::parse(stripped).ok()
}

/// Extract the pull request number a commit message refers to, either from
/// a merge commit subject or a squash commit "(#N)" suffix.
pub fn pull_request_number(message: &str) -> Result<Option<u64>> {
    let subject = message.lines().next().unwrap_or("");

    let merge_regex = MERGE_COMMIT_REGEX.as_ref().map_err(Clone::clone)?;
    let squash_regex = SQUASH_COMMIT_REGEX.as_ref().map_err(Clone::clone)?;

    let captures = merge_regex
        .captures(subject)
        .or_else(|| squash_regex.captures(subject));

    Ok(captures
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok()))
}

/// Parse host, owner and repository name out of a remote url.
pub fn parse_remote_url(url: &str) -> Result<RemoteIdentity> {
    let parsed = GitUrl::parse(url)?;

    let host = parsed.host.unwrap_or_else(|| DEFAULT_HOST.to_string());

    let owner = parsed.owner.ok_or_else(|| {
        GhchError::RemoteNotConfigured(format!(
            "unable to parse owner from remote url: {url}"
        ))
    })?;

    Ok(RemoteIdentity {
        host,
        owner,
        repo: parsed.name,
    })
}

#[async_trait]
impl Repository for LocalRepo {
    async fn version_tags(&self) -> Result<Vec<String>> {
        let repo = self.repo.lock().await;

        let names = repo.tag_names(None)?;

        let mut versions = vec![];

        for name in names.iter().flatten() {
            let Some(version) = parse_version_tag(name) else {
                continue;
            };

            let commit =
                match resolve_commit(&repo, &format!("refs/tags/{name}")) {
                    Ok(commit) => commit,
                    Err(err) => {
                        warn!("skipping tag {name}: {err}");
                        continue;
                    }
                };

            versions.push((
                commit.time().seconds(),
                version,
                name.to_string(),
            ));
        }

        // newest commit first, higher version first on the same commit time
        versions.sort_by(|(t1, v1, _), (t2, v2, _)| {
            t2.cmp(t1).then_with(|| v2.cmp(v1))
        });

        Ok(versions.into_iter().map(|(_, _, name)| name).collect())
    }

    async fn latest_semver_tag(&self) -> Result<Option<String>> {
        let tags = self.version_tags().await?;
        Ok(tags.into_iter().next())
    }

    async fn commit_timestamp(&self, revision: &str) -> Result<DateTime<Utc>> {
        let repo = self.repo.lock().await;

        let commit = resolve_commit(&repo, revision)?;
        let seconds = commit.time().seconds();

        DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
            GhchError::unresolved(format!(
                "{revision}: invalid commit time {seconds}"
            ))
        })
    }

    async fn remote_identity(&self, remote: &str) -> Result<RemoteIdentity> {
        let repo = self.repo.lock().await;

        let found = repo.find_remote(remote).map_err(|_| {
            GhchError::RemoteNotConfigured(format!("no remote named {remote}"))
        })?;

        let url = found.url().ok_or_else(|| {
            GhchError::RemoteNotConfigured(format!(
                "remote {remote} has no valid url"
            ))
        })?;

        debug!("using remote {remote}: {url}");

        parse_remote_url(url)
    }

    async fn pull_request_commits(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<PullRequestCommit>> {
        let repo = self.repo.lock().await;

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE)?;

        if to.is_empty() {
            revwalk.push_head()?;
        } else {
            revwalk.push(resolve_commit(&repo, to)?.id())?;
        }

        if !from.is_empty() {
            revwalk.hide(resolve_commit(&repo, from)?.id())?;
        }

        let mut commits = vec![];

        for oid in revwalk {
            let commit = repo.find_commit(oid?)?;
            let message = commit.message().unwrap_or("");

            if let Some(number) = pull_request_number(message)? {
                commits.push(PullRequestCommit {
                    number,
                    sha: commit.id().to_string(),
                });
            }
        }

        Ok(commits)
    }

    async fn config_value(&self, key: &str) -> Result<Option<String>> {
        let repo = self.repo.lock().await;
        let config = repo.config()?.snapshot()?;

        match config.get_str(key) {
            Ok(value) => Ok(Some(value.to_string())),
            Err(err) if err.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
#[path = "./repo_tests.rs"]
mod tests;
