//! Manager that wraps forge implementations
use async_trait::async_trait;
use log::*;
use std::{collections::HashSet, sync::Arc};

use crate::{
    Result,
    forge::{
        traits::{Forge, PullRequestProvider},
        types::PullRequest,
    },
    repo::Repository,
};

/// Pull request provider that finds candidate numbers in local history and
/// resolves them against the forge. A pull request is kept only when its
/// merge commit is one of the candidate commits in the range.
pub struct ForgeManager {
    forge: Box<dyn Forge>,
    repo: Arc<dyn Repository>,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>, repo: Arc<dyn Repository>) -> Self {
        Self { forge, repo }
    }
}

#[async_trait]
impl PullRequestProvider for ForgeManager {
    async fn merged_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<PullRequest>> {
        if owner.is_empty() || repo.is_empty() {
            warn!("remote owner/repo unknown: skipping pull request lookup");
            return Ok(vec![]);
        }

        let commits = self.repo.pull_request_commits(from, to).await?;

        debug!(
            "found {} pull request candidates in range {from}..{to}",
            commits.len()
        );

        let range_shas = commits
            .iter()
            .map(|commit| commit.sha.as_str())
            .collect::<HashSet<&str>>();

        let in_range = |pr: &PullRequest| {
            pr.merge_commit_sha
                .as_deref()
                .is_some_and(|sha| range_shas.contains(sha))
        };

        let mut seen = HashSet::new();
        let mut pull_requests = vec![];

        for number in commits.iter().map(|commit| commit.number) {
            if !seen.insert(number) {
                continue;
            }

            match self.forge.get_pull_request(owner, repo, number).await {
                Ok(Some(pr)) if pr.merged_at.is_none() => {
                    debug!("pull request #{number} is not merged: skipping")
                }
                Ok(Some(pr)) if in_range(&pr) => pull_requests.push(pr),
                Ok(Some(_)) => {
                    debug!(
                        "pull request #{number} merged outside {from}..{to}: skipping"
                    )
                }
                Ok(None) => warn!("pull request #{number} not found"),
                Err(err) => {
                    warn!("failed to get pull request #{number}: {err}")
                }
            }
        }

        // stable: pull requests sharing a merge time keep history order
        pull_requests.sort_by_key(|pr| pr.merged_at);

        Ok(pull_requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::GhchError,
        forge::traits::MockForge,
        repo::{MockRepository, PullRequestCommit},
        test_helpers::*,
    };

    /// Candidate commits whose shas match the test pull request fixtures.
    fn pr_commits(numbers: &[u64]) -> Vec<PullRequestCommit> {
        numbers
            .iter()
            .map(|number| PullRequestCommit {
                number: *number,
                sha: format!("{number:040x}"),
            })
            .collect()
    }

    fn manager(forge: MockForge, repo: MockRepository) -> ForgeManager {
        ForgeManager::new(Box::new(forge), Arc::new(repo))
    }

    #[tokio::test]
    async fn returns_empty_without_owner_or_repo() {
        let mock_forge = MockForge::new();
        let mut mock_repo = MockRepository::new();
        mock_repo.expect_pull_request_commits().never();

        let manager = manager(mock_forge, mock_repo);

        let prs = manager
            .merged_pull_requests("", "widget", "v1.0.0", "v1.1.0")
            .await
            .unwrap();
        assert!(prs.is_empty());
    }

    #[tokio::test]
    async fn orders_by_merge_time_and_removes_duplicates() {
        let mut mock_repo = MockRepository::new();
        mock_repo
            .expect_pull_request_commits()
            .withf(|from, to| from == "v1.0.0" && to == "v1.1.0")
            .returning(|_, _| Ok(pr_commits(&[3, 1, 3, 2])));

        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_get_pull_request()
            .times(3)
            .returning(|_, _, number| {
                let day = match number {
                    1 => 12,
                    2 => 10,
                    _ => 11,
                };
                Ok(Some(create_test_pull_request(
                    number,
                    &format!("pr {number}"),
                    "alice",
                    Some(test_time(2024, 1, day)),
                )))
            });

        let manager = manager(mock_forge, mock_repo);

        let prs = manager
            .merged_pull_requests("acme", "widget", "v1.0.0", "v1.1.0")
            .await
            .unwrap();

        let numbers = prs.iter().map(|pr| pr.number).collect::<Vec<u64>>();
        assert_eq!(numbers, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn skips_unmerged_missing_and_failed_lookups() {
        let mut mock_repo = MockRepository::new();
        mock_repo
            .expect_pull_request_commits()
            .returning(|_, _| Ok(pr_commits(&[1, 2, 3, 4])));

        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_get_pull_request()
            .returning(|_, _, number| match number {
                1 => Ok(Some(create_test_pull_request(
                    1,
                    "merged",
                    "alice",
                    Some(test_time(2024, 1, 1)),
                ))),
                2 => Ok(Some(create_test_pull_request(
                    2, "closed", "bob", None,
                ))),
                3 => Ok(None),
                _ => Err(GhchError::forge("boom")),
            });

        let manager = manager(mock_forge, mock_repo);

        let prs = manager
            .merged_pull_requests("acme", "widget", "", "")
            .await
            .unwrap();

        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].number, 1);
        assert_eq!(prs[0].title, "merged");
    }

    #[tokio::test]
    async fn propagates_history_errors() {
        let mut mock_repo = MockRepository::new();
        mock_repo
            .expect_pull_request_commits()
            .returning(|_, _| Err(GhchError::unresolved("nope")));

        let manager = manager(MockForge::new(), mock_repo);

        let result = manager
            .merged_pull_requests("acme", "widget", "nope", "")
            .await;

        assert!(matches!(result, Err(GhchError::UnresolvedRevision(_))));
    }

    #[tokio::test]
    async fn skips_pull_requests_merged_outside_the_range() {
        let mut mock_repo = MockRepository::new();
        mock_repo.expect_pull_request_commits().returning(|_, _| {
            Ok(vec![
                // cherry-pick of #10: same subject, different commit
                PullRequestCommit {
                    number: 10,
                    sha: "c".repeat(40),
                },
                PullRequestCommit {
                    number: 11,
                    sha: format!("{:040x}", 11),
                },
            ])
        });

        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_get_pull_request()
            .times(2)
            .returning(|_, _, number| {
                Ok(Some(create_test_pull_request(
                    number,
                    &format!("pr {number}"),
                    "alice",
                    Some(test_time(2024, 1, 1)),
                )))
            });

        let manager = manager(mock_forge, mock_repo);

        let prs = manager
            .merged_pull_requests("acme", "widget", "v1.0.0", "v1.0.1")
            .await
            .unwrap();

        let numbers = prs.iter().map(|pr| pr.number).collect::<Vec<u64>>();
        assert_eq!(numbers, vec![11]);
    }

    #[tokio::test]
    async fn skips_pull_requests_without_merge_commit() {
        let mut mock_repo = MockRepository::new();
        mock_repo
            .expect_pull_request_commits()
            .returning(|_, _| Ok(pr_commits(&[5])));

        let mut mock_forge = MockForge::new();
        mock_forge.expect_get_pull_request().returning(|_, _, number| {
            let mut pr = create_test_pull_request(
                number,
                "no sha",
                "alice",
                Some(test_time(2024, 1, 1)),
            );
            pr.merge_commit_sha = None;
            Ok(Some(pr))
        });

        let manager = manager(mock_forge, mock_repo);

        let prs = manager
            .merged_pull_requests("acme", "widget", "", "")
            .await
            .unwrap();

        assert!(prs.is_empty());
    }
}
