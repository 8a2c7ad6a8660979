//! Common test helper functions shared across test modules.
//!
//! This module provides reusable fixtures for pull requests and sections,
//! reducing code duplication across different test suites.
use chrono::{DateTime, TimeZone, Utc};

use crate::{
    changelog::types::Section,
    forge::types::{PullRequest, User},
};

/// Midnight UTC on the given day.
pub fn test_time(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Creates a test PullRequest with sensible defaults.
///
/// # Example
/// ```ignore
/// let pr = create_test_pull_request(42, "Fix bug", "alice", None);
/// ```
pub fn create_test_pull_request(
    number: u64,
    title: &str,
    login: &str,
    merged_at: Option<DateTime<Utc>>,
) -> PullRequest {
    PullRequest {
        number,
        title: title.to_string(),
        user: User {
            login: login.to_string(),
        },
        html_url: Some(format!(
            "https://github.com/acme/widget/pull/{number}"
        )),
        merge_commit_sha: Some(format!("{number:040x}")),
        merged_at,
    }
}

/// Creates a test Section for acme/widget on github.com.
pub fn create_test_section(
    from: &str,
    to: &str,
    changed_at: Option<DateTime<Utc>>,
    pull_requests: Vec<PullRequest>,
) -> Section {
    Section {
        pull_requests,
        from_revision: from.to_string(),
        to_revision: to.to_string(),
        changed_at,
        owner: "acme".to_string(),
        repo: "widget".to_string(),
        host: "github.com".to_string(),
    }
}
