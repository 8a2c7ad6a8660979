//! Hosted forge access for pull request metadata.
//!
//! The forge answers "which pull request is #N" while the local repository
//! answers "which pull requests were merged between two revisions". The
//! [`manager::ForgeManager`] combines both into a pull request provider.

/// Configuration and authentication for forge platforms.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Pull request provider combining repository history and forge lookups.
pub mod manager;

/// Common traits for forge platform abstraction.
pub mod traits;

/// Shared data types for pull requests.
pub mod types;
