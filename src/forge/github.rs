//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::Octocrab;
use reqwest::StatusCode;
use secrecy::ExposeSecret;

use crate::{
    Result,
    error::GhchError,
    forge::{config::RemoteConfig, traits::Forge, types::PullRequest},
};

/// GitHub forge implementation using Octocrab for pull request lookups.
pub struct Github {
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client for the configured host. Without a token the
    /// client is anonymous, which is enough for public repositories.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = config.api_base_uri();
        debug!("using github api: {base_uri}");

        let mut builder = Octocrab::builder().base_uri(base_uri)?;

        if !config.token.expose_secret().is_empty() {
            builder = builder.personal_token(config.token.clone());
        } else {
            warn!("no github token configured: using anonymous api access");
        }

        let instance = builder.build()?;

        Ok(Self { instance })
    }
}

#[async_trait]
impl Forge for Github {
    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Option<PullRequest>> {
        let result = self.instance.pulls(owner, repo).get(number).await;

        match result {
            Ok(pr) => Ok(Some(PullRequest::from(pr))),
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code == StatusCode::NOT_FOUND =>
            {
                info!("no pull request found for number: {number}");
                Ok(None)
            }
            Err(err) => {
                let msg = format!(
                    "error getting pull request #{number} for {owner}/{repo}: {err}"
                );
                error!("{msg}");
                Err(GhchError::from(err))
            }
        }
    }
}
