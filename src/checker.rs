//! The check pipeline: resolve, compare, sync.
//!
//! One invocation is one strictly sequential pass. Each stage consumes the
//! previous stage's output and any failure short-circuits the rest; the
//! next scheduled run starts over from scratch. There is no retry and no
//! state shared between invocations.

use tracing::info;

use crate::config::CheckerOptions;
use crate::error::Result;
use crate::github::{GitHubClient, SyncOutcome, GITHUB_API_BASE};

/// Runs one resolve → compare → sync pass against a configured fork
pub struct ForkSyncChecker {
    base_url: String,
}

impl ForkSyncChecker {
    /// Checker against the production GitHub API
    pub fn new() -> Self {
        Self {
            base_url: GITHUB_API_BASE.to_string(),
        }
    }

    /// Checker against an alternate API base (test servers)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Run one check invocation.
    ///
    /// Validates the options, resolves the fork's parent, measures how far
    /// the fork's target branch is behind, and requests a merge-upstream if
    /// it is behind at all. Returns the merge endpoint's payload when a sync
    /// was requested, `None` when the fork was already up to date.
    pub async fn check(&self, options: &CheckerOptions) -> Result<Option<SyncOutcome>> {
        let config = options.validate()?;
        let client = GitHubClient::with_base_url(&config, &self.base_url);

        let repo = client.resolve(&config.repository).await?;
        info!(
            parent = %repo.parent_url,
            owner = %repo.fork_owner,
            "resolved fork parent"
        );

        let comparison = client
            .compare(&repo, &config.source_branch, &config.target_branch)
            .await?;

        if comparison.behind_by == 0 {
            info!("already up to date, nothing to sync");
            return Ok(None);
        }

        info!(
            "we are at {} commit(s) behind {}",
            comparison.behind_by, comparison.base
        );

        let outcome = client
            .merge_upstream(&config.repository, &config.target_branch)
            .await?;

        Ok(Some(outcome))
    }
}

impl Default for ForkSyncChecker {
    fn default() -> Self {
        Self::new()
    }
}
