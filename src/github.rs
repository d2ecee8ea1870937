//! GitHub REST client for the three check endpoints.
//!
//! The checker talks to exactly three endpoints: repository metadata,
//! branch comparison, and merge-upstream. Every request carries the same
//! headers; every response gets its status logged, and its body logged too
//! when debug mode is on. The token travels only in the Authorization
//! header and is never written to the log.

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::CheckConfig;
use crate::error::{CheckError, Result};

/// Production GitHub API base URL
pub const GITHUB_API_BASE: &str = "https://api.github.com";

const ACCEPT_HEADER: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// Metadata about the fork needed to build the comparison request
#[derive(Debug, Clone)]
pub struct RepositoryInfo {
    /// API URL of the upstream parent repository
    pub parent_url: String,
    /// Login of the fork's owner
    pub fork_owner: String,
}

/// Divergence between the upstream branch and the fork's branch
#[derive(Debug, Clone)]
pub struct CompareResult {
    /// Commits present upstream but missing from the fork's target branch
    pub behind_by: u64,
    /// Base label of the comparison (the upstream source branch)
    pub base: String,
    /// Head label of the comparison ("owner:branch" on the fork)
    pub head: String,
}

/// Raw payload returned by the merge-upstream endpoint, forwarded verbatim
/// to downstream consumers
pub type SyncOutcome = Value;

/// Minimal authenticated client over the GitHub REST API
pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: String,
    log_bodies: bool,
}

impl GitHubClient {
    /// Create a client against the production API
    pub fn new(config: &CheckConfig) -> Self {
        Self::with_base_url(config, GITHUB_API_BASE)
    }

    /// Create a client against an alternate API base (test servers)
    pub fn with_base_url(config: &CheckConfig, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token: config.token.clone(),
            log_bodies: config.debug,
        }
    }

    /// Fetch fork metadata: the upstream parent's API URL and the fork
    /// owner's login
    pub async fn resolve(&self, repository: &str) -> Result<RepositoryInfo> {
        let url = format!("{}/repos/{}", self.base_url, repository);
        let payload = self.get_json(&url).await?;

        let parent_url = payload
            .pointer("/parent/url")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                CheckError::Parse(
                    "repository metadata has no parent.url (is the repository a fork?)".to_string(),
                )
            })?
            .to_string();

        let fork_owner = payload
            .pointer("/owner/login")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                CheckError::Parse("repository metadata has no owner.login".to_string())
            })?
            .to_string();

        Ok(RepositoryInfo {
            parent_url,
            fork_owner,
        })
    }

    /// Compare the upstream source branch (base) against the fork's target
    /// branch (head). The direction is fixed: it determines what behind_by
    /// means, so callers must not swap the labels.
    pub async fn compare(
        &self,
        repo: &RepositoryInfo,
        source_branch: &str,
        target_branch: &str,
    ) -> Result<CompareResult> {
        let base = source_branch.to_string();
        let head = format!("{}:{}", repo.fork_owner, target_branch);
        let url = format!("{}/compare/{}...{}", repo.parent_url, base, head);
        let payload = self.get_json(&url).await?;

        let behind_by = payload
            .get("behind_by")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                CheckError::Parse("compare response has no behind_by count".to_string())
            })?;

        Ok(CompareResult {
            behind_by,
            base,
            head,
        })
    }

    /// Request a fast-forward of the fork's branch from its upstream.
    ///
    /// The merge endpoint reports conflicts and failures inside its JSON
    /// body, so a non-2xx status is still returned as a payload rather than
    /// an error; downstream consumers decide what counts as a usable result.
    pub async fn merge_upstream(&self, repository: &str, branch: &str) -> Result<SyncOutcome> {
        let url = format!("{}/repos/{}/merge-upstream", self.base_url, repository);
        let request = self
            .authed(self.http.post(&url))
            .json(&serde_json::json!({ "branch": branch }));

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        self.log_response(&url, status.as_u16(), &body);

        serde_json::from_str(&body).map_err(|e| {
            CheckError::Parse(format!("merge-upstream response is not valid JSON: {}", e))
        })
    }

    /// Authenticated GET returning the parsed JSON body; non-2xx responses
    /// abort with a remote error
    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.authed(self.http.get(url)).send().await?;
        let status = response.status();
        let body = response.text().await?;
        self.log_response(url, status.as_u16(), &body);

        if !status.is_success() {
            return Err(CheckError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| CheckError::Parse(format!("response from {} is not valid JSON: {}", url, e)))
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Accept", ACCEPT_HEADER)
            .header("Authorization", format!("token {}", self.token))
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    fn log_response(&self, url: &str, status: u16, body: &str) {
        info!("request status: {}", status);

        if self.log_bodies {
            debug!(%url, "response body: {}", body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckerOptions;

    fn test_config() -> CheckConfig {
        CheckerOptions {
            repository: "forker/repo".to_string(),
            token: "t0ken".to_string(),
            ..Default::default()
        }
        .validate()
        .expect("test options should validate")
    }

    #[test]
    fn test_client_uses_configured_base_url() {
        let config = test_config();
        let client = GitHubClient::with_base_url(&config, "http://127.0.0.1:9999");

        assert_eq!(client.base_url, "http://127.0.0.1:9999");
        assert!(!client.log_bodies);
    }

    #[test]
    fn test_debug_flag_enables_body_logging() {
        let mut options = CheckerOptions {
            repository: "forker/repo".to_string(),
            token: "t0ken".to_string(),
            ..Default::default()
        };
        options.debug = "true".to_string();

        let config = options.validate().expect("should validate");
        let client = GitHubClient::new(&config);

        assert!(client.log_bodies);
        assert_eq!(client.base_url, GITHUB_API_BASE);
    }
}
