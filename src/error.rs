//! Error taxonomy for a single check invocation.
//!
//! Every error is local to one check: nothing is retried within an
//! invocation, and the next scheduled run starts from scratch.

use thiserror::Error;

/// Result type alias for checker operations
pub type Result<T> = std::result::Result<T, CheckError>;

/// Errors that abort a check invocation
#[derive(Debug, Error)]
pub enum CheckError {
    /// Invalid or missing configuration, detected before any network call.
    /// Carries every violated constraint, not just the first.
    #[error("invalid configuration: {}", .0.join("; "))]
    Config(Vec<String>),

    /// Non-2xx response from a read endpoint
    #[error("remote API returned status {status}: {body}")]
    Remote { status: u16, body: String },

    /// Response body was malformed or missing an expected field
    #[error("could not parse remote response: {0}")]
    Parse(String),

    /// Transport-level failure (connection, TLS, timeout); no HTTP status
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl CheckError {
    /// Violations collected during configuration validation, if any
    pub fn config_violations(&self) -> Option<&[String]> {
        match self {
            CheckError::Config(violations) => Some(violations),
            _ => None,
        }
    }
}
