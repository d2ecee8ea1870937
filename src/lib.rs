//! ForkSentry - Scheduled fork reconciliation checker
//!
//! ForkSentry keeps a GitHub fork in step with its upstream parent. A host
//! scheduler runs it periodically; each run resolves the fork's parent,
//! measures how far the fork's branch has fallen behind, and requests a
//! fast-forward merge-upstream when it has. The merge endpoint's response is
//! emitted verbatim as an event for downstream consumers.
//!
//! ## Modules
//!
//! - [`config`]: String-typed inbound options and boundary validation
//! - [`checker`]: The resolve → compare → sync pipeline
//! - [`github`]: REST client for the three check endpoints
//! - [`health`]: Liveness evaluation from recorded state
//! - [`state`]: Persisted event/error timestamps

pub mod checker;
pub mod config;
pub mod error;
pub mod github;
pub mod health;
pub mod state;

pub use checker::ForkSyncChecker;
pub use config::{CheckConfig, CheckerOptions};
pub use error::CheckError;
pub use github::{CompareResult, GitHubClient, RepositoryInfo, SyncOutcome};
pub use state::CheckerState;
