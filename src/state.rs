//! Persisted check bookkeeping for the liveness contract.
//!
//! The checker records two timestamps after each run: when it last emitted
//! an event and when it last hit an error. That is all the host needs to
//! answer "is this checker still working?" — the evaluation itself lives in
//! [`crate::health`].

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Timestamps of the most recent emitted event and the most recent error
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckerState {
    pub last_event_at: Option<DateTime<Utc>>,
    pub last_error_at: Option<DateTime<Utc>>,
}

impl CheckerState {
    /// Load state from a JSON file; a missing file yields the default state
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {:?}", path))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {:?}", path))
    }

    /// Save state to a JSON file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create state directory: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize state")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write state file: {:?}", path))?;

        Ok(())
    }

    /// Record that an event was emitted
    pub fn record_event(&mut self, at: DateTime<Utc>) {
        self.last_event_at = Some(at);
    }

    /// Record that a check failed
    pub fn record_error(&mut self, at: DateTime<Utc>) {
        self.last_error_at = Some(at);
    }

    /// Get the default state file path (XDG compliant)
    pub fn default_state_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().context("Failed to get user data directory")?;

        Ok(data_dir.join("forksentry").join("state.json"))
    }
}
