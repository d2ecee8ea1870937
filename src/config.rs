//! Configuration management and boundary validation.
//!
//! Inbound settings arrive as free-form strings (the scheduler that drives
//! the checker passes everything as text). [`CheckerOptions`] preserves that
//! surface; [`CheckerOptions::validate`] parses it into the strongly typed
//! [`CheckConfig`] used by the rest of the pipeline, collecting every
//! violation so the operator sees them all at once.

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::CheckError;

/// Raw string-typed options as supplied by the host
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CheckerOptions {
    /// Fork to check, in "owner/name" form
    #[serde(default)]
    pub repository: String,

    /// Branch on the upstream parent to compare against
    #[serde(default = "default_branch")]
    pub src_branch: String,

    /// Branch on the fork to fast-forward
    #[serde(default = "default_branch")]
    pub tgt_branch: String,

    /// Verbose mode; logs full response bodies when "true"
    #[serde(default = "default_debug")]
    pub debug: String,

    /// Maximum days without an emitted event before the checker is
    /// considered not working
    #[serde(default = "default_receive_period")]
    pub expected_receive_period_in_days: String,

    /// GitHub access token
    #[serde(default)]
    pub token: String,
}

/// Validated, strongly typed configuration for one check invocation
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub repository: String,
    pub source_branch: String,
    pub target_branch: String,
    pub token: String,
    pub debug: bool,
    pub max_silence_days: i64,
}

// Default value functions
fn default_branch() -> String {
    "master".to_string()
}
fn default_debug() -> String {
    "false".to_string()
}
fn default_receive_period() -> String {
    "2".to_string()
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            repository: String::new(),
            src_branch: default_branch(),
            tgt_branch: default_branch(),
            debug: default_debug(),
            expected_receive_period_in_days: default_receive_period(),
            token: String::new(),
        }
    }
}

impl CheckerOptions {
    /// Load options from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut options: CheckerOptions = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        options.apply_token_fallback();

        Ok(options)
    }

    /// Save options to a YAML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Get the default configuration file path (XDG compliant)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = config_dir().context("Failed to get user config directory")?;

        Ok(config_dir.join("forksentry").join("config.yml"))
    }

    /// Fall back to the GITHUB_TOKEN environment variable when the config
    /// file does not supply a token
    pub fn apply_token_fallback(&mut self) {
        if !self.token.trim().is_empty() {
            return;
        }

        if let Ok(token) = env::var("GITHUB_TOKEN") {
            if !token.trim().is_empty() {
                debug!("Using token from GITHUB_TOKEN environment variable");
                self.token = token;
            }
        }
    }

    /// Parse the raw options into a typed configuration, collecting every
    /// violated constraint before failing
    pub fn validate(&self) -> Result<CheckConfig, CheckError> {
        let mut violations = Vec::new();

        for (value, field) in [
            (&self.repository, "repository"),
            (&self.src_branch, "src_branch"),
            (&self.tgt_branch, "tgt_branch"),
            (&self.token, "token"),
        ] {
            if value.trim().is_empty() {
                violations.push(format!("{} is a required field", field));
            }
        }

        let debug = match parse_bool(&self.debug) {
            Some(flag) => flag,
            None => {
                violations.push("if provided, debug must be true or false".to_string());
                false
            }
        };

        let max_silence_days = match self.expected_receive_period_in_days.trim().parse::<i64>() {
            Ok(days) if days > 0 => days,
            _ => {
                violations.push(
                    "expected_receive_period_in_days must be a positive integer".to_string(),
                );
                0
            }
        };

        if !violations.is_empty() {
            return Err(CheckError::Config(violations));
        }

        Ok(CheckConfig {
            repository: self.repository.trim().to_string(),
            source_branch: self.src_branch.trim().to_string(),
            target_branch: self.tgt_branch.trim().to_string(),
            token: self.token.trim().to_string(),
            debug,
            max_silence_days,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
