//! core::config::context
//!
//! The CLI context: the repository and ref that partial paths resolve
//! against. Stored as `context.toml` next to the config file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{write_toml_atomic, ConfigError};

/// Current repository and ref.
///
/// # Example
///
/// ```toml
/// current_repo_uri = "lakefs://my-repo"
/// current_ref = "main"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CliContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_repo_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_ref: Option<String>,
}

impl CliContext {
    pub fn new(repo_uri: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            current_repo_uri: Some(repo_uri.into()),
            current_ref: Some(reference.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current_repo_uri.is_none() && self.current_ref.is_none()
    }

    /// Load from `path`. A missing or blank file is an empty context.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no context file");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write atomically to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        write_toml_atomic(path, self)
    }
}
