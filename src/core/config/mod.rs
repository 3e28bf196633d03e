//! core::config
//!
//! Configuration schema, loading and persistence.
//!
//! # Locations
//!
//! The config file is the first of:
//! 1. An explicit path (the `--config` flag)
//! 2. `$LCTL_CONFIG` if set
//! 3. `~/.lctl/config.toml` (canonical write location)
//!
//! The CLI context lives in `context.toml` in the same directory.
//!
//! A missing config file is not an error; defaults are used and the file
//! is created on the first write.
//!
//! # Keys
//!
//! Individual settings are addressed by dotted keys, see [`ConfigKey`].
//!
//! # Example
//!
//! ```no_run
//! use lctl::core::config::{Config, ConfigKey};
//!
//! let mut config = Config::load(None).unwrap();
//! println!("endpoint: {}", config.endpoint_url());
//!
//! config.set(ConfigKey::DefaultFormat, "json").unwrap();
//! config.save().unwrap();
//! ```

pub mod context;
pub mod schema;

pub use context::CliContext;
pub use schema::{Configuration, Credentials, OutputConfig, OutputFormat, ServerConfig};

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

/// Environment variable overriding the config file path.
pub const CONFIG_ENV: &str = "LCTL_CONFIG";

/// Config file name inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Context file name inside the config directory.
pub const CONTEXT_FILE: &str = "context.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown config key '{0}', expected one of: {keys}", keys = ConfigKey::names().join(", "))]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// A settable configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    EndpointUrl,
    AccessKeyId,
    SecretAccessKey,
    DefaultFormat,
}

impl ConfigKey {
    pub const ALL: &'static [ConfigKey] = &[
        ConfigKey::EndpointUrl,
        ConfigKey::AccessKeyId,
        ConfigKey::SecretAccessKey,
        ConfigKey::DefaultFormat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::EndpointUrl => "server.endpoint_url",
            ConfigKey::AccessKeyId => "credentials.access_key_id",
            ConfigKey::SecretAccessKey => "credentials.secret_access_key",
            ConfigKey::DefaultFormat => "output.default_format",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(ConfigKey::as_str).collect()
    }

    /// Whether the value should be masked in listings.
    pub fn is_secret(&self) -> bool {
        matches!(self, ConfigKey::SecretAccessKey)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

/// Loaded configuration together with where it lives.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Configuration,
    path: PathBuf,
    loaded: bool,
}

impl Config {
    /// Load configuration, see the module docs for the search order.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated, or if no location can be determined.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = Self::resolve_path(explicit)?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self {
                settings: Configuration::default(),
                path: path.to_path_buf(),
                loaded: false,
            });
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let settings: Configuration =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        settings.validate()?;

        debug!(path = %path.display(), "loaded config");
        Ok(Self {
            settings,
            path: path.to_path_buf(),
            loaded: true,
        })
    }

    /// Determine the config file path without touching the filesystem.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let env = std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        resolve_path_from(explicit, env, dirs::home_dir())
    }

    /// Wrap already-built settings, e.g. for `config init`.
    pub fn new(settings: Configuration, path: PathBuf) -> Self {
        Self {
            settings,
            path,
            loaded: false,
        }
    }

    /// Path of the config file (whether or not it exists yet).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the settings came from an existing file.
    pub fn is_loaded_from_file(&self) -> bool {
        self.loaded
    }

    /// Path of the context file next to the config file.
    pub fn context_path(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) => dir.join(CONTEXT_FILE),
            None => PathBuf::from(CONTEXT_FILE),
        }
    }

    /// Load the CLI context stored next to this config.
    pub fn load_context(&self) -> Result<CliContext, ConfigError> {
        CliContext::load(&self.context_path())
    }

    /// Persist the CLI context next to this config.
    pub fn save_context(&self, context: &CliContext) -> Result<(), ConfigError> {
        context.save(&self.context_path())
    }

    /// Validate and write the settings atomically.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.settings.validate()?;
        write_toml_atomic(&self.path, &self.settings)
    }

    /// Read one setting. Unset credentials read as an empty string.
    pub fn get(&self, key: ConfigKey) -> String {
        let s = &self.settings;
        match key {
            ConfigKey::EndpointUrl => s.server.endpoint_url.clone(),
            ConfigKey::AccessKeyId => s.credentials.access_key_id.clone().unwrap_or_default(),
            ConfigKey::SecretAccessKey => {
                s.credentials.secret_access_key.clone().unwrap_or_default()
            }
            ConfigKey::DefaultFormat => s.output.default_format.to_string(),
        }
    }

    /// Change one setting in memory. Call [`Config::save`] to persist.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` for a malformed endpoint or unknown format.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        let s = &mut self.settings;
        match key {
            ConfigKey::EndpointUrl => {
                schema::validate_endpoint(value)?;
                s.server.endpoint_url = value.to_string();
            }
            ConfigKey::AccessKeyId => s.credentials.access_key_id = non_empty(value),
            ConfigKey::SecretAccessKey => s.credentials.secret_access_key = non_empty(value),
            ConfigKey::DefaultFormat => s.output.default_format = value.parse()?,
        }
        Ok(())
    }

    /// Every key with its value, secrets masked.
    pub fn entries(&self) -> Vec<(ConfigKey, String)> {
        ConfigKey::ALL
            .iter()
            .map(|&key| {
                let value = self.get(key);
                let shown = if key.is_secret() { mask(&value) } else { value };
                (key, shown)
            })
            .collect()
    }

    pub fn endpoint_url(&self) -> &str {
        &self.settings.server.endpoint_url
    }

    pub fn default_format(&self) -> OutputFormat {
        self.settings.output.default_format
    }
}

fn resolve_path_from(
    explicit: Option<&Path>,
    env: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env {
        return Ok(path);
    }
    let home = home.ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".lctl").join(CONFIG_FILE))
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Mask all but the last four characters.
fn mask(value: &str) -> String {
    let count = value.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = value.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

/// Write a TOML file atomically.
///
/// Creates parent directories if needed. Writes to a temp file in the same
/// directory, then renames over the target.
pub(crate) fn write_toml_atomic<T: serde::Serialize>(
    path: &Path,
    value: &T,
) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents =
        toml::to_string_pretty(value).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

    let temp_path = path.with_extension("toml.tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

    file.sync_all().map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), "wrote config file");
    Ok(())
}
