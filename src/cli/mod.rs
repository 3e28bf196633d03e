//! cli
//!
//! Command-line interface layer for lctl.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and apply per-invocation overrides
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers that talk to lakeFS take a
//! `&dyn LakeFsApi`, so they run the same against the HTTP client and the
//! mock. Configuration on disk is only changed by the `config` and
//! `context` commands; global flags never get persisted.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::client::HttpLakeFsClient;
use crate::core::config::{Config, Configuration, OutputFormat};
use crate::ui::output::{Output, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);
    let session = Session::from_cli(&cli)?;
    commands::dispatch(cli.command, &session)
}

/// Install the log subscriber on stderr.
fn init_tracing(debug: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(log_filter(debug))
        .init();
}

/// `--debug` wins over `RUST_LOG`.
fn log_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("lctl=debug,hyper=warn,reqwest=warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Per-invocation settings shared by every command.
#[derive(Debug, Clone)]
pub struct Session {
    /// Config file location (may not exist yet)
    pub config_path: PathBuf,
    pub overrides: Overrides,
    pub verbosity: Verbosity,
    /// `--output`, if given
    pub output_format: Option<OutputFormat>,
}

/// Values from global flags that take precedence over the config file.
#[derive(Clone, Default)]
pub struct Overrides {
    pub endpoint_url: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overrides")
            .field("endpoint_url", &self.endpoint_url)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Session {
    /// Build a session from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = Config::resolve_path(cli.config.as_deref())
            .context("Failed to determine config file location")?;
        Ok(Self {
            config_path,
            overrides: Overrides {
                endpoint_url: cli.endpoint_url.clone(),
                access_key_id: cli.access_key_id.clone(),
                secret_access_key: cli.secret_access_key.clone(),
            },
            verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
            output_format: cli.output,
        })
    }

    /// A session reading `config_path` with no overrides.
    pub fn for_path(config_path: impl AsRef<Path>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            overrides: Overrides::default(),
            verbosity: Verbosity::Normal,
            output_format: None,
        }
    }

    /// Load the config file as stored on disk.
    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path).context("Failed to load config")
    }

    /// Settings with the global flag overrides applied.
    pub fn effective(&self, config: &Config) -> Configuration {
        let mut settings = config.settings.clone();
        if let Some(url) = &self.overrides.endpoint_url {
            settings.server.endpoint_url = url.clone();
        }
        if let Some(id) = &self.overrides.access_key_id {
            settings.credentials.access_key_id = Some(id.clone());
        }
        if let Some(secret) = &self.overrides.secret_access_key {
            settings.credentials.secret_access_key = Some(secret.clone());
        }
        settings
    }

    /// Output settings: `--output` wins over the configured default.
    pub fn output(&self, config: &Config) -> Output {
        let format = self.output_format.unwrap_or_else(|| config.default_format());
        Output::new(format, self.verbosity)
    }

    /// HTTP client for the effective settings.
    pub fn client(&self, config: &Config) -> Result<HttpLakeFsClient> {
        let settings = self.effective(config);
        settings.validate().context("Invalid server settings")?;
        Ok(HttpLakeFsClient::from_config(&settings))
    }
}
