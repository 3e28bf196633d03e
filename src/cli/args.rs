//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file
//! - `--output <text|json|yaml|table>`: Override the configured output format
//! - `--endpoint-url`, `--access-key-id`, `--secret-access-key`: Override
//!   the configured server and credentials for this invocation
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::OutputFormat;

/// lctl - a context-aware command-line client for lakeFS
#[derive(Parser, Debug)]
#[command(name = "lctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: $LCTL_CONFIG or ~/.lctl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format (overrides output.default_format)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// lakeFS endpoint URL (overrides server.endpoint_url)
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Access key id (overrides credentials.access_key_id)
    #[arg(long, global = true, value_name = "ID")]
    pub access_key_id: Option<String>,

    /// Secret access key (overrides credentials.secret_access_key)
    #[arg(long, global = true, value_name = "KEY")]
    pub secret_access_key: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the lctl configuration file
    #[command(
        name = "config",
        after_help = "\
WORKFLOW EXAMPLES:
    # First-time setup
    lctl config init --endpoint-url https://lakefs.example.com --access-key-id AKIA...

    # Interactive setup (secret is not echoed)
    lctl config login

    # Switch to JSON output by default
    lctl config set output.default_format json"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show or change the current repository and ref
    #[command(
        name = "context",
        long_about = "Show or change the current repository and ref.\n\n\
            Partial paths given to other commands (like `data/a.csv` or \
            `dev:/a.csv`) are resolved against this context.",
        after_help = "\
WORKFLOW EXAMPLES:
    lctl context set-repo lakefs://my-repo
    lctl context set-ref main
    lctl model copy-source data/a.csv      # -> lakefs://my-repo/main/data/a.csv"
    )]
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Work with repositories
    #[command(name = "repo")]
    Repo {
        #[command(subcommand)]
        action: RepoAction,
    },

    /// Query the lakeFS server
    #[command(name = "server")]
    Server {
        #[command(subcommand)]
        action: ServerAction,
    },

    /// Build and validate API model documents
    #[command(name = "model")]
    Model {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for lctl commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    lctl completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    lctl completion zsh >> ~/.zshrc

    # Fish
    lctl completion fish > ~/.config/fish/completions/lctl.fish

    # PowerShell
    lctl completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Write a new config file
    ///
    /// Takes the endpoint and credentials from the global --endpoint-url,
    /// --access-key-id and --secret-access-key flags.
    Init {
        /// Default output format
        #[arg(long, value_enum)]
        default_format: Option<OutputFormat>,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Prompt for endpoint and credentials, then save them
    Login,
    /// Get a configuration value
    Get {
        /// Configuration key, e.g. server.endpoint_url
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
    /// Print the config file path
    ShowPath,
}

/// Context subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ContextAction {
    /// Show the current repository and ref
    Show,
    /// Set the current repository
    SetRepo {
        /// Repository URI, e.g. lakefs://my-repo
        uri: String,
    },
    /// Set the current ref (branch, tag or commit)
    SetRef {
        /// Ref name
        reference: String,
    },
    /// Clear the context (both parts unless one is selected)
    Clear {
        /// Clear only the repository
        #[arg(long)]
        repo: bool,
        /// Clear only the ref
        #[arg(long = "ref")]
        reference: bool,
    },
}

/// Repository subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum RepoAction {
    /// List repositories
    List {
        /// Start listing after this repository id
        #[arg(long)]
        after: Option<String>,
        /// Maximum number of repositories to return
        #[arg(long)]
        amount: Option<u32>,
    },
}

/// Server subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ServerAction {
    /// Show the server version
    Version,
}

/// Model subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ModelAction {
    /// Print the CopyPartSource document for a lakeFS path
    #[command(after_help = "\
EXAMPLES:
    lctl model copy-source lakefs://repo/main/data/a.csv
    lctl model copy-source dev:/data/a.csv --range bytes=0-1023")]
    CopySource {
        /// Full lakefs:// URI or a path relative to the context
        path: String,
        /// HTTP byte range, e.g. bytes=0-1023
        #[arg(long)]
        range: Option<String>,
    },
    /// Decode a JSON document as a model and print it
    Validate {
        /// Model to decode as
        #[arg(value_enum)]
        kind: ModelKind,
        /// JSON file, or - for stdin
        file: PathBuf,
    },
}

/// Models that `model validate` understands
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    CopyPartSource,
    VersionConfig,
    Repository,
    Pagination,
    RepositoryList,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
