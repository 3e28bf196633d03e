//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Loads config and context through the [`Session`]
//! 3. Formats and displays output through [`crate::ui::output`]
//!
//! # Async Commands
//!
//! Commands that call the lakeFS API (`repo list`, `server version`) are
//! async underneath. Their sync entry points build a tokio runtime and
//! `block_on` an `*_async` function that takes `&dyn LakeFsApi`, which is
//! what the tests drive with the mock client.
//!
//! [`Session`]: crate::cli::Session

mod completion;
mod config_cmd;
mod context_cmd;
mod model_cmd;
mod repo;
mod server;

// Re-export command functions for testing and direct invocation
pub use completion::{completion, write_completion};
pub use config_cmd::{
    get as config_get, init as config_init, list as config_list, login as config_login,
    set as config_set, show_path as config_show_path,
};
pub use context_cmd::{
    clear as context_clear, set_ref as context_set_ref, set_repo as context_set_repo,
    show as context_show,
};
pub use model_cmd::{build_copy_source, copy_source, decode_as, validate as model_validate};
pub use repo::{list as repo_list, list_async as repo_list_async};
pub use server::{version as server_version, version_async as server_version_async};

use anyhow::Result;
use tracing::debug;

use crate::cli::args::{
    Command, ConfigAction, ContextAction, ModelAction, RepoAction, ServerAction,
};
use crate::cli::Session;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, session: &Session) -> Result<()> {
    debug!(config = %session.config_path.display(), "dispatching {:?}", command);

    match command {
        Command::Config { action } => match action {
            ConfigAction::Init {
                default_format,
                force,
            } => config_cmd::init(session, default_format, force),
            ConfigAction::Login => config_cmd::login(session),
            ConfigAction::Get { key } => config_cmd::get(session, &key),
            ConfigAction::Set { key, value } => config_cmd::set(session, &key, &value),
            ConfigAction::List => config_cmd::list(session),
            ConfigAction::ShowPath => config_cmd::show_path(session),
        },

        Command::Context { action } => match action {
            ContextAction::Show => context_cmd::show(session),
            ContextAction::SetRepo { uri } => context_cmd::set_repo(session, &uri),
            ContextAction::SetRef { reference } => context_cmd::set_ref(session, &reference),
            ContextAction::Clear { repo, reference } => {
                context_cmd::clear(session, repo, reference)
            }
        },

        Command::Repo { action } => match action {
            RepoAction::List { after, amount } => repo::list(session, after, amount),
        },

        Command::Server { action } => match action {
            ServerAction::Version => server::version(session),
        },

        Command::Model { action } => match action {
            ModelAction::CopySource { path, range } => {
                model_cmd::copy_source(session, &path, range)
            }
            ModelAction::Validate { kind, file } => model_cmd::validate(session, kind, &file),
        },

        Command::Completion { shell } => completion::completion(shell),
    }
}
