//! context command - Show or change the current repository and ref
//!
//! The context is what partial paths resolve against, see
//! [`crate::core::uri::resolve`].

use anyhow::{bail, Context as _, Result};
use serde_json::{json, Value};

use crate::cli::Session;
use crate::core::uri::LakeFsUri;
use crate::ui::output;

/// Print the current context.
pub fn show(session: &Session) -> Result<()> {
    let config = session.load_config()?;
    let context = config.load_context().context("Failed to read context")?;

    let out = session.output(&config);
    if !out.is_text() {
        let document = json!({
            "current_repo_uri": context.current_repo_uri.as_deref().map_or(Value::Null, Value::from),
            "current_ref": context.current_ref.as_deref().map_or(Value::Null, Value::from),
        });
        out.result(out.render_value(&document)?);
        return Ok(());
    }

    let repo = context.current_repo_uri.as_deref().unwrap_or("(not set)");
    let reference = context.current_ref.as_deref().unwrap_or("(not set)");
    println!("Repository: {}", repo);
    println!("Ref: {}", reference);
    Ok(())
}

/// Set the current repository.
///
/// Only the repository part is stored. A ref in the URI becomes the
/// current ref.
pub fn set_repo(session: &Session, raw: &str) -> Result<()> {
    let uri = LakeFsUri::parse(raw).context("Invalid repository URI")?;
    if uri.path.as_deref().is_some_and(|p| p != "/") {
        bail!("Expected a repository URI like lakefs://repo, got a path: {}", raw);
    }

    let config = session.load_config()?;
    let mut context = config.load_context().context("Failed to read context")?;
    let repo_uri = LakeFsUri::repository(uri.repository.clone()).to_string();
    context.current_repo_uri = Some(repo_uri.clone());
    if let Some(reference) = uri.reference {
        context.current_ref = Some(reference);
    }
    config
        .save_context(&context)
        .context("Failed to write context")?;

    output::success(format!("Current repository: {}", repo_uri), session.verbosity);
    Ok(())
}

/// Set the current ref.
pub fn set_ref(session: &Session, reference: &str) -> Result<()> {
    let reference = reference.trim();
    if reference.is_empty() {
        bail!("Ref must not be empty");
    }
    if reference.contains('/') || reference.contains(':') {
        bail!("Invalid ref '{}': must not contain '/' or ':'", reference);
    }

    let config = session.load_config()?;
    let mut context = config.load_context().context("Failed to read context")?;
    context.current_ref = Some(reference.to_string());
    config
        .save_context(&context)
        .context("Failed to write context")?;

    output::success(format!("Current ref: {}", reference), session.verbosity);
    Ok(())
}

/// Clear the context. With neither flag set, both parts are cleared.
pub fn clear(session: &Session, repo: bool, reference: bool) -> Result<()> {
    let both = !repo && !reference;
    let config = session.load_config()?;
    let mut context = config.load_context().context("Failed to read context")?;

    if both || repo {
        context.current_repo_uri = None;
    }
    if both || reference {
        context.current_ref = None;
    }

    config
        .save_context(&context)
        .context("Failed to write context")?;

    output::success("Context cleared", session.verbosity);
    Ok(())
}
