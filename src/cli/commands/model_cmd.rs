//! model command - Build and validate API model documents
//!
//! `copy-source` resolves a path against the context and prints the
//! resulting `CopyPartSource`. `validate` decodes a JSON document as one of
//! the API models, which checks required fields, field kinds and
//! additional-property values, and prints it back.

use std::fmt::Display;
use std::io::Read;
use std::path::Path;

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::cli::args::ModelKind;
use crate::cli::Session;
use crate::core::config::CliContext;
use crate::core::uri::{self, DefaultPathKind};
use crate::model::{
    CopyPartSource, Model, Pagination, Repository, RepositoryList, VersionConfig,
};
use crate::ui::output::Output;

/// Print the `CopyPartSource` for `path`.
pub fn copy_source(session: &Session, path: &str, range: Option<String>) -> Result<()> {
    let config = session.load_config()?;
    let context = config.load_context().context("Failed to read context")?;
    let out = session.output(&config);

    let source = build_copy_source(path, &context, range)?;
    out.result(out.render_model(&source)?);
    Ok(())
}

/// Resolve `path` against `context` into a copy source.
pub fn build_copy_source(
    path: &str,
    context: &CliContext,
    range: Option<String>,
) -> Result<CopyPartSource> {
    let resolved = uri::resolve(path, Some(context), DefaultPathKind::Object)
        .with_context(|| format!("Cannot resolve '{}'", path))?;
    if resolved.resolved {
        debug!(input = %resolved.original_input, uri = %resolved.uri, "resolved against context");
    }

    let mut source = CopyPartSource::from_uri(&resolved.uri)
        .with_context(|| format!("'{}' does not name an object", resolved.uri))?;
    source.set_range(range);
    Ok(source)
}

/// Decode `file` (or stdin for `-`) as `kind` and print it.
pub fn validate(session: &Session, kind: ModelKind, file: &Path) -> Result<()> {
    let config = session.load_config()?;
    let out = session.output(&config);
    let text = read_document(file)?;

    let rendered = decode_as(kind, &text, &out)?;
    out.result(rendered);
    Ok(())
}

/// Decode `text` as `kind` and render it for `out`.
pub fn decode_as(kind: ModelKind, text: &str, out: &Output) -> Result<String> {
    match kind {
        ModelKind::CopyPartSource => decode_render::<CopyPartSource>(text, out),
        ModelKind::VersionConfig => decode_render::<VersionConfig>(text, out),
        ModelKind::Repository => decode_render::<Repository>(text, out),
        ModelKind::Pagination => decode_render::<Pagination>(text, out),
        ModelKind::RepositoryList => decode_render::<RepositoryList>(text, out),
    }
}

fn decode_render<M: Model + Display>(text: &str, out: &Output) -> Result<String> {
    let model = M::from_json(text).with_context(|| format!("Invalid {} document", M::NAME))?;
    Ok(out.render_model(&model)?)
}

fn read_document(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}
