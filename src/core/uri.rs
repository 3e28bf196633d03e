//! core::uri
//!
//! `lakefs://` URIs and their resolution against the CLI context.
//!
//! # Forms
//!
//! A full URI names a repository, optionally a ref, optionally a path:
//!
//! ```text
//! lakefs://repo
//! lakefs://repo/main
//! lakefs://repo/main/data/a.csv
//! ```
//!
//! Anything else is a partial path resolved with [`resolve`] against the
//! current repository and ref stored in [`CliContext`]:
//!
//! | Input          | Meaning                                          |
//! |----------------|--------------------------------------------------|
//! | `""`           | root of the context ref                          |
//! | `dev:/a.csv`   | `a.csv` on ref `dev` (overrides context ref)     |
//! | `data/a.csv`   | `data/a.csv` on the context ref                  |
//! | `dev`          | ref `dev` when resolving as [`DefaultPathKind::Ref`] |
//!
//! # Example
//!
//! ```
//! use lctl::core::config::CliContext;
//! use lctl::core::uri::{resolve, DefaultPathKind};
//!
//! let ctx = CliContext::new("lakefs://repo", "main");
//! let resolved = resolve("data/a.csv", Some(&ctx), DefaultPathKind::Object).unwrap();
//!
//! assert!(resolved.resolved);
//! assert_eq!(resolved.uri.to_string(), "lakefs://repo/main/data/a.csv");
//! ```

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::core::config::CliContext;

/// URI scheme prefix.
pub const SCHEME_PREFIX: &str = "lakefs://";

/// Errors from URI parsing and resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UriError {
    #[error("'{0}' is not a lakeFS URI (expected lakefs://repo[/ref[/path]])")]
    InvalidScheme(String),

    #[error("lakeFS URI '{0}' has an empty repository")]
    EmptyRepository(String),

    #[error("lakeFS URI '{0}' has an empty ref")]
    EmptyRef(String),

    #[error("cannot resolve an empty path without repository and ref context")]
    EmptyPathWithoutContext,

    #[error("repository context not set; cannot resolve partial path '{0}'")]
    NoRepositoryContext(String),

    #[error("ref context not set; cannot resolve '{0}' without an explicit ref like 'main:/path'")]
    NoRefContext(String),

    #[error("invalid repository context URI '{uri}': {reason}")]
    InvalidContext { uri: String, reason: Box<UriError> },
}

/// A parsed `lakefs://repo[/ref[/path]]` URI.
///
/// `path`, when present, always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LakeFsUri {
    pub repository: String,
    pub reference: Option<String>,
    pub path: Option<String>,
}

impl LakeFsUri {
    /// Parse a full URI.
    ///
    /// # Errors
    ///
    /// - `InvalidScheme` if `raw` does not start with `lakefs://`
    /// - `EmptyRepository` / `EmptyRef` for empty segments
    pub fn parse(raw: &str) -> Result<Self, UriError> {
        let rest = raw
            .strip_prefix(SCHEME_PREFIX)
            .ok_or_else(|| UriError::InvalidScheme(raw.to_string()))?;

        let (repository, rest) = match rest.split_once('/') {
            Some((repo, rest)) => (repo, Some(rest)),
            None => (rest, None),
        };
        if repository.is_empty() {
            return Err(UriError::EmptyRepository(raw.to_string()));
        }

        let (reference, path) = match rest {
            None => (None, None),
            // `lakefs://repo/` names the repository alone
            Some("") => (None, None),
            Some(rest) => {
                let (reference, path) = match rest.split_once('/') {
                    Some((reference, path)) => (reference, Some(format!("/{}", path))),
                    None => (rest, None),
                };
                if reference.is_empty() {
                    return Err(UriError::EmptyRef(raw.to_string()));
                }
                (Some(reference.to_string()), path)
            }
        };

        Ok(Self {
            repository: repository.to_string(),
            reference,
            path,
        })
    }

    /// A URI naming a repository only.
    pub fn repository(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            reference: None,
            path: None,
        }
    }

    /// A URI naming a path on a ref. `path` is normalised to start with `/`.
    pub fn object(repository: impl Into<String>, reference: impl Into<String>, path: &str) -> Self {
        Self {
            repository: repository.into(),
            reference: Some(reference.into()),
            path: Some(normalize_path(path)),
        }
    }

    /// The path without its leading `/`, as used for object keys.
    pub fn key(&self) -> Option<&str> {
        self.path.as_deref().map(|p| p.trim_start_matches('/'))
    }
}

impl fmt::Display for LakeFsUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", SCHEME_PREFIX, self.repository)?;
        if let Some(reference) = &self.reference {
            write!(f, "/{}", reference)?;
            if let Some(path) = &self.path {
                write!(f, "{}", path)?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for LakeFsUri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// How to read a slash-free partial path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultPathKind {
    /// `main` is a ref
    Ref,
    /// `data` is a directory on the context ref
    Dir,
    /// `a.csv` is an object on the context ref
    Object,
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUri {
    pub uri: LakeFsUri,
    /// The input as given.
    pub original_input: String,
    /// Whether the context filled in any part.
    pub resolved: bool,
}

/// Resolve `raw` into a full URI, using `context` for partial paths.
///
/// # Errors
///
/// - `EmptyPathWithoutContext` for `""` without both repository and ref
/// - `NoRepositoryContext` for partial paths without a context repository
/// - `NoRefContext` when a ref is needed but neither given nor in context
/// - parse errors for malformed full URIs or context URIs
pub fn resolve(
    raw: &str,
    context: Option<&CliContext>,
    default_kind: DefaultPathKind,
) -> Result<ResolvedUri, UriError> {
    let done = |uri: LakeFsUri, resolved: bool| -> Result<ResolvedUri, UriError> {
        debug!(input = raw, uri = %uri, resolved, "resolved lakeFS path");
        Ok(ResolvedUri {
            uri,
            original_input: raw.to_string(),
            resolved,
        })
    };

    if raw.is_empty() {
        let (repo_uri, reference) = context
            .and_then(|c| Some((c.current_repo_uri.as_deref()?, c.current_ref.as_deref()?)))
            .ok_or(UriError::EmptyPathWithoutContext)?;
        let repository = context_repository(repo_uri)?;
        return done(LakeFsUri::object(repository, reference, "/"), true);
    }

    if raw.starts_with(SCHEME_PREFIX) {
        return done(LakeFsUri::parse(raw)?, false);
    }

    let repo_uri = context
        .and_then(|c| c.current_repo_uri.as_deref())
        .ok_or_else(|| UriError::NoRepositoryContext(raw.to_string()))?;
    let repository = context_repository(repo_uri)?;
    let context_ref = context.and_then(|c| c.current_ref.as_deref());

    let (reference, path) = match raw.split_once(':') {
        Some((reference, path)) if !reference.contains('/') => {
            if reference.is_empty() {
                return Err(UriError::EmptyRef(raw.to_string()));
            }
            (reference, path)
        }
        _ if default_kind == DefaultPathKind::Ref && !raw.contains('/') => (raw, "/"),
        _ => {
            let reference = context_ref.ok_or_else(|| UriError::NoRefContext(raw.to_string()))?;
            (reference, raw)
        }
    };

    done(LakeFsUri::object(repository, reference, path), true)
}

fn context_repository(repo_uri: &str) -> Result<String, UriError> {
    LakeFsUri::parse(repo_uri)
        .map(|uri| uri.repository)
        .map_err(|e| UriError::InvalidContext {
            uri: repo_uri.to_string(),
            reason: Box::new(e),
        })
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
