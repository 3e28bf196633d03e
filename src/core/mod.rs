//! core
//!
//! Local state and addressing for lctl.
//!
//! # Modules
//!
//! - [`config`] - Configuration schema, loading, and the CLI context
//! - [`uri`] - `lakefs://` URI parsing and context-relative resolution

pub mod config;
pub mod uri;
