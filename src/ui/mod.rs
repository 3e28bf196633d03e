//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//! - [`prompts`] - Line and secret prompts
//!
//! # Design
//!
//! All user-facing output goes through this module so text and JSON modes
//! and the quiet flag are handled in one place. Diagnostics use `tracing`.

pub mod output;
pub mod prompts;
