//! lctl - a context-aware command-line client for lakeFS
//!
//! The crate is built around typed JSON models of the lakeFS API: each model
//! declares its fields once, validates raw JSON against that declaration, and
//! keeps any undeclared keys as additional properties so documents survive a
//! decode/encode round trip.
//!
//! # Architecture
//!
//! - [`model`] - Typed JSON models (`CopyPartSource`, `Repository`, ...) and
//!   the validation machinery they share
//! - [`core`] - `lakefs://` URI resolution, configuration and CLI context
//! - [`client`] - The lakeFS API trait with HTTP and in-memory implementations
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`ui`] - User interaction utilities
//!
//! # Example
//!
//! ```
//! use lctl::model::{CopyPartSource, Model};
//!
//! let source = CopyPartSource::from_json(
//!     r#"{"repository": "repo", "ref": "main", "path": "data/a.csv"}"#,
//! )
//! .unwrap();
//! assert_eq!(source.reference(), Some("main"));
//! ```

pub mod cli;
pub mod client;
pub mod core;
pub mod model;
pub mod ui;
