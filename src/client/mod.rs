//! client
//!
//! Access to a lakeFS server.
//!
//! # Modules
//!
//! - `traits`: the [`LakeFsApi`] trait and [`ClientError`]
//! - [`http`]: REST implementation over `reqwest`
//! - [`mock`]: in-memory implementation for deterministic testing
//!
//! Commands take `&dyn LakeFsApi` rather than a concrete client, so tests
//! can swap in [`mock::MockLakeFsClient`].

pub mod http;
pub mod mock;
mod traits;

pub use http::HttpLakeFsClient;
pub use traits::*;
