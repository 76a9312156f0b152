//! folio core: transport-agnostic primitives shared by the server crates.
//!
//! This crate defines the error surface, the endpoint-label vocabulary used to
//! bound metric cardinality, and the request classification helpers
//! (method and status class). It intentionally carries no transport or
//! runtime dependencies so it can be reused and tested in isolation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `SiteError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod endpoint;
pub mod error;
pub mod http;

/// Shared result type.
pub use error::{Result, SiteError};
