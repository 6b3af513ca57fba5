//! Mail provider data model.
//!
//! This module defines the record produced by every lookup source:
//! - [`Service`] and [`ServiceSet`] select which services a caller needs
//! - [`Endpoint`] holds host, port, security and auth for one service
//! - [`ServiceConfig`] groups the three endpoints with an optional provider name
//!
//! Records are merged with fill-only-if-unset semantics, so the first source to
//! populate a field keeps it.

mod types;

// Re-export public API
pub use types::{Auth, Endpoint, Security, Service, ServiceConfig, ServiceSet};
