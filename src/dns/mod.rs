//! DNS discovery.
//!
//! This module provides the DNS-backed lookup sources:
//! - [`lookup_srv`]: RFC 2782/6186 SRV discovery for submission, IMAP and POP3
//! - [`lookup_mx`]: MX records cross-referenced against the provider registry
//!
//! Both are best effort. A failed query is treated exactly like an empty
//! answer, so callers only ever see fewer populated fields, never an error.
//! Queries go through the [`DnsLookup`] trait, implemented for hickory's
//! `TokioAsyncResolver`.

mod lookup;
#[cfg(test)]
pub(crate) mod mock;
mod mx;
mod srv;

// Re-export public API
pub use lookup::{DnsLookup, SrvTarget};
pub use mx::lookup_mx;
pub use srv::{lookup_service, lookup_srv};
