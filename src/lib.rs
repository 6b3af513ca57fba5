//! mail_provider library: mail server settings discovery
//!
//! This library finds SMTP submission, IMAP and POP3 connection settings for an
//! email domain. It combines a static table of well-known providers with live
//! DNS discovery:
//!
//! 1. **Provider registry**: exact domain match, no network traffic
//! 2. **SRV records** (RFC 6186): `_submission._tcp`, `_imaps._tcp`/`_imap._tcp`,
//!    `_pop3s._tcp`/`_pop3._tcp`, queried concurrently
//! 3. **MX records**: mail exchangers matched against known provider hosts
//!
//! Sources are merged field by field; the first source to set a field keeps it,
//! and resolution stops as soon as every requested service has a host.
//!
//! # Example
//!
//! ```no_run
//! use mail_provider::initialization::{init_registry, init_resolver};
//! use mail_provider::{MailProviderResolver, ServiceSet};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = init_registry("services.toml")?;
//! let dns = init_resolver(Duration::from_secs(3), 2);
//! let resolver = MailProviderResolver::new(registry, dns);
//!
//! let config = resolver
//!     .resolve("example.com", ServiceSet::SMTP | ServiceSet::IMAP)
//!     .await;
//! if config.found(ServiceSet::SMTP | ServiceSet::IMAP) {
//!     println!("{config}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! DNS lookups spawn tokio tasks, so the async API must run inside a Tokio
//! runtime.

#![warn(missing_docs)]

pub mod config;
pub mod dns;
mod error_handling;
pub mod initialization;
pub mod provider;
pub mod registry;
mod resolve;

// Re-export public API
pub use config::{Config, ConfigValidationError, LogFormat, LogLevel};
pub use dns::{DnsLookup, SrvTarget};
pub use error_handling::{InitializationError, RegistryError};
pub use provider::{Auth, Endpoint, Security, Service, ServiceConfig, ServiceSet};
pub use registry::{ProviderEntry, ProviderRecord, Registry};
pub use resolve::{split_email_domain, MailProviderResolver};
