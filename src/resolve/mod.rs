//! Mail provider resolution.
//!
//! [`MailProviderResolver`] is the public entry point. [`MailProviderResolver::resolve`]
//! consults three sources in precedence order and stops as soon as every
//! requested service has a host:
//!
//! 1. the static provider registry (no network traffic)
//! 2. RFC 6186 SRV records, one concurrent query per requested service
//! 3. MX records matched against the registry's known mail exchangers
//!
//! Later sources only fill fields the earlier ones left unset.

use std::sync::Arc;

use hickory_resolver::TokioAsyncResolver;

use crate::dns::{self, DnsLookup};
use crate::provider::{ServiceConfig, ServiceSet};
use crate::registry::Registry;

/// Resolves mail settings for a domain from the registry and DNS.
///
/// Cheap to clone; the registry and DNS resolver are shared.
#[derive(Debug)]
pub struct MailProviderResolver<D: DnsLookup = TokioAsyncResolver> {
    registry: Arc<Registry>,
    dns: Arc<D>,
}

impl<D: DnsLookup> Clone for MailProviderResolver<D> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            dns: Arc::clone(&self.dns),
        }
    }
}

impl<D: DnsLookup> MailProviderResolver<D> {
    /// Creates a resolver over a loaded registry and a DNS backend.
    pub fn new(registry: Arc<Registry>, dns: Arc<D>) -> Self {
        Self { registry, dns }
    }

    /// The provider registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Looks up a well-known provider by the domain it serves.
    pub fn lookup_known(&self, domain: &str) -> Option<&ServiceConfig> {
        self.registry.lookup_domain(domain)
    }

    /// Looks up a hosted platform by its public alias.
    ///
    /// This bypasses the resolution pipeline entirely.
    pub fn lookup_public(&self, domain: &str) -> Option<&ServiceConfig> {
        self.registry.lookup_public(domain)
    }

    /// Discovers settings from SRV records only.
    pub async fn lookup_srv(&self, domain: &str, services: ServiceSet) -> ServiceConfig {
        dns::lookup_srv(&self.dns, domain, services).await
    }

    /// Infers the provider from MX records only.
    pub async fn lookup_mx(&self, domain: &str) -> Option<&ServiceConfig> {
        dns::lookup_mx(&*self.dns, &self.registry, domain).await
    }

    /// Resolves settings for `services` on `domain`.
    ///
    /// The domain is usually the part after `@` in an email address. The
    /// result may still be incomplete; check it with [`ServiceConfig::found`].
    /// A registry hit that already covers every requested service returns
    /// without any DNS traffic.
    pub async fn resolve(&self, domain: &str, services: ServiceSet) -> ServiceConfig {
        let mut config = match self.lookup_known(domain) {
            Some(known) => {
                log::debug!("{domain}: registry match");
                known.clone()
            }
            None => ServiceConfig::default(),
        };
        if config.found(services) {
            return config;
        }

        log::debug!("{domain}: querying SRV records");
        let srv = self.lookup_srv(domain, services).await;
        config.fill_from(&srv);
        if config.found(services) {
            return config;
        }

        log::debug!("{domain}: querying MX records");
        if let Some(by_mx) = self.lookup_mx(domain).await {
            config.fill_from(by_mx);
        }
        if !config.found(services) {
            log::debug!("{domain}: some requested services remain unresolved");
        }
        config
    }
}

/// Extracts the lowercased domain part of an email address.
///
/// Input without an `@` is taken to be a domain already. Returns `None` when
/// the domain part is empty.
pub fn split_email_domain(address: &str) -> Option<String> {
    let domain = match address.rsplit_once('@') {
        Some((_, domain)) => domain,
        None => address,
    };
    let domain = domain.trim().trim_end_matches('.');
    (!domain.is_empty()).then(|| domain.to_ascii_lowercase())
}
