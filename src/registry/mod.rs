//! Static provider registry.
//!
//! The registry is built once at startup from the provider dataset and is
//! read-only afterwards, so it can be shared behind an `Arc` by any number of
//! concurrent lookups without locking. Each provider is stored once and
//! indexed three ways:
//! - by every domain it serves directly
//! - by every MX hostname it operates
//! - by every public alias (hosted platforms serving many customer domains)
//!
//! Keys are compared case-insensitively and without a trailing root dot.

mod loader;

use std::collections::HashMap;

use crate::provider::ServiceConfig;

// Re-export public API
pub use loader::ProviderRecord;

/// A provider and the keys it is indexed under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderEntry {
    /// Domains served directly.
    pub domains: Vec<String>,
    /// Public aliases.
    pub public: Vec<String>,
    /// Mail exchanger hostnames.
    pub mx: Vec<String>,
    /// Connection settings.
    pub config: ServiceConfig,
}

/// In-memory provider table with domain, MX and public-alias indexes.
#[derive(Debug, Default)]
pub struct Registry {
    providers: Vec<ServiceConfig>,
    by_domain: HashMap<String, usize>,
    by_mx: HashMap<String, usize>,
    by_public: HashMap<String, usize>,
}

impl Registry {
    /// Builds the indexes from a list of providers.
    ///
    /// When two providers claim the same key, the later one wins.
    pub fn new(entries: Vec<ProviderEntry>) -> Self {
        let mut registry = Self::default();
        for entry in entries {
            let idx = registry.providers.len();
            let name = entry.config.name.clone().unwrap_or_default();
            index_keys(&mut registry.by_domain, "domain", &entry.domains, idx, &name);
            index_keys(&mut registry.by_mx, "mx", &entry.mx, idx, &name);
            index_keys(&mut registry.by_public, "public", &entry.public, idx, &name);
            registry.providers.push(entry.config);
        }
        log::debug!(
            "Provider registry built: {} providers, {} domains, {} MX hosts, {} public aliases",
            registry.providers.len(),
            registry.by_domain.len(),
            registry.by_mx.len(),
            registry.by_public.len()
        );
        registry
    }

    /// Looks up a provider by a domain it serves.
    ///
    /// Matching ignores ASCII case and a trailing root dot, as DNS names do,
    /// so `GMail.com.` finds the `gmail.com` provider. A byte-exact map lookup
    /// would miss those spellings.
    pub fn lookup_domain(&self, domain: &str) -> Option<&ServiceConfig> {
        self.get(&self.by_domain, domain)
    }

    /// Looks up a provider by one of its MX hostnames.
    pub fn lookup_mx(&self, host: &str) -> Option<&ServiceConfig> {
        self.get(&self.by_mx, host)
    }

    /// Looks up a provider by a public alias.
    pub fn lookup_public(&self, domain: &str) -> Option<&ServiceConfig> {
        self.get(&self.by_public, domain)
    }

    /// All providers, in load order.
    pub fn providers(&self) -> &[ServiceConfig] {
        &self.providers
    }

    /// Number of providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Reports whether the registry has no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn get(&self, index: &HashMap<String, usize>, key: &str) -> Option<&ServiceConfig> {
        index
            .get(&normalize_key(key))
            .and_then(|&idx| self.providers.get(idx))
    }
}

/// Lowercases a DNS name and strips the trailing root dot.
pub(crate) fn normalize_key(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

fn index_keys(
    index: &mut HashMap<String, usize>,
    kind: &str,
    keys: &[String],
    idx: usize,
    name: &str,
) {
    for key in keys {
        if index.insert(normalize_key(key), idx).is_some() {
            log::warn!("Duplicate {kind} key '{key}' in provider data, now mapped to '{name}'");
        }
    }
}
