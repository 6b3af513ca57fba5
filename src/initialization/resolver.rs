//! DNS resolver initialization.
//!
//! The resolver's timeout and attempt count are the only bound on how long a
//! resolution can take; the pipeline itself has no timeouts.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

/// Initializes the DNS resolver used for SRV and MX queries.
///
/// Uses the system resolver configuration (`/etc/resolv.conf` or the platform
/// equivalent) when it can be read, otherwise hickory's defaults (Google
/// public DNS). `timeout` and `attempts` override whatever the system sets.
///
/// # Returns
///
/// A `TokioAsyncResolver` wrapped in `Arc` for sharing across tasks.
pub fn init_resolver(timeout: Duration, attempts: usize) -> Arc<TokioAsyncResolver> {
    let (config, mut opts) = match hickory_resolver::system_conf::read_system_conf() {
        Ok(system) => system,
        Err(e) => {
            log::warn!("Could not read system DNS configuration, using defaults: {e}");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };
    opts.timeout = timeout;
    opts.attempts = attempts;
    // SRV and MX names are always absolute; never append search domains
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(config, opts))
}
