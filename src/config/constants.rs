//! Configuration constants.
//!
//! Defaults for the CLI and the DNS resolver. None of these are consulted by
//! the resolution pipeline itself; DNS latency is bounded by the resolver.

/// DNS query timeout in seconds
/// Most DNS queries complete in <1s; a hung SRV or MX query blocks the whole
/// resolution, so keep this short
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// DNS attempts per query before giving up
pub const DNS_ATTEMPTS: usize = 2;
/// Upper bound accepted for `--dns-timeout-secs`
pub const MAX_DNS_TIMEOUT_SECS: u64 = 60;
/// Upper bound accepted for `--dns-attempts`
pub const MAX_DNS_ATTEMPTS: usize = 10;

/// Default location of the provider dataset
pub const DEFAULT_PROVIDERS_PATH: &str = "./services.toml";
