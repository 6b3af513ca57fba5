//! DNS query boundary.
//!
//! Resolution code only needs SRV targets and MX exchanger names, in the order
//! the resolver returned them. [`DnsLookup`] narrows a resolver down to those
//! two queries so the pipeline can run against hickory in production and a
//! scripted double in tests.

use std::future::Future;

use anyhow::Result;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::TokioAsyncResolver;

/// One SRV answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvTarget {
    /// Target hostname as returned, possibly with a trailing root dot.
    pub target: String,
    /// Target port.
    pub port: u16,
    /// RFC 2782 priority; lower values are preferred.
    pub priority: u16,
}

impl SrvTarget {
    /// Builds an SRV answer with priority 0.
    pub fn new(target: impl Into<String>, port: u16) -> Self {
        Self {
            target: target.into(),
            port,
            priority: 0,
        }
    }

    /// Sets the record priority.
    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = priority;
        self
    }
}

/// The DNS queries used for mail provider discovery.
///
/// An empty answer is `Ok(vec![])`. Errors are reserved for real failures
/// (timeouts, unreachable servers), which callers are free to ignore.
pub trait DnsLookup: Send + Sync + 'static {
    /// Looks up SRV records for a fully qualified service name such as
    /// `_submission._tcp.example.com`.
    fn lookup_srv(&self, name: &str) -> impl Future<Output = Result<Vec<SrvTarget>>> + Send;

    /// Looks up MX exchanger hostnames for a domain.
    fn lookup_mx(&self, domain: &str) -> impl Future<Output = Result<Vec<String>>> + Send;
}

impl DnsLookup for TokioAsyncResolver {
    async fn lookup_srv(&self, name: &str) -> Result<Vec<SrvTarget>> {
        match self.srv_lookup(name).await {
            Ok(lookup) => Ok(lookup
                .iter()
                .map(|srv| {
                    SrvTarget::new(srv.target().to_utf8(), srv.port())
                        .with_priority(srv.priority())
                })
                .collect()),
            Err(e) => empty_or_error("SRV", name, e),
        }
    }

    async fn lookup_mx(&self, domain: &str) -> Result<Vec<String>> {
        match self.mx_lookup(domain).await {
            Ok(lookup) => Ok(lookup.iter().map(|mx| mx.exchange().to_utf8()).collect()),
            Err(e) => empty_or_error("MX", domain, e),
        }
    }
}

/// "No records" and NXDOMAIN are empty answers; anything else is a failure.
fn empty_or_error<T>(kind: &str, name: &str, e: ResolveError) -> Result<Vec<T>> {
    if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
        log::debug!("No {kind} records for {name}");
        return Ok(Vec::new());
    }
    let error_msg = e.to_string();
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        log::debug!("{kind} lookup timed out for {name}: {e}");
    } else {
        log::debug!("Failed to lookup {kind} records for {name}: {e}");
    }
    Err(e.into())
}
