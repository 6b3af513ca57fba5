//! MX-based provider inference.

use super::lookup::DnsLookup;
use crate::provider::ServiceConfig;
use crate::registry::Registry;

/// Finds the provider operating a domain's mail exchangers.
///
/// Exchangers are checked in the order DNS returned them (not re-sorted by
/// preference) and the first one with a registry MX entry wins. The matching
/// registry record is returned as is. A failed or empty MX query, or no match,
/// gives `None`.
pub async fn lookup_mx<'r, D: DnsLookup>(
    dns: &D,
    registry: &'r Registry,
    domain: &str,
) -> Option<&'r ServiceConfig> {
    let hosts = dns.lookup_mx(domain).await.ok()?;
    hosts.iter().find_map(|host| registry.lookup_mx(host))
}
