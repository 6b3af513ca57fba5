//! RFC 6186 SRV discovery.
//!
//! Each requested service is looked up in its own tokio task. Tasks return an
//! independent `(Service, Option<Endpoint>)` and the results are folded into a
//! fresh [`ServiceConfig`] once every task has finished, so no record is shared
//! while the queries run.
//!
//! Service names, in query order:
//! - submission: `_submission._tcp`
//! - IMAP: `_imaps._tcp`, then `_imap._tcp`
//! - POP3: `_pop3s._tcp`, then `_pop3._tcp`
//!
//! Security is inferred from the port. Authentication is never set here.

use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use strum::IntoEnumIterator;

use super::lookup::{DnsLookup, SrvTarget};
use crate::provider::{Endpoint, Security, Service, ServiceConfig, ServiceSet};

/// Submission with STARTTLS (RFC 6409).
const SUBMISSION_STARTTLS_PORT: u16 = 587;
/// IMAP over implicit TLS.
const IMAPS_PORT: u16 = 993;
/// POP3 over implicit TLS.
const POP3S_PORT: u16 = 995;

/// How one service is discovered and how its security is inferred.
struct SrvRule {
    names: &'static [&'static str],
    default_security: Security,
    special_port: u16,
    special_security: Security,
}

impl SrvRule {
    fn for_service(service: Service) -> Self {
        match service {
            Service::Smtp => Self {
                names: &["submission"],
                default_security: Security::Tls,
                special_port: SUBMISSION_STARTTLS_PORT,
                special_security: Security::StartTls,
            },
            Service::Imap => Self {
                names: &["imaps", "imap"],
                default_security: Security::StartTls,
                special_port: IMAPS_PORT,
                special_security: Security::Tls,
            },
            Service::Pop3 => Self {
                names: &["pop3s", "pop3"],
                default_security: Security::StartTls,
                special_port: POP3S_PORT,
                special_security: Security::Tls,
            },
        }
    }

    fn endpoint(&self, answer: SrvTarget) -> Endpoint {
        let security = if answer.port == self.special_port {
            self.special_security
        } else {
            self.default_security
        };
        Endpoint::new(answer.target.trim_end_matches('.'), answer.port, security)
    }
}

/// Looks up one service's SRV records.
///
/// Tries each service name in turn and uses the preferred answer of the first
/// name that has one: the lowest priority value, earliest in the answer on a
/// tie. Answer order alone is not trusted since resolvers rotate it. A target of `.` means "service not offered" under that name
/// (RFC 2782) and moves on to the next name.
pub async fn lookup_service<D: DnsLookup>(
    dns: &D,
    domain: &str,
    service: Service,
) -> Option<Endpoint> {
    let rule = SrvRule::for_service(service);
    for name in rule.names {
        let query = format!("_{name}._tcp.{domain}");
        let first = dns
            .lookup_srv(&query)
            .await
            .unwrap_or_default()
            .into_iter()
            .min_by_key(|answer| answer.priority)
            .filter(|answer| !answer.target.trim_end_matches('.').is_empty());
        if let Some(answer) = first {
            return Some(rule.endpoint(answer));
        }
    }
    None
}

/// Discovers settings for the requested services via SRV records.
///
/// Only services that are both requested and answered are populated; the rest
/// stay unset. Waits for every lookup before returning.
pub async fn lookup_srv<D: DnsLookup>(
    dns: &Arc<D>,
    domain: &str,
    services: ServiceSet,
) -> ServiceConfig {
    let mut tasks = FuturesUnordered::new();
    for service in Service::iter().filter(|service| services.includes(*service)) {
        let dns = Arc::clone(dns);
        let domain = domain.to_string();
        tasks.push(tokio::spawn(async move {
            let endpoint = lookup_service(&*dns, &domain, service).await;
            (service, endpoint)
        }));
    }

    let mut config = ServiceConfig::default();
    while let Some(joined) = tasks.next().await {
        match joined {
            Ok((service, Some(endpoint))) => *config.endpoint_mut(service) = endpoint,
            Ok((_, None)) => {}
            Err(e) => log::warn!("SRV lookup task for {domain} did not complete: {e}"),
        }
    }
    config
}
