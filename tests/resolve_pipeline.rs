//! End-to-end tests for the resolution pipeline against the bundled dataset.
//!
//! DNS is scripted so these run offline; the query log shows which stages ran.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use mail_provider::{
    Auth, DnsLookup, Endpoint, MailProviderResolver, Registry, Security, ServiceConfig, ServiceSet,
    SrvTarget,
};

#[derive(Default)]
struct ScriptedDns {
    srv: HashMap<String, Vec<SrvTarget>>,
    mx: HashMap<String, Vec<String>>,
    log: Mutex<Vec<String>>,
}

impl ScriptedDns {
    fn srv(mut self, name: &str, target: &str, port: u16) -> Self {
        self.srv
            .entry(name.to_string())
            .or_default()
            .push(SrvTarget::new(target, port));
        self
    }

    fn mx(mut self, domain: &str, hosts: &[&str]) -> Self {
        self.mx.insert(
            domain.to_string(),
            hosts.iter().map(|h| h.to_string()).collect(),
        );
        self
    }

    fn queries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl DnsLookup for ScriptedDns {
    async fn lookup_srv(&self, name: &str) -> anyhow::Result<Vec<SrvTarget>> {
        self.log.lock().unwrap().push(format!("SRV {name}"));
        Ok(self.srv.get(name).cloned().unwrap_or_default())
    }

    async fn lookup_mx(&self, domain: &str) -> anyhow::Result<Vec<String>> {
        self.log.lock().unwrap().push(format!("MX {domain}"));
        match self.mx.get(domain) {
            Some(hosts) => Ok(hosts.clone()),
            None => Err(anyhow::anyhow!("NXDOMAIN {domain}")),
        }
    }
}

fn bundled_registry() -> Arc<Registry> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("services.toml");
    Arc::new(Registry::load(path).expect("bundled services.toml should load"))
}

fn resolver(dns: ScriptedDns) -> (MailProviderResolver<ScriptedDns>, Arc<ScriptedDns>) {
    let dns = Arc::new(dns);
    (
        MailProviderResolver::new(bundled_registry(), Arc::clone(&dns)),
        dns,
    )
}

#[tokio::test]
async fn test_gmail_is_resolved_offline() {
    let (resolver, dns) = resolver(ScriptedDns::default());
    let config = resolver.resolve("gmail.com", ServiceSet::ALL).await;

    assert_eq!(
        config,
        ServiceConfig {
            name: Some("Gmail".to_string()),
            smtp: Endpoint::new("smtp.gmail.com", 587, Security::StartTls).with_auth(Auth::Login),
            imap: Endpoint::new("imap.gmail.com", 993, Security::Tls),
            pop3: Endpoint::new("pop.gmail.com", 995, Security::Tls),
        }
    );
    assert!(dns.queries().is_empty());
}

#[tokio::test]
async fn test_unregistered_domain_is_not_known() {
    let (resolver, _dns) = resolver(ScriptedDns::default());
    assert_eq!(resolver.lookup_known("example-unregistered-xyz.net"), None);
}

#[tokio::test]
async fn test_icloud_pop3_falls_through_to_dns() {
    // The dataset has no POP3 entry for iCloud, so asking for it goes to DNS
    let (resolver, dns) = resolver(ScriptedDns::default());
    let config = resolver
        .resolve("icloud.com", ServiceSet::IMAP | ServiceSet::POP3)
        .await;
    assert_eq!(config.imap.host, "imap.mail.me.com");
    assert!(!config.found(ServiceSet::POP3));
    // SRV runs for the whole request, concurrently, before MX
    let mut queries = dns.queries();
    assert_eq!(queries.pop().as_deref(), Some("MX icloud.com"));
    queries.sort();
    assert_eq!(
        queries,
        vec![
            "SRV _imap._tcp.icloud.com",
            "SRV _imaps._tcp.icloud.com",
            "SRV _pop3._tcp.icloud.com",
            "SRV _pop3s._tcp.icloud.com",
        ]
    );
}

#[tokio::test]
async fn test_self_hosted_domain_from_srv() {
    let (resolver, dns) = resolver(
        ScriptedDns::default()
            .srv("_submission._tcp.selfhosted.example", "mail.selfhosted.example.", 587)
            .srv("_imaps._tcp.selfhosted.example", "mail.selfhosted.example.", 993)
            .srv("_pop3._tcp.selfhosted.example", "mail.selfhosted.example.", 110),
    );
    let config = resolver.resolve("selfhosted.example", ServiceSet::ALL).await;
    assert_eq!(
        config,
        ServiceConfig {
            name: None,
            smtp: Endpoint::new("mail.selfhosted.example", 587, Security::StartTls),
            imap: Endpoint::new("mail.selfhosted.example", 993, Security::Tls),
            pop3: Endpoint::new("mail.selfhosted.example", 110, Security::StartTls),
        }
    );
    assert!(!dns.queries().iter().any(|q| q.starts_with("MX ")));
}

#[tokio::test]
async fn test_google_hosted_domain_from_mx() {
    let (resolver, _dns) = resolver(ScriptedDns::default().mx(
        "company.example",
        &["aspmx.l.google.com.", "alt1.aspmx.l.google.com."],
    ));
    let config = resolver.resolve("company.example", ServiceSet::ALL).await;
    assert_eq!(&config, resolver.lookup_known("gmail.com").unwrap());
}

#[tokio::test]
async fn test_unrelated_mx_gives_nothing() {
    let (resolver, _dns) = resolver(
        ScriptedDns::default().mx("small.example", &["mx.small-isp.example."]),
    );
    assert_eq!(resolver.lookup_mx("small.example").await, None);
    assert_eq!(resolver.lookup_mx("missing.example").await, None);
    let config = resolver.resolve("small.example", ServiceSet::SMTP).await;
    assert_eq!(config, ServiceConfig::default());
}

#[tokio::test]
async fn test_public_alias_lookup() {
    let (resolver, dns) = resolver(ScriptedDns::default());
    let office = resolver.lookup_public("office365.com").unwrap();
    assert_eq!(office.name.as_deref(), Some("Office 365"));
    assert_eq!(
        office.smtp,
        Endpoint::new("smtp.office365.com", 587, Security::StartTls)
    );
    assert!(resolver.lookup_public("gmail.com").is_none());
    assert!(dns.queries().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolutions_share_registry() {
    let (resolver, _dns) = resolver(
        ScriptedDns::default().srv("_submission._tcp.a.example", "smtp.a.example.", 465),
    );
    let mut handles = Vec::new();
    for i in 0..16 {
        let resolver = resolver.clone();
        handles.push(tokio::spawn(async move {
            let domain = if i % 2 == 0 { "gmail.com" } else { "a.example" };
            resolver.resolve(domain, ServiceSet::SMTP).await
        }));
    }
    for (i, handle) in handles.into_iter().enumerate() {
        let config = handle.await.unwrap();
        let expected = if i % 2 == 0 {
            "smtp.gmail.com"
        } else {
            "smtp.a.example"
        };
        assert_eq!(config.smtp.host, expected);
    }
}
