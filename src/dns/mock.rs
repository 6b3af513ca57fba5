//! Scripted DNS for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Result};

use super::lookup::{DnsLookup, SrvTarget};

type Answer<T> = std::result::Result<Vec<T>, String>;

/// Answers queries from fixed tables and records every query it sees.
///
/// Unscripted names answer with an empty list.
#[derive(Debug, Default)]
pub(crate) struct MockDns {
    srv: HashMap<String, Answer<SrvTarget>>,
    mx: HashMap<String, Answer<String>>,
    delay: Option<Duration>,
    queries: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockDns {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_srv(self, name: &str, target: &str, port: u16) -> Self {
        self.with_srv_priority(name, target, port, 0)
    }

    /// Appends an answer with an explicit priority, after any earlier ones.
    pub(crate) fn with_srv_priority(
        mut self,
        name: &str,
        target: &str,
        port: u16,
        priority: u16,
    ) -> Self {
        if let Ok(answers) = self
            .srv
            .entry(name.to_string())
            .or_insert_with(|| Ok(Vec::new()))
        {
            answers.push(SrvTarget::new(target, port).with_priority(priority));
        }
        self
    }

    pub(crate) fn with_srv_error(mut self, name: &str) -> Self {
        self.srv
            .insert(name.to_string(), Err(format!("SERVFAIL for {name}")));
        self
    }

    pub(crate) fn with_mx(mut self, domain: &str, hosts: &[&str]) -> Self {
        self.mx.insert(
            domain.to_string(),
            Ok(hosts.iter().map(|h| h.to_string()).collect()),
        );
        self
    }

    pub(crate) fn with_mx_error(mut self, domain: &str) -> Self {
        self.mx
            .insert(domain.to_string(), Err(format!("timed out for {domain}")));
        self
    }

    /// Makes every query take `delay`, to observe overlapping lookups.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }

    pub(crate) fn query_count(&self) -> usize {
        self.queries().len()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn answer<T: Clone>(
        &self,
        kind: &str,
        table: &HashMap<String, Answer<T>>,
        name: &str,
    ) -> Result<Vec<T>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(format!("{kind} {name}"));
        }
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match table.get(name) {
            Some(Ok(answers)) => Ok(answers.clone()),
            Some(Err(msg)) => Err(anyhow!("{msg}")),
            None => Ok(Vec::new()),
        }
    }
}

impl DnsLookup for MockDns {
    async fn lookup_srv(&self, name: &str) -> Result<Vec<SrvTarget>> {
        self.answer("SRV", &self.srv, name).await
    }

    async fn lookup_mx(&self, domain: &str) -> Result<Vec<String>> {
        self.answer("MX", &self.mx, domain).await
    }
}
