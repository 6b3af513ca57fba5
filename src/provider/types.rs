//! Provider configuration types.
//!
//! A [`ServiceConfig`] holds connection settings for up to three mail services.
//! Every field has an "unset" value (empty host, port 0, `None` for enums) so a
//! record can be assembled incrementally from several sources.

use std::fmt;

use bitflags::bitflags;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// A mail service whose settings can be resolved.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    /// Message submission (SMTP).
    #[strum(to_string = "smtp", serialize = "submission")]
    Smtp,
    /// IMAP retrieval.
    Imap,
    /// POP3 retrieval.
    Pop3,
}

bitflags! {
    /// A set of requested services.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ServiceSet: u8 {
        /// Message submission.
        const SMTP = 1 << 0;
        /// IMAP retrieval.
        const IMAP = 1 << 1;
        /// POP3 retrieval.
        const POP3 = 1 << 2;

        /// Every service.
        const ALL = Self::SMTP.bits() | Self::IMAP.bits() | Self::POP3.bits();
    }
}

impl From<Service> for ServiceSet {
    fn from(service: Service) -> Self {
        match service {
            Service::Smtp => Self::SMTP,
            Service::Imap => Self::IMAP,
            Service::Pop3 => Self::POP3,
        }
    }
}

impl FromIterator<Service> for ServiceSet {
    fn from_iter<I: IntoIterator<Item = Service>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, service| set | Self::from(service))
    }
}

impl ServiceSet {
    /// Reports whether `service` is part of this set.
    pub fn includes(self, service: Service) -> bool {
        self.contains(Self::from(service))
    }
}

/// Transport security for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Security {
    /// Plaintext.
    #[strum(serialize = "none")]
    None,
    /// Connect directly over TLS.
    #[strum(serialize = "tls")]
    Tls,
    /// Upgrade a plaintext connection (STARTTLS for SMTP/IMAP, STLS for POP3).
    #[strum(serialize = "starttls")]
    StartTls,
}

impl Security {
    /// Decodes a dataset code; 0 means unset.
    pub fn from_code(code: u8) -> Result<Option<Self>, u8> {
        match code {
            0 => Ok(None),
            1 => Ok(Some(Self::None)),
            2 => Ok(Some(Self::Tls)),
            3 => Ok(Some(Self::StartTls)),
            other => Err(other),
        }
    }
}

/// Authentication mechanism for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Auth {
    /// Let the client negotiate.
    #[strum(serialize = "auto")]
    Auto,
    /// SASL PLAIN.
    #[strum(serialize = "plain")]
    Plain,
    /// SASL LOGIN.
    #[strum(serialize = "login")]
    Login,
    /// CRAM-MD5 challenge/response.
    #[strum(serialize = "cram-md5")]
    CramMd5,
}

impl Auth {
    /// Decodes a dataset code; 0 means unset.
    pub fn from_code(code: u8) -> Result<Option<Self>, u8> {
        match code {
            0 => Ok(None),
            1 => Ok(Some(Self::Auto)),
            2 => Ok(Some(Self::Plain)),
            3 => Ok(Some(Self::Login)),
            4 => Ok(Some(Self::CramMd5)),
            other => Err(other),
        }
    }
}

/// Connection settings for one service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// Hostname; empty when unknown.
    pub host: String,
    /// Port; 0 when unknown.
    pub port: u16,
    /// Transport security; `None` when unknown.
    pub security: Option<Security>,
    /// Authentication mechanism; `None` when unknown.
    pub auth: Option<Auth>,
}

impl Endpoint {
    /// Builds an endpoint with host, port and security set and auth left unset.
    pub fn new(host: impl Into<String>, port: u16, security: Security) -> Self {
        Self {
            host: host.into(),
            port,
            security: Some(security),
            auth: None,
        }
    }

    /// Sets the authentication mechanism.
    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Reports whether the host is known.
    pub fn is_found(&self) -> bool {
        !self.host.is_empty()
    }

    /// Fills every unset field from `other`. Set fields are never overwritten.
    pub fn fill_from(&mut self, other: &Endpoint) {
        if self.host.is_empty() {
            self.host.clone_from(&other.host);
        }
        if self.port == 0 {
            self.port = other.port;
        }
        if self.security.is_none() {
            self.security = other.security;
        }
        if self.auth.is_none() {
            self.auth = other.auth;
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_found() {
            return write!(f, "(unknown)");
        }
        write!(f, "{}:{}", self.host, self.port)?;
        if let Some(security) = self.security {
            write!(f, " security={security}")?;
        }
        if let Some(auth) = self.auth {
            write!(f, " auth={auth}")?;
        }
        Ok(())
    }
}

/// Resolved mail settings for a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceConfig {
    /// Provider name; only known for provider table entries.
    pub name: Option<String>,
    /// Submission settings.
    pub smtp: Endpoint,
    /// IMAP settings.
    pub imap: Endpoint,
    /// POP3 settings.
    pub pop3: Endpoint,
}

impl ServiceConfig {
    /// Returns the settings for one service.
    pub fn endpoint(&self, service: Service) -> &Endpoint {
        match service {
            Service::Smtp => &self.smtp,
            Service::Imap => &self.imap,
            Service::Pop3 => &self.pop3,
        }
    }

    /// Returns the settings for one service, mutably.
    pub fn endpoint_mut(&mut self, service: Service) -> &mut Endpoint {
        match service {
            Service::Smtp => &mut self.smtp,
            Service::Imap => &mut self.imap,
            Service::Pop3 => &mut self.pop3,
        }
    }

    /// Replaces the settings for one service.
    pub fn with_endpoint(mut self, service: Service, endpoint: Endpoint) -> Self {
        *self.endpoint_mut(service) = endpoint;
        self
    }

    /// Reports whether every service in `services` has a host.
    ///
    /// An empty set is always found.
    pub fn found(&self, services: ServiceSet) -> bool {
        Service::iter()
            .filter(|service| services.includes(*service))
            .all(|service| self.endpoint(service).is_found())
    }

    /// Fills every unset field from `other`, including the provider name.
    ///
    /// Fields already set on `self` always win, so merging sources in
    /// precedence order gives each field to the first source that knows it.
    pub fn fill_from(&mut self, other: &ServiceConfig) {
        if self.name.is_none() {
            self.name.clone_from(&other.name);
        }
        self.smtp.fill_from(&other.smtp);
        self.imap.fill_from(&other.imap);
        self.pop3.fill_from(&other.pop3);
    }
}

impl fmt::Display for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name: {}", self.name.as_deref().unwrap_or("(unknown)"))?;
        writeln!(f, "smtp: {}", self.smtp)?;
        writeln!(f, "imap: {}", self.imap)?;
        write!(f, "pop3: {}", self.pop3)
    }
}
