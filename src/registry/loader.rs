//! Provider dataset loading.
//!
//! The dataset is a TOML document with one `[[service]]` table per provider:
//!
//! ```toml
//! [[service]]
//! name = "Gmail"
//! domains = ["gmail.com", "googlemail.com"]
//! mx = ["gmail-smtp-in.l.google.com"]
//! smtp_host = "smtp.gmail.com"
//! smtp_port = 587
//! smtp_security = 3   # 1 = none, 2 = TLS, 3 = STARTTLS
//! smtp_auth = 3       # 1 = auto, 2 = plain, 3 = login, 4 = CRAM-MD5
//! ```
//!
//! Omitted fields and code 0 mean "unset".

use std::path::Path;

use serde::Deserialize;

use super::{ProviderEntry, Registry};
use crate::error_handling::RegistryError;
use crate::provider::{Auth, Endpoint, Security, ServiceConfig};

#[derive(Debug, Deserialize)]
struct Dataset {
    #[serde(default)]
    service: Vec<ProviderRecord>,
}

/// One provider as it appears in the dataset file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)] // Field names mirror the dataset keys
pub struct ProviderRecord {
    pub domains: Vec<String>,
    pub public: Vec<String>,
    pub mx: Vec<String>,

    pub name: String,

    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_security: u8,
    pub smtp_auth: u8,

    pub imap_host: String,
    pub imap_port: u16,
    pub imap_security: u8,
    pub imap_auth: u8,

    pub pop3_host: String,
    pub pop3_port: u16,
    pub pop3_security: u8,
    pub pop3_auth: u8,
}

impl ProviderRecord {
    /// Validates the numeric codes and converts to a typed entry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidSecurity` or `RegistryError::InvalidAuth`
    /// for codes outside the known range.
    pub fn into_entry(self) -> Result<ProviderEntry, RegistryError> {
        let smtp = endpoint(
            &self.name,
            "smtp",
            self.smtp_host,
            self.smtp_port,
            self.smtp_security,
            self.smtp_auth,
        )?;
        let imap = endpoint(
            &self.name,
            "imap",
            self.imap_host,
            self.imap_port,
            self.imap_security,
            self.imap_auth,
        )?;
        let pop3 = endpoint(
            &self.name,
            "pop3",
            self.pop3_host,
            self.pop3_port,
            self.pop3_security,
            self.pop3_auth,
        )?;

        Ok(ProviderEntry {
            domains: self.domains,
            public: self.public,
            mx: self.mx,
            config: ServiceConfig {
                name: (!self.name.is_empty()).then_some(self.name),
                smtp,
                imap,
                pop3,
            },
        })
    }
}

fn endpoint(
    provider: &str,
    service: &'static str,
    host: String,
    port: u16,
    security: u8,
    auth: u8,
) -> Result<Endpoint, RegistryError> {
    let security = Security::from_code(security).map_err(|code| RegistryError::InvalidSecurity {
        provider: provider.to_string(),
        service,
        code,
    })?;
    let auth = Auth::from_code(auth).map_err(|code| RegistryError::InvalidAuth {
        provider: provider.to_string(),
        service,
        code,
    })?;
    Ok(Endpoint {
        host,
        port,
        security,
        auth,
    })
}

impl Registry {
    /// Builds a registry from already parsed dataset records.
    ///
    /// # Errors
    ///
    /// Fails on the first record with an invalid security or auth code.
    pub fn from_records(records: Vec<ProviderRecord>) -> Result<Self, RegistryError> {
        let entries = records
            .into_iter()
            .map(ProviderRecord::into_entry)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(entries))
    }

    /// Parses a TOML dataset.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Parse` for malformed TOML and the
    /// [`Registry::from_records`] errors for invalid codes.
    pub fn from_toml_str(text: &str) -> Result<Self, RegistryError> {
        let dataset: Dataset = toml::from_str(text)?;
        Self::from_records(dataset.service)
    }

    /// Reads and parses a TOML dataset file.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Read` if the file cannot be read, otherwise the
    /// [`Registry::from_toml_str`] errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_toml_str(&text)?;
        log::info!(
            "Loaded {} mail providers from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }
}
