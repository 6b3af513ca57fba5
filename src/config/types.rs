//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::config::constants::{
    DEFAULT_PROVIDERS_PATH, DNS_ATTEMPTS, DNS_TIMEOUT_SECS, MAX_DNS_ATTEMPTS,
    MAX_DNS_TIMEOUT_SECS,
};
use crate::provider::{Service, ServiceSet};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// A configuration value that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid --{field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending option (CLI spelling).
    pub field: &'static str,
    /// What is wrong and what is accepted.
    pub message: String,
}

/// Application configuration.
///
/// Parsed from the command line by the binary, or built programmatically.
///
/// # Examples
///
/// ```no_run
/// use mail_provider::Config;
///
/// let config = Config {
///     target: "martin@example.com".to_string(),
///     dns_timeout_secs: 5,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mail_provider",
    version,
    about = "Find SMTP/IMAP/POP3 settings for an email address or domain"
)]
pub struct Config {
    /// Email address or domain to resolve
    pub target: String,

    /// Services to resolve (comma separated)
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [Service::Smtp, Service::Imap, Service::Pop3]
    )]
    pub services: Vec<Service>,

    /// Treat the target as a public alias of a hosted platform (no DNS)
    #[arg(long)]
    pub public: bool,

    /// Provider dataset (TOML)
    #[arg(long, default_value = DEFAULT_PROVIDERS_PATH)]
    pub providers: PathBuf,

    /// DNS query timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub dns_timeout_secs: u64,

    /// DNS attempts per query
    #[arg(long, default_value_t = DNS_ATTEMPTS)]
    pub dns_attempts: usize,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: String::new(),
            services: vec![Service::Smtp, Service::Imap, Service::Pop3],
            public: false,
            providers: PathBuf::from(DEFAULT_PROVIDERS_PATH),
            dns_timeout_secs: DNS_TIMEOUT_SECS,
            dns_attempts: DNS_ATTEMPTS,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            json: false,
        }
    }
}

impl Config {
    /// The requested services as a set.
    pub fn service_set(&self) -> ServiceSet {
        self.services.iter().copied().collect()
    }

    /// Checks option values that clap cannot express as types.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field with a message describing the accepted
    /// range.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.target.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "target",
                message: "an email address or domain is required".to_string(),
            });
        }
        if self.dns_timeout_secs == 0 || self.dns_timeout_secs > MAX_DNS_TIMEOUT_SECS {
            return Err(ConfigValidationError {
                field: "dns-timeout-secs",
                message: format!(
                    "must be greater than 0 and at most {MAX_DNS_TIMEOUT_SECS}, got {}",
                    self.dns_timeout_secs
                ),
            });
        }
        if self.dns_attempts == 0 || self.dns_attempts > MAX_DNS_ATTEMPTS {
            return Err(ConfigValidationError {
                field: "dns-attempts",
                message: format!(
                    "must be greater than 0 and at most {MAX_DNS_ATTEMPTS}, got {}",
                    self.dns_attempts
                ),
            });
        }
        if self.services.is_empty() {
            return Err(ConfigValidationError {
                field: "services",
                message: "at least one of smtp, imap, pop3 is required".to_string(),
            });
        }
        Ok(())
    }
}
