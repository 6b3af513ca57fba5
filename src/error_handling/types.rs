//! Error type definitions.

use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error loading the provider table.
    #[error("Provider registry initialization error: {0}")]
    RegistryError(#[from] RegistryError),
}

/// Error types for loading the provider dataset.
///
/// Any of these aborts startup; a partially built registry is never used.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The dataset file could not be read.
    #[error("Could not read provider file {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The dataset is not valid TOML or does not match the expected layout.
    #[error("Could not parse provider data: {0}")]
    Parse(#[from] toml::de::Error),

    /// A security code outside the known range.
    #[error("Provider '{provider}' has invalid {service} security code {code}")]
    InvalidSecurity {
        /// Provider name.
        provider: String,
        /// Service the code belongs to.
        service: &'static str,
        /// Offending code.
        code: u8,
    },

    /// An authentication code outside the known range.
    #[error("Provider '{provider}' has invalid {service} auth code {code}")]
    InvalidAuth {
        /// Provider name.
        provider: String,
        /// Service the code belongs to.
        service: &'static str,
        /// Offending code.
        code: u8,
    },
}
