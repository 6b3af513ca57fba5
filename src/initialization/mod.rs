//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - DNS resolver
//! - Provider registry
//!
//! All initialization functions return proper error types for error handling.

mod logger;
mod resolver;

use std::path::Path;
use std::sync::Arc;

use crate::error_handling::InitializationError;
use crate::registry::Registry;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Loads the provider registry from the dataset file.
///
/// The registry must be fully loaded before any lookup; a dataset that fails
/// to read, parse or validate aborts initialization instead of yielding a
/// partial table.
///
/// # Errors
///
/// Returns `InitializationError::RegistryError` wrapping the load failure.
pub fn init_registry(path: impl AsRef<Path>) -> Result<Arc<Registry>, InitializationError> {
    let registry = Registry::load(path)?;
    if registry.is_empty() {
        log::warn!("Provider registry is empty; only DNS discovery is available");
    }
    Ok(Arc::new(registry))
}
