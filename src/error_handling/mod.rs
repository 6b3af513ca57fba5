//! Error handling.
//!
//! This module provides the error types for the fallible edges of the crate:
//! - **Initialization**: logger setup and provider table loading
//! - **Registry**: reading, parsing and validating the provider dataset
//!
//! Resolution itself never fails. DNS errors degrade to "not found" and are
//! only logged at the DNS boundary.

mod types;

// Re-export public API
pub use types::{InitializationError, RegistryError};
