//! Unified error types for the Convoy workspace.
//!
//! Each higher-level crate defines its own domain-specific error enum that
//! wraps these common variants when appropriate.

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ConvoyError {
    /// A project or service declaration is invalid.
    #[error("invalid project definition: {message}")]
    Config {
        /// Description of the invalid declaration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ConvoyError>;
