//! Error type for startup orchestration.

use convoy_engine::EngineError;
use thiserror::Error;

/// An error surfaced by the start orchestrator.
///
/// Only synchronous failures appear here: engine errors inside detached exit
/// monitors are logged and swallowed, never returned to the caller.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The engine refused or failed a start request for a service's unit.
    #[error("failed to start service {service}: {source}")]
    Start {
        /// Service whose start failed.
        service: String,
        /// Underlying engine failure.
        #[source]
        source: EngineError,
    },

    /// Attachment unit discovery failed before any start was attempted.
    #[error("failed to resolve attachment units: {source}")]
    Resolution {
        /// Underlying engine failure.
        #[source]
        source: EngineError,
    },

    /// The startup pass was cancelled before completing.
    #[error("startup cancelled")]
    Cancelled,

    /// A startup branch task aborted without resolving.
    #[error("startup branch aborted: {message}")]
    Branch {
        /// Join failure description.
        message: String,
    },
}

/// Convenience alias for orchestrator results.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
