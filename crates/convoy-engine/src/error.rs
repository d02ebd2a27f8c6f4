//! Error type for engine client operations.

use convoy_common::types::UnitId;
use thiserror::Error;

/// An error reported by the engine client.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine refused or failed a start request.
    #[error("start request for {unit_name} failed: {message}")]
    StartFailed {
        /// Engine name of the unit that failed to start.
        unit_name: String,
        /// Engine-reported failure description.
        message: String,
    },

    /// The wait primitive failed for a reason other than the unit exiting,
    /// such as the engine connection being lost.
    #[error("wait for {id} failed: {message}")]
    WaitFailed {
        /// Unit whose wait was interrupted.
        id: UnitId,
        /// Description of the infrastructure failure.
        message: String,
    },

    /// Unit discovery failed.
    #[error("unit listing failed: {message}")]
    ListFailed {
        /// Description of the discovery failure.
        message: String,
    },

    /// The operation was cancelled before the engine completed it.
    #[error("engine operation cancelled")]
    Cancelled,
}

/// Convenience alias for engine client results.
pub type Result<T> = std::result::Result<T, EngineError>;
