//! Container lifecycle events delivered to attached listeners.

use std::sync::Arc;

/// A container lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerEvent {
    /// A monitored unit stopped, for any reason the engine reports as a
    /// terminal wait: normal exit, crash, or external removal.
    Exit {
        /// Service-relative display name of the unit.
        container: String,
        /// Owning service, recovered from the unit's labels.
        service: String,
        /// Exit code of the unit's main process.
        exit_code: i64,
    },
}

/// Callback receiving container events.
///
/// Exit monitors invoke the listener concurrently from independent tasks;
/// implementations must be safe for concurrent delivery without external
/// synchronization. Per unit, at most one terminal event is delivered, and
/// nothing after it.
pub type ContainerEventListener = Arc<dyn Fn(ContainerEvent) + Send + Sync>;
