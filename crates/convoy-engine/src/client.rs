//! The async engine client trait the orchestrator drives.

use async_trait::async_trait;
use convoy_common::types::UnitId;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::unit::{ServiceRef, Unit, UnitFilter};

/// Condition a wait call resolves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitCondition {
    /// Resolve once the unit is no longer running, for any reason: normal
    /// exit, crash, or external removal.
    NotRunning,
}

/// Terminal status reported when a wait resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitStatus {
    /// Exit code of the unit's main process.
    pub exit_code: i64,
}

/// Client for the external container engine.
///
/// Implementations handle the engine-specific details of unit creation,
/// execution, and discovery; the orchestrator holds one behind
/// `Arc<dyn EngineClient>` and never touches the runtime directly.
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// Issues one start request for the referenced unit.
    ///
    /// Implementations are expected to honor `cancel` cooperatively while
    /// the request is in flight.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine refuses or fails the start.
    async fn start_unit(&self, unit: &ServiceRef, cancel: &CancellationToken) -> Result<()>;

    /// Blocks until the unit satisfies `condition`, returning its terminal
    /// status.
    ///
    /// The call has no lifetime bound: for a unit that keeps running it
    /// stays pending indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure failures (e.g. the engine
    /// connection dropping), never for the unit exiting abnormally — a
    /// non-zero exit is a successful wait.
    async fn wait(&self, id: &UnitId, condition: WaitCondition) -> Result<WaitStatus>;

    /// Lists the units inside the filter's scope, regardless of state.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails.
    async fn list_units(&self, filter: &UnitFilter) -> Result<Vec<Unit>>;
}
