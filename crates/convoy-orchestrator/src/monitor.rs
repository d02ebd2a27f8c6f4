//! Detached per-unit exit monitors.

use std::sync::Arc;

use convoy_engine::{EngineClient, Unit, WaitCondition};

use crate::event::{ContainerEvent, ContainerEventListener};

/// Spawns one detached task that waits for `unit` to stop and delivers its
/// terminal event to `listener`.
///
/// The task outlives the call that spawned it by design: its whole purpose
/// is to report asynchronously after `start` has returned, so it holds no
/// handle back to the orchestrator and is not cancelled with the startup
/// pass. If the wait primitive itself fails (an engine infrastructure error,
/// not a unit exit) the failure is logged and no terminal event is
/// synthesized for that unit.
pub(crate) fn spawn_exit_monitor(
    engine: Arc<dyn EngineClient>,
    project: String,
    unit: Unit,
    listener: ContainerEventListener,
) {
    let _ = tokio::spawn(async move {
        let name = unit.display_name(&project).to_string();
        match engine.wait(&unit.id, WaitCondition::NotRunning).await {
            Ok(status) => {
                tracing::debug!(unit = %name, exit_code = status.exit_code, "unit stopped");
                listener(ContainerEvent::Exit {
                    container: name,
                    service: unit.service().unwrap_or_default().to_string(),
                    exit_code: status.exit_code,
                });
            }
            Err(error) => {
                tracing::warn!(unit = %name, %error, "unexpected engine error while waiting for unit");
            }
        }
    });
}
