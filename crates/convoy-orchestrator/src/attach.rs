//! Attachment resolution: which units will be monitored.

use convoy_engine::{EngineClient, Unit, UnitFilter};

use crate::error::{OrchestratorError, Result};
use crate::project::Project;

/// Resolves the set of units to monitor for the given services.
///
/// Runs before any service is started. The filter selects by project and
/// service scope rather than by current state, so units the imminent startup
/// pass creates for these services are covered by the resolved set.
///
/// # Errors
///
/// Returns [`OrchestratorError::Resolution`] if unit discovery fails.
pub(crate) async fn resolve_attachments(
    engine: &dyn EngineClient,
    project: &Project,
    services: &[String],
) -> Result<Vec<Unit>> {
    let filter = UnitFilter::project(project.name()).services(services.iter().cloned());
    let units = engine
        .list_units(&filter)
        .await
        .map_err(|source| OrchestratorError::Resolution { source })?;
    tracing::debug!(project = %project.name(), count = units.len(), "attachment set resolved");
    Ok(units)
}
