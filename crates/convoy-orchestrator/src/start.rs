//! The start orchestrator: dependency-ordered startup plus attachment.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use convoy_engine::{EngineClient, ServiceRef};
use tokio_util::sync::CancellationToken;

use crate::attach;
use crate::error::{OrchestratorError, Result};
use crate::event::ContainerEventListener;
use crate::graph;
use crate::monitor;
use crate::project::{Project, ServiceConfig};

/// Options for a startup pass.
#[derive(Clone, Default)]
pub struct StartOptions {
    /// Services to start; empty means every service in the project.
    pub services: Vec<String>,
    /// When set, the effective services' units are monitored and their
    /// terminal events delivered to this listener.
    pub attach: Option<ContainerEventListener>,
}

impl fmt::Debug for StartOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartOptions")
            .field("services", &self.services)
            .field("attach", &self.attach.is_some())
            .finish()
    }
}

/// Coordinates dependency-ordered service startup against an engine.
pub struct Orchestrator {
    engine: Arc<dyn EngineClient>,
}

impl Orchestrator {
    /// Creates an orchestrator driving the given engine client.
    #[must_use]
    pub fn new(engine: Arc<dyn EngineClient>) -> Self {
        Self { engine }
    }

    /// Starts the selected services of `project` in dependency order.
    ///
    /// Services outside the selection still participate in ordering but are
    /// not started. When `options.attach` is set, the units to monitor are
    /// resolved before any start is issued, and one detached exit monitor
    /// per unit is spawned after all starts have been dispatched — this
    /// method returns once the monitors are launched, before any of their
    /// events can be delivered, and the monitors deliberately outlive both
    /// the call and `cancel`.
    ///
    /// # Errors
    ///
    /// Returns the first start failure ([`OrchestratorError::Start`]),
    /// [`OrchestratorError::Resolution`] if attachment discovery fails
    /// (before anything is started), or [`OrchestratorError::Cancelled`]
    /// if `cancel` fires mid-walk. No monitors are spawned on error.
    pub async fn start(
        &self,
        project: &Project,
        options: StartOptions,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let StartOptions { mut services, attach } = options;
        if services.is_empty() {
            services = project.service_names();
        }
        tracing::info!(
            project = %project.name(),
            services = ?services,
            attach = attach.is_some(),
            "starting services"
        );

        let attached = if attach.is_some() {
            attach::resolve_attachments(self.engine.as_ref(), project, &services).await?
        } else {
            Vec::new()
        };

        let engine = Arc::clone(&self.engine);
        let scope = project.clone();
        let selected: Arc<HashSet<String>> = Arc::new(services.into_iter().collect());
        let visit_cancel = cancel.clone();
        graph::walk(project, cancel, move |name| {
            let engine = Arc::clone(&engine);
            let scope = scope.clone();
            let selected = Arc::clone(&selected);
            let cancel = visit_cancel.clone();
            async move {
                if !selected.contains(&name) {
                    return Ok(());
                }
                match scope.service(&name) {
                    Some(service) => start_service(engine.as_ref(), &scope, service, &cancel).await,
                    None => Ok(()),
                }
            }
        })
        .await?;

        if let Some(listener) = attach {
            for unit in attached {
                monitor::spawn_exit_monitor(
                    Arc::clone(&self.engine),
                    project.name().to_string(),
                    unit,
                    Arc::clone(&listener),
                );
            }
        }
        Ok(())
    }
}

/// Starts every unit of one service: one engine request per replica.
///
/// The first engine failure is surfaced as-is; replicas that started before
/// it are not rolled back.
async fn start_service(
    engine: &dyn EngineClient,
    project: &Project,
    service: &ServiceConfig,
    cancel: &CancellationToken,
) -> Result<()> {
    for replica in 1..=service.replicas {
        let unit = ServiceRef {
            project: project.name().to_string(),
            service: service.name.clone(),
            replica,
        };
        engine
            .start_unit(&unit, cancel)
            .await
            .map_err(|source| OrchestratorError::Start {
                service: service.name.clone(),
                source,
            })?;
    }
    tracing::info!(service = %service.name, replicas = service.replicas, "service started");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_select_everything_and_attach_nothing() {
        let options = StartOptions::default();
        assert!(options.services.is_empty());
        assert!(options.attach.is_none());
    }

    #[test]
    fn debug_shows_attachment_presence_not_the_listener() {
        let options = StartOptions {
            services: vec!["web".into()],
            attach: Some(Arc::new(|_event| {})),
        };
        let rendered = format!("{options:?}");
        assert!(rendered.contains("attach: true"), "got: {rendered}");
    }
}
