//! The observed-unit model.
//!
//! A unit is one running instance of a service (a container). The engine
//! assigns its identifier and owns its state; Convoy only observes units and
//! recovers their service membership from labels.

use std::collections::HashMap;

use convoy_common::constants::{LABEL_SERVICE, NAME_SEPARATOR};
use convoy_common::types::{UnitId, UnitState};
use serde::{Deserialize, Serialize};

/// Reference to one unit of a service, as passed to a start request.
///
/// `replica` is one-based; a service with `replicas = 3` produces references
/// for replicas 1, 2, and 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRef {
    /// Project the service belongs to.
    pub project: String,
    /// Service name within the project.
    pub service: String,
    /// One-based replica number.
    pub replica: usize,
}

impl ServiceRef {
    /// Returns the engine name this reference resolves to
    /// (`{project}-{service}-{replica}`).
    #[must_use]
    pub fn unit_name(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.project,
            self.service,
            self.replica,
            sep = NAME_SEPARATOR
        )
    }
}

/// A unit as reported by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Engine-assigned unique identifier.
    pub id: UnitId,
    /// Full engine name, including the project-scoping prefix.
    pub name: String,
    /// Engine-reported lifecycle state.
    pub state: UnitState,
    /// Labels carried on the unit.
    pub labels: HashMap<String, String>,
}

impl Unit {
    /// Returns the owning service name, read from the unit's labels.
    #[must_use]
    pub fn service(&self) -> Option<&str> {
        self.labels.get(LABEL_SERVICE).map(String::as_str)
    }

    /// Returns the unit's name with the `{project}-` prefix stripped.
    ///
    /// Falls back to the full engine name when the unit does not carry the
    /// expected prefix (e.g. it was created outside this project's scope).
    #[must_use]
    pub fn display_name(&self, project: &str) -> &str {
        let prefix = format!("{project}{NAME_SEPARATOR}");
        self.name.strip_prefix(&prefix).unwrap_or(&self.name)
    }
}

/// Scope filter for unit discovery.
///
/// The filter selects by project and service membership, not by state:
/// created-but-not-started units are included, so a listing taken before a
/// startup pass covers the units that pass is about to bring up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitFilter {
    /// Restrict to units of this project.
    pub project: Option<String>,
    /// Restrict to units of these services; empty means all services.
    pub services: Vec<String>,
}

impl UnitFilter {
    /// Creates a filter scoped to one project.
    #[must_use]
    pub fn project(name: impl Into<String>) -> Self {
        Self {
            project: Some(name.into()),
            services: Vec::new(),
        }
    }

    /// Further restricts the filter to the given services.
    #[must_use]
    pub fn services(mut self, services: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    /// Returns whether a unit falls inside this filter's scope.
    #[must_use]
    pub fn matches(&self, unit: &Unit) -> bool {
        if let Some(project) = &self.project {
            let labelled = unit
                .labels
                .get(convoy_common::constants::LABEL_PROJECT)
                .map(String::as_str);
            if labelled != Some(project.as_str()) {
                return false;
            }
        }
        if self.services.is_empty() {
            return true;
        }
        unit.service()
            .is_some_and(|s| self.services.iter().any(|wanted| wanted == s))
    }
}
